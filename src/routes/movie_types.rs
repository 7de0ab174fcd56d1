use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::entities::movie_type_entity::{MovieType, MovieTypeDbService};
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route(
            "/api/v1/movie_type",
            get(get_movie_types).post(create_movie_type),
        )
        .route(
            "/api/v1/movie_type/:movie_type_id",
            get(get_movie_type)
                .put(update_movie_type)
                .delete(delete_movie_type),
        )
        .route("/api/v1/movie_type/name/:name", get(get_movie_type_by_name))
}

#[derive(Debug, Deserialize, Validate)]
pub struct MovieTypeInput {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
}

async fn get_movie_types(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
) -> CtxResult<Json<Vec<MovieType>>> {
    let movie_types = MovieTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_all()
    .await?;

    Ok(Json(movie_types))
}

async fn get_movie_type(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(movie_type_id): Path<String>,
) -> CtxResult<Json<MovieType>> {
    let movie_type = MovieTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&movie_type_id)
    .await?;

    Ok(Json(movie_type))
}

async fn get_movie_type_by_name(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(name): Path<String>,
) -> CtxResult<Json<MovieType>> {
    let movie_type = MovieTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_name(&name)
    .await?;

    Ok(Json(movie_type))
}

async fn create_movie_type(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Json(input): Json<MovieTypeInput>,
) -> CtxResult<(StatusCode, Json<MovieType>)> {
    input.validate()?;

    let movie_type = MovieTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .create(MovieType {
        id: None,
        name: input.name,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(movie_type)))
}

async fn update_movie_type(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(movie_type_id): Path<String>,
    Json(input): Json<MovieTypeInput>,
) -> CtxResult<Json<MovieType>> {
    input.validate()?;

    let service = MovieTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    };
    let mut movie_type = service.get_by_id(&movie_type_id).await?;
    movie_type.name = input.name;
    let movie_type = service.update(movie_type).await?;

    Ok(Json(movie_type))
}

async fn delete_movie_type(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(movie_type_id): Path<String>,
) -> CtxResult<StatusCode> {
    MovieTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .delete(&movie_type_id)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
