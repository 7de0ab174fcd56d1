use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::entities::movie_entity::{CreateMovie, Movie, MovieDbService};
use crate::entities::movie_type_entity::{self, MovieTypeDbService};
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::IdentIdName;
use crate::middleware::utils::string_utils::get_table_thing;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/v1/movie", get(get_movies).post(create_movie))
        .route(
            "/api/v1/movie/:movie_id",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct MovieInput {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub movie_type: String,
}

async fn get_movies(State(state): State<Arc<CtxState>>, ctx: Ctx) -> CtxResult<Json<Vec<Movie>>> {
    let movies = MovieDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_all()
    .await?;

    Ok(Json(movies))
}

async fn get_movie(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(movie_id): Path<String>,
) -> CtxResult<Json<Movie>> {
    let movie = MovieDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&movie_id)
    .await?;

    Ok(Json(movie))
}

async fn create_movie(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Json(input): Json<MovieInput>,
) -> CtxResult<(StatusCode, Json<Movie>)> {
    input.validate()?;

    let movie_type = get_table_thing(movie_type_entity::TABLE_NAME, &input.movie_type)
        .map_err(|e| ctx.to_ctx_error(e))?;
    MovieTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .must_exist(IdentIdName::Id(movie_type.clone()))
    .await?;

    let movie = MovieDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .create(CreateMovie {
        id: MovieDbService::get_new_movie_thing(),
        title: input.title,
        description: input.description,
        movie_type,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(movie_id): Path<String>,
    Json(input): Json<MovieInput>,
) -> CtxResult<Json<Movie>> {
    input.validate()?;

    let movie_type = get_table_thing(movie_type_entity::TABLE_NAME, &input.movie_type)
        .map_err(|e| ctx.to_ctx_error(e))?;
    MovieTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .must_exist(IdentIdName::Id(movie_type.clone()))
    .await?;

    let service = MovieDbService {
        db: &state.db.client,
        ctx: &ctx,
    };
    let mut movie = service.get_by_id(&movie_id).await?;
    movie.title = input.title;
    movie.description = input.description;
    movie.movie_type = movie_type;
    let movie = service.update(movie).await?;

    Ok(Json(movie))
}

async fn delete_movie(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(movie_id): Path<String>,
) -> CtxResult<StatusCode> {
    MovieDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .delete(&movie_id)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
