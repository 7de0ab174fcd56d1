use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::entities::user_type_entity::{UserType, UserTypeDbService};
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route(
            "/api/v1/user_type",
            get(get_user_types).post(create_user_type),
        )
        .route(
            "/api/v1/user_type/:user_type_id",
            get(get_user_type)
                .put(update_user_type)
                .delete(delete_user_type),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserTypeInput {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
}

async fn get_user_types(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
) -> CtxResult<Json<Vec<UserType>>> {
    let user_types = UserTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_all()
    .await?;

    Ok(Json(user_types))
}

async fn get_user_type(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_type_id): Path<String>,
) -> CtxResult<Json<UserType>> {
    let user_type = UserTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&user_type_id)
    .await?;

    Ok(Json(user_type))
}

async fn create_user_type(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Json(input): Json<UserTypeInput>,
) -> CtxResult<(StatusCode, Json<UserType>)> {
    input.validate()?;

    let user_type = UserTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .create(UserType {
        id: None,
        name: input.name,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(user_type)))
}

async fn update_user_type(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_type_id): Path<String>,
    Json(input): Json<UserTypeInput>,
) -> CtxResult<Json<UserType>> {
    input.validate()?;

    let service = UserTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    };
    let mut user_type = service.get_by_id(&user_type_id).await?;
    user_type.name = input.name;
    let user_type = service.update(user_type).await?;

    Ok(Json(user_type))
}

async fn delete_user_type(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_type_id): Path<String>,
) -> CtxResult<StatusCode> {
    UserTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .delete(&user_type_id)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
