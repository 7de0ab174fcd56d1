use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::entities::user_entity::{User, UserDbService};
use crate::entities::user_type_entity::{self, UserTypeDbService};
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::IdentIdName;
use crate::middleware::utils::string_utils::get_table_thing;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/v1/user", get(get_users).post(create_user))
        .route(
            "/api/v1/user/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: String,
    pub user_type: String,
}

async fn get_users(State(state): State<Arc<CtxState>>, ctx: Ctx) -> CtxResult<Json<Vec<User>>> {
    let users = UserDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_all()
    .await?;

    Ok(Json(users))
}

async fn get_user(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> CtxResult<Json<User>> {
    let user = UserDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&user_id)
    .await?;

    Ok(Json(user))
}

async fn create_user(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Json(input): Json<UserInput>,
) -> CtxResult<(StatusCode, Json<User>)> {
    input.validate()?;

    let user_type = get_table_thing(user_type_entity::TABLE_NAME, &input.user_type)
        .map_err(|e| ctx.to_ctx_error(e))?;
    UserTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .must_exist(IdentIdName::Id(user_type.clone()))
    .await?;

    let user = UserDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .create(User {
        id: None,
        email: input.email,
        full_name: input.full_name,
        user_type,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_id): Path<String>,
    Json(input): Json<UserInput>,
) -> CtxResult<Json<User>> {
    input.validate()?;

    let user_type = get_table_thing(user_type_entity::TABLE_NAME, &input.user_type)
        .map_err(|e| ctx.to_ctx_error(e))?;
    UserTypeDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .must_exist(IdentIdName::Id(user_type.clone()))
    .await?;

    let service = UserDbService {
        db: &state.db.client,
        ctx: &ctx,
    };
    let mut user = service.get_by_id(&user_id).await?;
    user.email = input.email;
    user.full_name = input.full_name;
    user.user_type = user_type;
    let user = service.update(user).await?;

    Ok(Json(user))
}

async fn delete_user(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> CtxResult<StatusCode> {
    UserDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .delete(&user_id)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
