use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::entities::like_entity::{MovieLike, UserLike};
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::services::like_service::{LikeService, LikeToggle};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/v1/like/user/:user_id", get(get_user_likes))
        .route("/api/v1/like/review/:review_id", get(get_review_likes))
        .route("/api/v1/like/movie/:movie_id", get(get_movie_likes))
        .route(
            "/api/v1/like/review/:review_id/reviewer/:user_id",
            put(toggle_review_like),
        )
        .route(
            "/api/v1/like/movie/:movie_id/user/:user_id",
            put(toggle_movie_like),
        )
}

async fn get_user_likes(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> CtxResult<Json<Vec<UserLike>>> {
    let likes = LikeService::new(
        &state.db.client,
        &ctx,
        &state.db.likes,
        &state.db.movie_likes,
    )
    .get_likes_by_user(&user_id)
    .await?;

    Ok(Json(likes))
}

async fn get_review_likes(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(review_id): Path<String>,
) -> CtxResult<Json<Vec<UserLike>>> {
    let likes = LikeService::new(
        &state.db.client,
        &ctx,
        &state.db.likes,
        &state.db.movie_likes,
    )
    .get_likes_for_review(&review_id)
    .await?;

    Ok(Json(likes))
}

async fn get_movie_likes(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(movie_id): Path<String>,
) -> CtxResult<Json<Vec<MovieLike>>> {
    let likes = LikeService::new(
        &state.db.client,
        &ctx,
        &state.db.likes,
        &state.db.movie_likes,
    )
    .get_likes_for_movie(&movie_id)
    .await?;

    Ok(Json(likes))
}

// a fresh like comes back as the record; an unlike as an empty 200
async fn toggle_review_like(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path((review_id, user_id)): Path<(String, String)>,
) -> CtxResult<Response> {
    let toggled = LikeService::new(
        &state.db.client,
        &ctx,
        &state.db.likes,
        &state.db.movie_likes,
    )
    .toggle_review_like(&review_id, &user_id)
    .await?;

    match toggled {
        LikeToggle::Liked(like) => Ok(Json(like).into_response()),
        LikeToggle::Unliked => Ok(StatusCode::OK.into_response()),
    }
}

async fn toggle_movie_like(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path((movie_id, user_id)): Path<(String, String)>,
) -> CtxResult<Response> {
    let toggled = LikeService::new(
        &state.db.client,
        &ctx,
        &state.db.likes,
        &state.db.movie_likes,
    )
    .toggle_movie_like(&movie_id, &user_id)
    .await?;

    match toggled {
        LikeToggle::Liked(like) => Ok(Json(like).into_response()),
        LikeToggle::Unliked => Ok(StatusCode::OK.into_response()),
    }
}
