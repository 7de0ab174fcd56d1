use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::entities::movie_entity::{self, MovieDbService};
use crate::entities::review_entity::{CreateReview, Review, ReviewDbService};
use crate::entities::user_entity::{self, UserDbService};
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::IdentIdName;
use crate::middleware::utils::string_utils::get_table_thing;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/v1/review", get(get_reviews).post(create_review))
        .route(
            "/api/v1/review/:review_id",
            get(get_review).put(update_review).delete(delete_review),
        )
}

#[derive(Debug, Deserialize)]
pub struct GetReviewsQuery {
    pub movie: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewInput {
    pub created_by: String,
    pub movie: String,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    pub rating: u8,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewUpdateInput {
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    pub rating: u8,
}

async fn get_reviews(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<GetReviewsQuery>,
) -> CtxResult<Json<Vec<Review>>> {
    let service = ReviewDbService {
        db: &state.db.client,
        ctx: &ctx,
    };

    let reviews = match query.movie {
        Some(movie_id) => {
            let movie = get_table_thing(movie_entity::TABLE_NAME, &movie_id)
                .map_err(|e| ctx.to_ctx_error(e))?;
            service.get_by_movie(movie).await?
        }
        None => service.get_all().await?,
    };

    Ok(Json(reviews))
}

async fn get_review(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(review_id): Path<String>,
) -> CtxResult<Json<Review>> {
    let review = ReviewDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&review_id)
    .await?;

    Ok(Json(review))
}

async fn create_review(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Json(input): Json<ReviewInput>,
) -> CtxResult<(StatusCode, Json<Review>)> {
    input.validate()?;

    let created_by = get_table_thing(user_entity::TABLE_NAME, &input.created_by)
        .map_err(|e| ctx.to_ctx_error(e))?;
    UserDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .must_exist(IdentIdName::Id(created_by.clone()))
    .await?;

    let movie =
        get_table_thing(movie_entity::TABLE_NAME, &input.movie).map_err(|e| ctx.to_ctx_error(e))?;
    MovieDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .must_exist(IdentIdName::Id(movie.clone()))
    .await?;

    let review = ReviewDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .create(CreateReview {
        id: ReviewDbService::get_new_review_thing(),
        created_by,
        movie,
        content: input.content,
        rating: input.rating,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

async fn update_review(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(review_id): Path<String>,
    Json(input): Json<ReviewUpdateInput>,
) -> CtxResult<Json<Review>> {
    input.validate()?;

    let service = ReviewDbService {
        db: &state.db.client,
        ctx: &ctx,
    };
    let mut review = service.get_by_id(&review_id).await?;
    review.content = input.content;
    review.rating = input.rating;
    let review = service.update(review).await?;

    Ok(Json(review))
}

async fn delete_review(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(review_id): Path<String>,
) -> CtxResult<StatusCode> {
    ReviewDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .delete(&review_id)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
