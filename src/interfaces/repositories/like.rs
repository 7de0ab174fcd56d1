use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::like_entity::{MovieLike, UserLike};
use crate::middleware::error::AppResult;

/// Flips the like row for (user, review): `Some(row)` when the call created
/// the like, `None` when it removed an existing one.
#[async_trait]
pub trait LikesRepositoryInterface {
    async fn toggle(&self, user: Thing, review: Thing) -> AppResult<Option<UserLike>>;
    async fn find_by_user(&self, user: Thing) -> AppResult<Vec<UserLike>>;
    async fn find_by_review(&self, review: Thing) -> AppResult<Vec<UserLike>>;
}

#[async_trait]
pub trait MovieLikesRepositoryInterface {
    async fn toggle(&self, user: Thing, movie: Thing) -> AppResult<Option<MovieLike>>;
    async fn find_by_user(&self, user: Thing) -> AppResult<Vec<MovieLike>>;
    async fn find_by_movie(&self, movie: Thing) -> AppResult<Vec<MovieLike>>;
}
