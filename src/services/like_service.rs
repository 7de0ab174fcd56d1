use surrealdb::sql::Thing;
use tracing::info;

use crate::database::client::Db;
use crate::entities::like_entity::{MovieLike, UserLike};
use crate::entities::movie_entity::MovieDbService;
use crate::entities::review_entity::ReviewDbService;
use crate::entities::user_entity::UserDbService;
use crate::interfaces::repositories::like::{
    LikesRepositoryInterface, MovieLikesRepositoryInterface,
};
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, CtxError, CtxResult};
use crate::middleware::utils::db_utils::IdentIdName;
use crate::middleware::utils::string_utils::get_str_thing;

/// Outcome of one toggle call. `Liked` carries the created row; an unlike has
/// nothing left to return.
#[derive(Debug)]
pub enum LikeToggle<T> {
    Liked(T),
    Unliked,
}

pub struct LikeService<'a, L, M>
where
    L: LikesRepositoryInterface,
    M: MovieLikesRepositoryInterface,
{
    ctx: &'a Ctx,
    users_repository: UserDbService<'a>,
    reviews_repository: ReviewDbService<'a>,
    movies_repository: MovieDbService<'a>,
    likes_repository: &'a L,
    movie_likes_repository: &'a M,
}

impl<'a, L, M> LikeService<'a, L, M>
where
    L: LikesRepositoryInterface,
    M: MovieLikesRepositoryInterface,
{
    pub fn new(
        db: &'a Db,
        ctx: &'a Ctx,
        likes_repository: &'a L,
        movie_likes_repository: &'a M,
    ) -> Self {
        Self {
            ctx,
            users_repository: UserDbService { db, ctx },
            reviews_repository: ReviewDbService { db, ctx },
            movies_repository: MovieDbService { db, ctx },
            likes_repository,
            movie_likes_repository,
        }
    }

    /// Flips the like state for (user, review). Both ends must resolve; a
    /// missing one is an invalid reference, never a silent no-op.
    pub async fn toggle_review_like(
        &self,
        review_id: &str,
        user_id: &str,
    ) -> CtxResult<LikeToggle<UserLike>> {
        let review = self.resolve_review(review_id).await?;
        let user = self.resolve_user(user_id).await?;

        let toggled = self
            .likes_repository
            .toggle(user.clone(), review.clone())
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;

        match toggled {
            Some(like) => {
                info!("{} liked {}", user, review);
                Ok(LikeToggle::Liked(like))
            }
            None => {
                info!("{} disliked {}", user, review);
                Ok(LikeToggle::Unliked)
            }
        }
    }

    pub async fn toggle_movie_like(
        &self,
        movie_id: &str,
        user_id: &str,
    ) -> CtxResult<LikeToggle<MovieLike>> {
        let movie = self.resolve_movie(movie_id).await?;
        let user = self.resolve_user(user_id).await?;

        let toggled = self
            .movie_likes_repository
            .toggle(user.clone(), movie.clone())
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;

        match toggled {
            Some(like) => {
                info!("{} liked {}", user, movie);
                Ok(LikeToggle::Liked(like))
            }
            None => {
                info!("{} disliked {}", user, movie);
                Ok(LikeToggle::Unliked)
            }
        }
    }

    pub async fn get_likes_by_user(&self, user_id: &str) -> CtxResult<Vec<UserLike>> {
        let user = self.must_exist_user(user_id).await?;

        let likes = self
            .likes_repository
            .find_by_user(user)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        if likes.is_empty() {
            return Err(self.ctx.to_ctx_error(AppError::LikesNotFound {
                ident: user_id.to_string(),
            }));
        }
        Ok(likes)
    }

    pub async fn get_likes_for_review(&self, review_id: &str) -> CtxResult<Vec<UserLike>> {
        let review = get_str_thing(review_id).map_err(|_| {
            self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: review_id.to_string(),
            })
        })?;
        self.reviews_repository
            .must_exist(IdentIdName::Id(review.clone()))
            .await?;

        let likes = self
            .likes_repository
            .find_by_review(review)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        if likes.is_empty() {
            return Err(self.ctx.to_ctx_error(AppError::LikesNotFound {
                ident: review_id.to_string(),
            }));
        }
        Ok(likes)
    }

    pub async fn get_likes_for_movie(&self, movie_id: &str) -> CtxResult<Vec<MovieLike>> {
        let movie = get_str_thing(movie_id).map_err(|_| {
            self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: movie_id.to_string(),
            })
        })?;
        self.movies_repository
            .must_exist(IdentIdName::Id(movie.clone()))
            .await?;

        let likes = self
            .movie_likes_repository
            .find_by_movie(movie)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        if likes.is_empty() {
            return Err(self.ctx.to_ctx_error(AppError::LikesNotFound {
                ident: movie_id.to_string(),
            }));
        }
        Ok(likes)
    }

    async fn must_exist_user(&self, user_id: &str) -> CtxResult<Thing> {
        let user = get_str_thing(user_id).map_err(|_| {
            self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: user_id.to_string(),
            })
        })?;
        self.users_repository
            .must_exist(IdentIdName::Id(user.clone()))
            .await?;
        Ok(user)
    }

    // toggle ends collapse resolution failures into InvalidReference; store
    // failures keep their own kind so callers can still retry them
    fn as_invalid_reference(&self, err: CtxError, ident: &str) -> CtxError {
        match err.error {
            AppError::SurrealDb { .. } => err,
            _ => self.ctx.to_ctx_error(AppError::InvalidReference {
                ident: ident.to_string(),
            }),
        }
    }

    async fn resolve_user(&self, user_id: &str) -> CtxResult<Thing> {
        self.must_exist_user(user_id)
            .await
            .map_err(|e| self.as_invalid_reference(e, user_id))
    }

    async fn resolve_review(&self, review_id: &str) -> CtxResult<Thing> {
        let resolved = match get_str_thing(review_id) {
            Ok(review) => self
                .reviews_repository
                .must_exist(IdentIdName::Id(review.clone()))
                .await
                .map(|_| review),
            Err(e) => Err(self.ctx.to_ctx_error(e)),
        };
        resolved.map_err(|e| self.as_invalid_reference(e, review_id))
    }

    async fn resolve_movie(&self, movie_id: &str) -> CtxResult<Thing> {
        let resolved = match get_str_thing(movie_id) {
            Ok(movie) => self
                .movies_repository
                .must_exist(IdentIdName::Id(movie.clone()))
                .await
                .map(|_| movie),
            Err(e) => Err(self.ctx.to_ctx_error(e)),
        };
        resolved.map_err(|e| self.as_invalid_reference(e, movie_id))
    }
}
