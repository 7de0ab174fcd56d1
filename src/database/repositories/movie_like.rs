use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::err::Error::IndexExists;
use surrealdb::sql::Thing;
use surrealdb::Error as ErrorSrl;

use crate::database::client::Db;
use crate::database::table_names::MOVIE_LIKE_TABLE_NAME;
use crate::entities::like_entity::MovieLike;
use crate::entities::movie_entity::TABLE_NAME as MOVIE_TABLE_NAME;
use crate::entities::user_entity::TABLE_NAME as USER_TABLE_NAME;
use crate::interfaces::repositories::like::MovieLikesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};

const INDEX_IN_OUT: &str = "in_out_unique_idx";
const TOGGLE_MAX_ATTEMPTS: u8 = 4;

#[derive(Debug)]
pub struct MovieLikesRepository {
    client: Arc<Db>,
}

impl MovieLikesRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("

    DEFINE TABLE IF NOT EXISTS {MOVIE_LIKE_TABLE_NAME} TYPE RELATION IN {USER_TABLE_NAME} OUT {MOVIE_TABLE_NAME} ENFORCED SCHEMAFULL PERMISSIONS NONE;
    DEFINE INDEX IF NOT EXISTS {INDEX_IN_OUT} ON {MOVIE_LIKE_TABLE_NAME} FIELDS in, out UNIQUE;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {MOVIE_LIKE_TABLE_NAME} TYPE datetime DEFAULT time::now();

    ");
        let mutation = self.client.query(sql).await?;

        mutation.check().expect("should mutate MovieLikesRepository");

        Ok(())
    }

    async fn run_toggle(&self, user: Thing, movie: Thing) -> Result<Option<MovieLike>, ErrorSrl> {
        let mut res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $id = (SELECT id FROM {MOVIE_LIKE_TABLE_NAME} WHERE in=$in AND out=$out)[0].id; \
                IF $id THEN (DELETE {MOVIE_LIKE_TABLE_NAME} WHERE in=$in AND out=$out) ELSE (RELATE $in->{MOVIE_LIKE_TABLE_NAME}->$out) END; \
                COMMIT TRANSACTION;"
            ))
            .bind(("in", user))
            .bind(("out", movie))
            .await?;

        let rows = res.take::<Vec<MovieLike>>(res.num_statements() - 1)?;
        Ok(rows.into_iter().next())
    }
}

fn is_retryable(err: &ErrorSrl) -> bool {
    err.to_string().contains("can be retried")
}

#[async_trait]
impl MovieLikesRepositoryInterface for MovieLikesRepository {
    async fn toggle(&self, user: Thing, movie: Thing) -> AppResult<Option<MovieLike>> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.run_toggle(user.clone(), movie.clone()).await {
                Err(ErrorSrl::Db(IndexExists { index, .. }))
                    if index == INDEX_IN_OUT && attempts < TOGGLE_MAX_ATTEMPTS =>
                {
                    continue;
                }
                Err(e) if is_retryable(&e) && attempts < TOGGLE_MAX_ATTEMPTS => continue,
                other => return other.map_err(AppError::from),
            }
        }
    }

    async fn find_by_user(&self, user: Thing) -> AppResult<Vec<MovieLike>> {
        let mut res = self
            .client
            .query(format!("SELECT * FROM {MOVIE_LIKE_TABLE_NAME} WHERE in=$in;"))
            .bind(("in", user))
            .await?;

        let likes = res.take::<Vec<MovieLike>>(0)?;
        Ok(likes)
    }

    async fn find_by_movie(&self, movie: Thing) -> AppResult<Vec<MovieLike>> {
        let mut res = self
            .client
            .query(format!("SELECT * FROM {MOVIE_LIKE_TABLE_NAME} WHERE out=$out;"))
            .bind(("out", movie))
            .await?;

        let likes = res.take::<Vec<MovieLike>>(0)?;
        Ok(likes)
    }
}
