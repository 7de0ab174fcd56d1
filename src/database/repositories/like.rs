use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::err::Error::IndexExists;
use surrealdb::sql::Thing;
use surrealdb::Error as ErrorSrl;

use crate::database::client::Db;
use crate::database::table_names::LIKE_TABLE_NAME;
use crate::entities::like_entity::UserLike;
use crate::entities::review_entity::TABLE_NAME as REVIEW_TABLE_NAME;
use crate::entities::user_entity::TABLE_NAME as USER_TABLE_NAME;
use crate::interfaces::repositories::like::LikesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};

const INDEX_IN_OUT: &str = "in_out_unique_idx";
// check-then-act both run inside one transaction; the unique index catches
// the interleavings the engine still admits, one rerun resolves them
const TOGGLE_MAX_ATTEMPTS: u8 = 4;

#[derive(Debug)]
pub struct LikesRepository {
    client: Arc<Db>,
}

impl LikesRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("

    DEFINE TABLE IF NOT EXISTS {LIKE_TABLE_NAME} TYPE RELATION IN {USER_TABLE_NAME} OUT {REVIEW_TABLE_NAME} ENFORCED SCHEMAFULL PERMISSIONS NONE;
    DEFINE INDEX IF NOT EXISTS {INDEX_IN_OUT} ON {LIKE_TABLE_NAME} FIELDS in, out UNIQUE;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {LIKE_TABLE_NAME} TYPE datetime DEFAULT time::now();

    ");
        let mutation = self.client.query(sql).await?;

        mutation.check().expect("should mutate LikesRepository");

        Ok(())
    }

    async fn run_toggle(&self, user: Thing, review: Thing) -> Result<Option<UserLike>, ErrorSrl> {
        let mut res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $id = (SELECT id FROM {LIKE_TABLE_NAME} WHERE in=$in AND out=$out)[0].id; \
                IF $id THEN (DELETE {LIKE_TABLE_NAME} WHERE in=$in AND out=$out) ELSE (RELATE $in->{LIKE_TABLE_NAME}->$out) END; \
                COMMIT TRANSACTION;"
            ))
            .bind(("in", user))
            .bind(("out", review))
            .await?;

        let rows = res.take::<Vec<UserLike>>(res.num_statements() - 1)?;
        Ok(rows.into_iter().next())
    }
}

fn is_retryable(err: &ErrorSrl) -> bool {
    err.to_string().contains("can be retried")
}

#[async_trait]
impl LikesRepositoryInterface for LikesRepository {
    async fn toggle(&self, user: Thing, review: Thing) -> AppResult<Option<UserLike>> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.run_toggle(user.clone(), review.clone()).await {
                Err(ErrorSrl::Db(IndexExists { index, .. }))
                    if index == INDEX_IN_OUT && attempts < TOGGLE_MAX_ATTEMPTS =>
                {
                    // lost the insert race; the rerun observes the row and deletes it
                    continue;
                }
                Err(e) if is_retryable(&e) && attempts < TOGGLE_MAX_ATTEMPTS => continue,
                other => return other.map_err(AppError::from),
            }
        }
    }

    async fn find_by_user(&self, user: Thing) -> AppResult<Vec<UserLike>> {
        let mut res = self
            .client
            .query(format!("SELECT * FROM {LIKE_TABLE_NAME} WHERE in=$in;"))
            .bind(("in", user))
            .await?;

        let likes = res.take::<Vec<UserLike>>(0)?;
        Ok(likes)
    }

    async fn find_by_review(&self, review: Thing) -> AppResult<Vec<UserLike>> {
        let mut res = self
            .client
            .query(format!("SELECT * FROM {LIKE_TABLE_NAME} WHERE out=$out;"))
            .bind(("out", review))
            .await?;

        let likes = res.take::<Vec<UserLike>>(0)?;
        Ok(likes)
    }
}
