use serde::{Deserialize, Serialize};
use surrealdb::err::Error::IndexExists;
use surrealdb::sql::Thing;
use surrealdb::Error as ErrorSrl;

use crate::entities::user_type_entity;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, CtxError, CtxResult};
use crate::middleware::utils::db_utils::{
    exists_entity, get_all_entities, get_entity, record_exists, with_not_found_err, IdentIdName,
};
use crate::middleware::utils::string_utils::get_table_thing;

use crate::database::client::Db;

/// A reviewer account. The email is the natural key; likes and reviews
/// reference the record id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub email: String,
    pub full_name: String,
    pub user_type: Thing,
}

pub struct UserDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "user";

const TABLE_COL_USER_TYPE: &str = user_type_entity::TABLE_NAME;
const INDEX_EMAIL_UNIQUE: &str = "user_email_idx";

impl<'a> UserDbService<'a> {
    pub fn get_table_name() -> &'static str {
        TABLE_NAME
    }

    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS email ON TABLE {TABLE_NAME} TYPE string VALUE string::lowercase($value);
    DEFINE FIELD IF NOT EXISTS full_name ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS user_type ON TABLE {TABLE_NAME} TYPE record<{TABLE_COL_USER_TYPE}>;
    DEFINE INDEX IF NOT EXISTS {INDEX_EMAIL_UNIQUE} ON TABLE {TABLE_NAME} COLUMNS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS user_type_idx ON TABLE {TABLE_NAME} COLUMNS user_type;
");
        let mutation = self.db.query(sql).await?;
        mutation.check().expect("should mutate user");

        Ok(())
    }

    pub async fn must_exist(&self, ident: IdentIdName) -> CtxResult<Thing> {
        let opt = exists_entity(self.db, TABLE_NAME.to_string(), &ident).await?;
        with_not_found_err(opt, self.ctx, ident.to_string().as_str())
    }

    pub async fn get(&self, ident_id_name: IdentIdName) -> CtxResult<User> {
        let opt = get_entity::<User>(self.db, TABLE_NAME.to_string(), &ident_id_name).await?;
        with_not_found_err(opt, self.ctx, ident_id_name.to_string().as_str())
    }

    pub async fn get_by_id(&self, id: &str) -> CtxResult<User> {
        let thing = get_table_thing(TABLE_NAME, id).map_err(CtxError::from(self.ctx))?;
        self.get(IdentIdName::Id(thing)).await
    }

    pub async fn get_by_email(&self, email: &str) -> CtxResult<User> {
        self.get(IdentIdName::ColumnIdent {
            column: "email".to_string(),
            val: email.to_lowercase(),
            rec: false,
        })
        .await
    }

    pub async fn get_all(&self) -> CtxResult<Vec<User>> {
        get_all_entities::<User>(self.db, TABLE_NAME.to_string()).await
    }

    pub async fn create(&self, data: User) -> CtxResult<User> {
        let email = data.email.clone();
        self.db
            .create(TABLE_NAME)
            .content(data)
            .await
            .map_err(|e| match e {
                ErrorSrl::Db(err) => match err {
                    IndexExists { index, .. } if index == INDEX_EMAIL_UNIQUE => {
                        self.ctx.to_ctx_error(AppError::AlreadyExists {
                            ident: format!("user {email}"),
                        })
                    }
                    _ => CtxError::from(self.ctx)(ErrorSrl::Db(err)),
                },
                _ => CtxError::from(self.ctx)(e),
            })
            .map(|v: Option<User>| v.unwrap())
    }

    pub async fn update(&self, record: User) -> CtxResult<User> {
        let resource = record.id.clone().ok_or(AppError::Generic {
            description: "can not update user with no id".to_string(),
        })?;
        let email = record.email.clone();

        let updated: Option<User> = self
            .db
            .update((resource.tb.clone(), resource.id.clone().to_raw()))
            .content(record)
            .await
            .map_err(|e| match e {
                ErrorSrl::Db(err) => match err {
                    IndexExists { index, .. } if index == INDEX_EMAIL_UNIQUE => {
                        self.ctx.to_ctx_error(AppError::AlreadyExists {
                            ident: format!("user {email}"),
                        })
                    }
                    _ => CtxError::from(self.ctx)(ErrorSrl::Db(err)),
                },
                _ => CtxError::from(self.ctx)(e),
            })?;
        updated.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: resource.to_raw(),
            })
        })
    }

    pub async fn delete(&self, id: &str) -> CtxResult<()> {
        let thing = get_table_thing(TABLE_NAME, id).map_err(CtxError::from(self.ctx))?;
        record_exists(self.db, &thing)
            .await
            .map_err(CtxError::from(self.ctx))?;
        let _: Option<User> = self
            .db
            .delete((thing.tb, thing.id.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(())
    }
}
