use serde::{Deserialize, Serialize};
use surrealdb::err::Error::IndexExists;
use surrealdb::sql::Thing;
use surrealdb::Error as ErrorSrl;

use crate::database::client::Db;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, CtxError, CtxResult};
use crate::middleware::utils::db_utils::{
    exists_entity, get_all_entities, get_entity, record_exists, with_not_found_err, IdentIdName,
};
use crate::middleware::utils::string_utils::get_table_thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub name: String,
}

pub struct UserTypeDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "user_type";
const INDEX_NAME_UNIQUE: &str = "user_type_name_idx";

impl<'a> UserTypeDbService<'a> {
    pub fn get_table_name() -> &'static str {
        TABLE_NAME
    }

    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS name ON TABLE {TABLE_NAME} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE INDEX IF NOT EXISTS {INDEX_NAME_UNIQUE} ON TABLE {TABLE_NAME} COLUMNS name UNIQUE;
");
        let mutation = self.db.query(sql).await?;
        mutation.check().expect("should mutate user_type");

        Ok(())
    }

    pub async fn must_exist(&self, ident: IdentIdName) -> CtxResult<Thing> {
        let opt = exists_entity(self.db, TABLE_NAME.to_string(), &ident).await?;
        with_not_found_err(opt, self.ctx, ident.to_string().as_str())
    }

    pub async fn get(&self, ident_id_name: IdentIdName) -> CtxResult<UserType> {
        let opt = get_entity::<UserType>(self.db, TABLE_NAME.to_string(), &ident_id_name).await?;
        with_not_found_err(opt, self.ctx, ident_id_name.to_string().as_str())
    }

    pub async fn get_by_id(&self, id: &str) -> CtxResult<UserType> {
        let thing = get_table_thing(TABLE_NAME, id).map_err(CtxError::from(self.ctx))?;
        self.get(IdentIdName::Id(thing)).await
    }

    pub async fn get_all(&self) -> CtxResult<Vec<UserType>> {
        get_all_entities::<UserType>(self.db, TABLE_NAME.to_string()).await
    }

    pub async fn create(&self, data: UserType) -> CtxResult<UserType> {
        let name = data.name.clone();
        self.db
            .create(TABLE_NAME)
            .content(data)
            .await
            .map_err(|e| match e {
                ErrorSrl::Db(err) => match err {
                    IndexExists { index, .. } if index == INDEX_NAME_UNIQUE => {
                        self.ctx.to_ctx_error(AppError::AlreadyExists {
                            ident: format!("user type {name}"),
                        })
                    }
                    _ => CtxError::from(self.ctx)(ErrorSrl::Db(err)),
                },
                _ => CtxError::from(self.ctx)(e),
            })
            .map(|v: Option<UserType>| v.unwrap())
    }

    pub async fn update(&self, record: UserType) -> CtxResult<UserType> {
        let resource = record.id.clone().ok_or(AppError::Generic {
            description: "can not update user type with no id".to_string(),
        })?;
        let name = record.name.clone();

        let updated: Option<UserType> = self
            .db
            .update((resource.tb.clone(), resource.id.clone().to_raw()))
            .content(record)
            .await
            .map_err(|e| match e {
                ErrorSrl::Db(err) => match err {
                    IndexExists { index, .. } if index == INDEX_NAME_UNIQUE => {
                        self.ctx.to_ctx_error(AppError::AlreadyExists {
                            ident: format!("user type {name}"),
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
        let _: Option<UserType> = self
            .db
            .delete((thing.tb, thing.id.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(())
    }
}
