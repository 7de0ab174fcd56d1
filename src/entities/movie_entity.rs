use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};

use crate::database::client::Db;
use crate::entities::movie_type_entity;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, CtxError, CtxResult};
use crate::middleware::utils::db_utils::{
    exists_entity, get_all_entities, get_entity, record_exists, with_not_found_err, IdentIdName,
};
use crate::middleware::utils::string_utils::get_table_thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    // id is ULID for sorting by time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub movie_type: Thing,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateMovie {
    pub id: Thing,
    pub title: String,
    pub description: Option<String>,
    pub movie_type: Thing,
}

pub struct MovieDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "movie";

const TABLE_COL_MOVIE_TYPE: &str = movie_type_entity::TABLE_NAME;

impl<'a> MovieDbService<'a> {
    pub fn get_table_name() -> &'static str {
        TABLE_NAME
    }

    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS title ON TABLE {TABLE_NAME} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE FIELD IF NOT EXISTS description ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS movie_type ON TABLE {TABLE_NAME} TYPE record<{TABLE_COL_MOVIE_TYPE}>;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    DEFINE INDEX IF NOT EXISTS movie_type_idx ON TABLE {TABLE_NAME} COLUMNS movie_type;
    DEFINE INDEX IF NOT EXISTS idx_title ON {TABLE_NAME} FIELDS title;
");
        let mutation = self.db.query(sql).await?;
        mutation.check().expect("should mutate movie");

        Ok(())
    }

    pub async fn must_exist(&self, ident: IdentIdName) -> CtxResult<Thing> {
        let opt = exists_entity(self.db, TABLE_NAME.to_string(), &ident).await?;
        with_not_found_err(opt, self.ctx, ident.to_string().as_str())
    }

    pub async fn get(&self, ident_id_name: IdentIdName) -> CtxResult<Movie> {
        let opt = get_entity::<Movie>(self.db, TABLE_NAME.to_string(), &ident_id_name).await?;
        with_not_found_err(opt, self.ctx, ident_id_name.to_string().as_str())
    }

    pub async fn get_by_id(&self, id: &str) -> CtxResult<Movie> {
        let thing = get_table_thing(TABLE_NAME, id).map_err(CtxError::from(self.ctx))?;
        self.get(IdentIdName::Id(thing)).await
    }

    pub async fn get_all(&self) -> CtxResult<Vec<Movie>> {
        get_all_entities::<Movie>(self.db, TABLE_NAME.to_string()).await
    }

    pub async fn create(&self, data: CreateMovie) -> CtxResult<Movie> {
        self.db
            .create(TABLE_NAME)
            .content(data)
            .await
            .map_err(CtxError::from(self.ctx))
            .map(|v: Option<Movie>| v.unwrap())
    }

    pub async fn update(&self, record: Movie) -> CtxResult<Movie> {
        let resource = record.id.clone().ok_or(AppError::Generic {
            description: "can not update movie with no id".to_string(),
        })?;

        let updated: Option<Movie> = self
            .db
            .update((resource.tb.clone(), resource.id.clone().to_raw()))
            .content(record)
            .await
            .map_err(CtxError::from(self.ctx))?;
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
        let _: Option<Movie> = self
            .db
            .delete((thing.tb, thing.id.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(())
    }

    pub fn get_new_movie_thing() -> Thing {
        // id is ULID for sorting by time
        Thing::from((TABLE_NAME.to_string(), Id::ulid()))
    }
}
