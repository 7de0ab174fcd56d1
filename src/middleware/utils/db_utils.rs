use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use surrealdb::engine::any::Any as SurDb;
use surrealdb::method::Query;
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, AppResult, CtxError, CtxResult};

#[derive(Serialize, Deserialize, Debug)]
pub struct RecordWithId {
    pub id: Thing,
}

pub enum IdentIdName {
    Id(Thing),
    ColumnIdent { column: String, val: String, rec: bool },
}

impl IdentIdName {
    pub fn get_bindings_map(&self) -> HashMap<String, String> {
        let mut bindings: HashMap<String, String> = HashMap::new();
        match self {
            IdentIdName::Id(id) => {
                bindings.insert("id".to_string(), id.to_raw());
            }
            IdentIdName::ColumnIdent { column, val, .. } => {
                bindings.insert(column.clone(), val.clone());
            }
        }
        bindings
    }
}

impl Display for IdentIdName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentIdName::Id(_) => f.write_str("<record>$id"),
            IdentIdName::ColumnIdent { column, rec, .. } => {
                let prefix = if *rec { "<record>" } else { "" };
                f.write_str(format!("{column}={prefix}${column}").as_str())
            }
        }
    }
}

#[derive(Debug)]
pub struct QryBindingsVal(String, HashMap<String, String>);

impl QryBindingsVal {
    pub fn new(qry: String, bindings: HashMap<String, String>) -> Self {
        QryBindingsVal(qry, bindings)
    }
    pub fn get_query_string(&self) -> String {
        self.0.clone()
    }
    pub fn into_query(self, db: &Db) -> Query<SurDb> {
        self.1
            .into_iter()
            .fold(db.query(self.0), |qry, n_val| qry.bind(n_val))
    }
}

pub fn get_entity_query_str(
    ident: &IdentIdName,
    select_fields_or_id: Option<&str>,
    table_name: String,
) -> Result<QryBindingsVal, AppError> {
    let mut q_bindings: HashMap<String, String> = HashMap::new();

    let query_string = match ident {
        IdentIdName::Id(id) => {
            if id.to_raw().len() < 3 {
                return Err(AppError::Generic {
                    description: "IdentIdName::Id() value too short".to_string(),
                });
            }
            let fields = select_fields_or_id.unwrap_or("*");
            q_bindings.insert("id".to_string(), id.to_raw());

            format!("SELECT {fields} FROM <record>$id;")
        }
        _ => {
            let fields = select_fields_or_id.unwrap_or("id");
            q_bindings.extend(ident.get_bindings_map());
            q_bindings.insert("_table".to_string(), table_name);
            format!(
                "SELECT {fields} FROM type::table($_table) WHERE {};",
                ident.to_string()
            )
        }
    };
    Ok(QryBindingsVal(query_string, q_bindings))
}

pub async fn get_entity<T: for<'a> Deserialize<'a>>(
    db: &Db,
    table_name: String,
    ident: &IdentIdName,
) -> CtxResult<Option<T>> {
    let query_string = get_entity_query_str(ident, Some("*"), table_name)?;
    get_query(db, query_string).await
}

pub async fn get_all_entities<T: for<'a> Deserialize<'a>>(
    db: &Db,
    table_name: String,
) -> CtxResult<Vec<T>> {
    let mut res = db
        .query("SELECT * FROM type::table($_table);")
        .bind(("_table", table_name))
        .await?;
    let res = res.take::<Vec<T>>(0)?;
    Ok(res)
}

pub async fn get_entity_list<T: for<'a> Deserialize<'a>>(
    db: &Db,
    table_name: String,
    ident: &IdentIdName,
) -> CtxResult<Vec<T>> {
    let query_string = get_entity_query_str(ident, Some("*"), table_name)?;
    get_list_qry(db, query_string).await
}

pub async fn get_query<T: for<'a> Deserialize<'a>>(
    db: &Db,
    query_string: QryBindingsVal,
) -> Result<Option<T>, CtxError> {
    let mut res = query_string.into_query(db).await?;
    let res = res.take::<Option<T>>(0)?;
    Ok(res)
}

pub async fn get_list_qry<T: for<'a> Deserialize<'a>>(
    db: &Db,
    query_string: QryBindingsVal,
) -> CtxResult<Vec<T>> {
    let mut res = query_string.into_query(db).await?;
    let res = res.take::<Vec<T>>(0)?;
    Ok(res)
}

pub async fn exists_entity(
    db: &Db,
    table_name: String,
    ident: &IdentIdName,
) -> CtxResult<Option<Thing>> {
    match ident {
        IdentIdName::Id(id) => {
            record_exists(db, id).await?;
            Ok(Some(id.clone()))
        }
        _ => {
            let query_string = get_entity_query_str(ident, None, table_name)?;
            let mut res = query_string.into_query(db).await?;
            let res = res.take::<Option<RecordWithId>>(0)?;
            match res {
                None => Ok(None),
                Some(rec) => Ok(Some(rec.id)),
            }
        }
    }
}

pub async fn record_exists(db: &Db, record_id: &Thing) -> AppResult<()> {
    let qry = "RETURN record::exists(<record>$rec_id);";
    let mut res = db.query(qry).bind(("rec_id", record_id.to_raw())).await?;
    let res: Option<bool> = res.take(0)?;
    match res.unwrap_or(false) {
        true => Ok(()),
        false => Err(AppError::EntityFailIdNotFound {
            ident: record_id.to_raw(),
        }),
    }
}

pub fn with_not_found_err<T>(opt: Option<T>, ctx: &Ctx, ident: &str) -> CtxResult<T> {
    match opt {
        None => Err(ctx.to_ctx_error(AppError::EntityFailIdNotFound {
            ident: ident.to_string(),
        })),
        Some(res) => Ok(res),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_display_renders_bind_placeholders() {
        let by_id = IdentIdName::Id(Thing::from(("movie", "m1")));
        assert_eq!(by_id.to_string(), "<record>$id");

        let by_column = IdentIdName::ColumnIdent {
            column: "name".to_string(),
            val: "Drama".to_string(),
            rec: false,
        };
        assert_eq!(by_column.to_string(), "name=$name");

        let by_record_column = IdentIdName::ColumnIdent {
            column: "movie".to_string(),
            val: "movie:one".to_string(),
            rec: true,
        };
        assert_eq!(by_record_column.to_string(), "movie=<record>$movie");
    }

    #[test]
    fn column_ident_binds_its_value() {
        let ident = IdentIdName::ColumnIdent {
            column: "name".to_string(),
            val: "Drama".to_string(),
            rec: false,
        };
        let qry = get_entity_query_str(&ident, Some("*"), "movie_type".to_string()).unwrap();
        assert_eq!(
            qry.get_query_string(),
            "SELECT * FROM type::table($_table) WHERE name=$name;"
        );
    }

    #[test]
    fn id_ident_binds_the_raw_record_id() {
        let thing = Thing::from(("movie", "m1"));
        let ident = IdentIdName::Id(thing.clone());
        let bindings = ident.get_bindings_map();
        assert_eq!(bindings.get("id"), Some(&thing.to_raw()));
    }
}
