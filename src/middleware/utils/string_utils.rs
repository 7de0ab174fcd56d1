use surrealdb::sql::Thing;

use crate::middleware::error::{AppError, AppResult};

pub fn get_string_thing(value: String) -> AppResult<Thing> {
    Thing::try_from(value.as_str()).map_err(|_| AppError::Generic {
        description: format!("Invalid record id = {value}"),
    })
}

pub fn get_str_thing(value: &str) -> AppResult<Thing> {
    Thing::try_from(value).map_err(|_| AppError::Generic {
        description: format!("Invalid record id = {value}"),
    })
}

// an id pointing at another table must not pass for this one
pub fn get_table_thing(table: &str, value: &str) -> AppResult<Thing> {
    let thing = get_str_thing(value)?;
    if thing.tb != table {
        return Err(AppError::EntityFailIdNotFound {
            ident: value.to_string(),
        });
    }
    Ok(thing)
}
