use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// A like row. Its existence IS the liked state; deleting it is the unlike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLike {
    pub id: Thing,
    #[serde(rename = "in")]
    pub user: Thing,
    #[serde(rename = "out")]
    pub review: Thing,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieLike {
    pub id: Thing,
    #[serde(rename = "in")]
    pub user: Thing,
    #[serde(rename = "out")]
    pub movie: Thing,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}
