use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::client::Database;

pub struct CtxState {
    pub db: Database,
    pub is_development: bool,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CTX STATE HERE :)")
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    let ctx_state = CtxState {
        db,
        is_development: config.is_development,
    };
    Arc::new(ctx_state)
}
