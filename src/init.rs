use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::database::client::Database;
use crate::entities::movie_entity::MovieDbService;
use crate::entities::movie_type_entity::MovieTypeDbService;
use crate::entities::review_entity::ReviewDbService;
use crate::entities::user_entity::UserDbService;
use crate::entities::user_type_entity::UserTypeDbService;
use crate::middleware::{ctx::Ctx, error::AppResult, mw_ctx::CtxState};
use crate::routes::{likes, movie_types, movies, reviews, user_types, users};

pub async fn run_migrations(database: &Database) -> AppResult<()> {
    let db = database.client.clone();
    let c = Ctx::new(Uuid::new_v4());

    UserTypeDbService { db: &db, ctx: &c }.mutate_db().await?;
    MovieTypeDbService { db: &db, ctx: &c }.mutate_db().await?;
    UserDbService { db: &db, ctx: &c }.mutate_db().await?;
    MovieDbService { db: &db, ctx: &c }.mutate_db().await?;
    ReviewDbService { db: &db, ctx: &c }.mutate_db().await?;
    Ok(())
}

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(user_types::routes())
        .merge(movie_types::routes())
        .merge(users::routes())
        .merge(movies::routes())
        .merge(reviews::routes())
        .merge(likes::routes())
        .with_state(ctx_state.clone())
        .layer(TraceLayer::new_for_http())
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
