use std::net::{Ipv4Addr, SocketAddr};

use movie_rating_server::config::AppConfig;
use movie_rating_server::database::client::{Database, DbConfig};
use movie_rating_server::init;
use movie_rating_server::middleware::error::AppResult;
use movie_rating_server::middleware::mw_ctx;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db = Database::connect(DbConfig {
        url: &config.db_url,
        database: &config.db_database,
        namespace: &config.db_namespace,
        username: config.db_username.as_deref(),
        password: config.db_password.as_deref(),
    })
    .await;

    db.run_migrations().await?;
    init::run_migrations(&db).await?;

    let ctx_state = mw_ctx::create_ctx_state(db, &config);
    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    info!("->> LISTENING on {addr}\n");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    axum::serve(listener, routes_all.into_make_service())
        .await
        .unwrap();

    Ok(())
}
