use std::sync::Arc;

use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repositories::like::LikesRepository;
use crate::database::repositories::movie_like::MovieLikesRepository;
use crate::middleware::error::AppError;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

#[derive(Debug)]
pub struct Database {
    pub client: Db,
    pub likes: LikesRepository,
    pub movie_likes: MovieLikesRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> Self {
        info!("->> connecting DB config = {:?}", config);
        let conn = connect(config.url)
            .await
            .expect("Failed to connect to SurrealDB");

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password })
                .await
                .expect("Failed to sign in to SurrealDB");
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await
            .expect("Failed to select namespace and database");

        let version = conn
            .version()
            .await
            .expect("Failed to get SurrealDB version");

        info!("->> connected DB version: {version}");

        let client = Arc::new(conn.clone());
        Self {
            client: conn,
            likes: LikesRepository::new(client.clone()),
            movie_likes: MovieLikesRepository::new(client),
        }
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        self.likes.mutate_db().await?;
        self.movie_likes.mutate_db().await?;
        Ok(())
    }
}
