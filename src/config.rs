use dotenvy;

#[derive(Debug)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub port: u16,
    pub is_development: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").expect("Missing DB_URL in env");

        let port: u16 = std::env::var("HTTP_PORT")
            .unwrap_or("8080".to_string())
            .parse()
            .expect("HTTP_PORT should be number");

        let is_development = std::env::var("DEVELOPMENT")
            .map(|v| v.eq("true"))
            .unwrap_or(false);

        Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            port,
            is_development,
        }
    }
}
