/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first by the binary):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:cowork.db | SQLite database location |
/// | HTTP_PORT | 5000 | HTTP listen port |
/// | ENVIRONMENT | development | development, staging or production |
/// | LOG_LEVEL | info | Default log level |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
/// | DB_MAX_CONNECTIONS | 5 | Pool size |
/// | SEED_DEMO_DATA | true in development | Insert demo workspace on empty database |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/cowork.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string
    pub database_url: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    /// Log directory; file logging is enabled only when it exists
    pub log_dir: Option<String>,
    /// Maximum pooled SQLite connections
    pub db_max_connections: u32,
    /// Seed the demo workspace when the database has none
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let seed_default = environment == "development";

        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:cowork.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(seed_default),
            environment,
        }
    }

    /// Override the parts tests care about
    pub fn with_overrides(database_url: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_url = database_url.into();
        config.http_port = http_port;
        config.seed_demo_data = false;
        config
    }
}
