use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

const DEFAULT_URL: &str = "sqlite://tasks.db?mode=rwc";

/// Connect using `config.toml` when present, falling back to `DATABASE_URL`
/// and finally to a local on-disk database.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    cfg.normalize_from_env();
    if cfg.url.trim().is_empty() {
        cfg.url = DEFAULT_URL.to_string();
    }
    cfg.validate()?;
    connect_with(&cfg).await
}

/// Connect to the URL in `cfg`, applying its pool settings.
pub async fn connect_with(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}
