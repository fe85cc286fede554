use sea_orm::DatabaseConnection;
use tera::Tera;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{config::Config, error::Error};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Parse every template under `templates/` once at startup.
pub fn load_templates() -> Result<Tera, Error> {
    let templates = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))?;

    Ok(templates)
}

/// Cookie-session layer backed by in-process storage. Sessions expire
/// after a week of inactivity and do not survive a restart.
pub fn session_layer() -> SessionManagerLayer<MemoryStore> {
    use tower_sessions::{
        cookie::{time::Duration, SameSite},
        Expiry,
    };

    // Set secure based on build mode: in development (debug) use false, otherwise true.
    let development_mode = cfg!(debug_assertions);
    let secure_cookies = !development_mode;

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)))
}
