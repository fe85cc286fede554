use sea_orm::DatabaseConnection;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub templates: Tera,
}
