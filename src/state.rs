use crate::config::Config;
use crate::db::Db;

/// Shared state handed to every request handler.
pub struct AppState {
    pub db: Db,
    pub score_ceiling: i64,
    pub admin_secret: Option<String>,
}

impl AppState {
    pub fn new(db: Db, config: &Config) -> Self {
        AppState {
            db,
            score_ceiling: config.score_ceiling,
            admin_secret: config.admin_secret.clone(),
        }
    }
}
