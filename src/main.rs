use ntex::web;
use ntex_cors::Cors;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use whack_board::config::Config;
use whack_board::db::Db;
use whack_board::routes;
use whack_board::state::AppState;

#[ntex::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let db = Db::open(&config.db_path).map_err(std::io::Error::other)?;
    let state = Arc::new(AppState::new(db, &config));

    if config.admin_secret.is_none() {
        tracing::warn!("ADMIN_SECRET is not set; admin endpoints will refuse every request");
    }
    tracing::info!(
        db_path = %config.db_path,
        addr = %config.bind_addr(),
        score_ceiling = config.score_ceiling,
        "whack-board server starting"
    );

    web::HttpServer::new(move || {
        web::App::new()
            .state(state.clone())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600)
                    .finish(),
            )
            .configure(routes::configure)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
