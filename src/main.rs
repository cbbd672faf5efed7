use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use egalitarian_allocation::api::{self, AppState};
use egalitarian_allocation::config::ServerConfig;

// ---------- Server bootstrap ----------
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();

    // Sentry has to be up before the actix runtime starts
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    actix_web::rt::System::new().block_on(run(config))
}

async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState::from(&config));
    let json_limit = config.json_limit;

    info!(
        "Starting server on http://127.0.0.1:{} (default solver: {})",
        config.port, config.default_solver
    );
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(sentry_actix::Sentry::new())
            .app_data(state.clone())
            .app_data(api::json_config(json_limit))
            .app_data(api::query_config())
            .configure(api::configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
