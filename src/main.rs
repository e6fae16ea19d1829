use actix_web::{middleware::Logger, web, App, HttpServer};

use coursegen_server::{app_state::AppState, auth::RequireLogin, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let default_filter = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if std::env::var("SECRET_KEY").is_err() {
        log::warn!("SECRET_KEY is not set; sessions will not survive a restart");
    }

    log::info!("CORS allowed origins: {:?}", config.allowed_origins());

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting HTTP server on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(RequireLogin)
            .wrap(handlers::cors(&state.config))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
