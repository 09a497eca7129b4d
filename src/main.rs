use actix_web::{
    middleware::{self, Logger},
    App, HttpServer,
};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::info;

use cat_registry::{api, bootstrap, config, logging};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install().wrap_err("Failed to initialize error reporting")?;

    dotenv().ok();
    logging::setup_logging();

    let config = config::ServerConfig::from_env();
    let app_state = bootstrap::initialize_app_state(&config).await?;

    info!("Starting server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(api::routes::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .wrap_err_with(|| format!("Failed to bind server to {}:{}", config.host, config.port))?
    .shutdown_timeout(5)
    .run()
    .await
    .wrap_err("Server runtime error")
}
