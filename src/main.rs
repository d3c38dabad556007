use std::io;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use unicoin_bridge::api;
use unicoin_bridge::config::Config;
use unicoin_bridge::services::transfer_registry::TransferRegistry;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config =
        Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let registry = web::Data::new(TransferRegistry::new());
    let origins = config.cors_origins.clone();

    info!(
        "bridge API listening on {}:{}",
        config.bind_address, config.port
    );

    HttpServer::new(move || {
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ])
            .supports_credentials();
        App::new()
            .app_data(registry.clone())
            .configure(api::config)
            .wrap(cors)
            .wrap(Logger::default())
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
