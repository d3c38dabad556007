use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::BridgeError;

mod handlers;

// malformed bodies get the same FAILURE envelope as validation errors
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    BridgeError::InvalidBody(err.to_string()).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .service(handlers::eth_to_bsc)
            .service(handlers::bsc_to_eth)
            .service(handlers::get_transfer),
    );
}
