use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;

use crate::errors::BridgeError;
use crate::models::api_response::success_response;
use crate::models::transfer::{Direction, TransferBody, TransferRequest};
use crate::services::transfer_registry::TransferRegistry;

fn accept(
    registry: &TransferRegistry,
    body: TransferBody,
    direction: Direction,
) -> Result<HttpResponse, BridgeError> {
    let request = TransferRequest::from_body(body, direction)?;
    let transfer = registry.record(&request)?;
    Ok(success_response(transfer))
}

#[post("/bridge/ethtobsc")]
async fn eth_to_bsc(
    registry: web::Data<TransferRegistry>,
    body: web::Json<TransferBody>,
) -> Result<HttpResponse, BridgeError> {
    accept(&registry, body.into_inner(), Direction::EthToBsc)
}

#[post("/bridge/bsctoeth")]
async fn bsc_to_eth(
    registry: web::Data<TransferRegistry>,
    body: web::Json<TransferBody>,
) -> Result<HttpResponse, BridgeError> {
    accept(&registry, body.into_inner(), Direction::BscToEth)
}

#[get("/bridge/transfers/{id}")]
async fn get_transfer(
    registry: web::Data<TransferRegistry>,
    id: web::Path<String>,
) -> Result<HttpResponse, BridgeError> {
    let id = Uuid::parse_str(&id).map_err(|_| BridgeError::NotFoundError)?;
    Ok(success_response(registry.get(&id)?))
}
