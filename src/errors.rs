use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::api_response::ApiResponse;
use crate::models::status::{
    Status, ADDRESS_MISSING, AMOUNT_INVALID, AMOUNT_MISSING, DIRECTION_INVALID, TRANSFER_FAILED,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("No wallet provider available")]
    ProviderMissing,

    #[error("{0}")]
    Provider(String),

    #[error("Receiver address is empty")]
    MissingAddress,

    #[error("Amount is empty")]
    MissingAmount,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown transfer direction: {0}")]
    UnknownDirection(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Bridge API responded with HTTP {0}")]
    HttpStatus(u16),

    #[error("Resource not found")]
    NotFoundError,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BridgeError {
    /// Validation failures are caught before anything leaves the process.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BridgeError::MissingAddress
                | BridgeError::MissingAmount
                | BridgeError::InvalidAmount(_)
                | BridgeError::UnknownDirection(_)
                | BridgeError::InvalidBody(_)
        )
    }

    /// The message a user sees for this failure.
    pub fn status(&self) -> Status {
        match self {
            BridgeError::ProviderMissing => Status::install_wallet(),
            BridgeError::Provider(message) => Status::plain(format!("😥 {}", message)),
            BridgeError::MissingAddress => Status::plain(ADDRESS_MISSING),
            BridgeError::MissingAmount => Status::plain(AMOUNT_MISSING),
            BridgeError::InvalidAmount(_) => Status::plain(AMOUNT_INVALID),
            BridgeError::UnknownDirection(_) => Status::plain(DIRECTION_INVALID),
            // transport failures are not told apart
            BridgeError::Transport(_) | BridgeError::HttpStatus(_) => Status::plain(TRANSFER_FAILED),
            BridgeError::InvalidBody(_) | BridgeError::NotFoundError | BridgeError::Config(_) => {
                Status::plain(self.to_string())
            }
        }
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => BridgeError::HttpStatus(status.as_u16()),
            None => BridgeError::Transport(err.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

impl ResponseError for BridgeError {
    fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::MissingAddress
            | BridgeError::MissingAmount
            | BridgeError::InvalidAmount(_)
            | BridgeError::UnknownDirection(_)
            | BridgeError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            BridgeError::NotFoundError => StatusCode::NOT_FOUND,
            BridgeError::ProviderMissing
            | BridgeError::Provider(_)
            | BridgeError::Transport(_)
            | BridgeError::HttpStatus(_) => StatusCode::BAD_GATEWAY,
            BridgeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        let response = ApiResponse {
            status: "FAILURE".to_string(),
            code: code.as_u16(),
            result: None::<()>,
            error: Some(ApiError {
                code: code.as_u16(),
                message: self.to_string(),
            }),
        };

        HttpResponse::build(code).json(response)
    }
}
