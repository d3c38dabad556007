use std::sync::Arc;

use log::{info, warn};

use crate::errors::BridgeError;
use crate::models::transfer::{TransferRequest, TransferResult};
use crate::services::transport::{BridgeTransport, HttpTransport};

/// Validates bridge transfer input and submits it to the bridge API.
#[derive(Clone)]
pub struct BridgeClient {
    transport: Arc<dyn BridgeTransport>,
}

impl BridgeClient {
    pub fn new(transport: Arc<dyn BridgeTransport>) -> Self {
        Self { transport }
    }

    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url)))
    }

    /// Validates raw form fields and, if they pass, sends one request.
    ///
    /// Never fails: every problem ends up in the returned status.
    pub async fn bridge_transfer(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        direction: &str,
    ) -> TransferResult {
        match TransferRequest::new(from, to, amount, direction) {
            Ok(request) => self.transfer(&request).await,
            Err(err) => {
                info!("transfer rejected before sending: {}", err);
                TransferResult::failed(&err)
            }
        }
    }

    pub async fn transfer(&self, request: &TransferRequest) -> TransferResult {
        match self.submit(request).await {
            Ok(()) => TransferResult::finished(),
            Err(err) => {
                warn!("bridge transfer {} failed: {}", request.direction(), err);
                TransferResult::failed(&err)
            }
        }
    }

    async fn submit(&self, request: &TransferRequest) -> Result<(), BridgeError> {
        info!(
            "bridging {} from {} to {} ({})",
            request.amount(),
            request.from(),
            request.to(),
            request.direction()
        );
        self.transport
            .post_transfer(request.direction().path(), &request.body())
            .await
    }
}
