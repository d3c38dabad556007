use async_trait::async_trait;
use log::debug;

use crate::errors::BridgeError;
use crate::models::transfer::TransferBody;

/// Sends a transfer body to one bridge API endpoint.
#[async_trait]
pub trait BridgeTransport: Send + Sync {
    /// Any 2xx response is success. Everything else is an error.
    async fn post_transfer(&self, path: &str, body: &TransferBody) -> Result<(), BridgeError>;
}

/// reqwest-backed transport. No timeout and no retries.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BridgeTransport for HttpTransport {
    async fn post_transfer(&self, path: &str, body: &TransferBody) -> Result<(), BridgeError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} {:?}", url, body);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(json) => debug!("bridge API response: {}", json),
            Err(_) => debug!("bridge API non-JSON response: {}", text),
        }

        Ok(())
    }
}
