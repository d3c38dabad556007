use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::errors::BridgeError;

const CHANGE_CAPACITY: usize = 16;

/// Source of wallet accounts, modelled on the EIP-1193 provider methods.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// `eth_requestAccounts`: may prompt the user.
    async fn request_accounts(&self) -> Result<Vec<String>, BridgeError>;

    /// `eth_accounts`: already authorised accounts, never prompts.
    async fn accounts(&self) -> Result<Vec<String>, BridgeError>;

    /// Stream of `accountsChanged` notifications.
    fn account_changes(&self) -> broadcast::Receiver<Vec<String>>;
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Vec<String>>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Wallet provider reached over JSON-RPC/HTTP, e.g. a local dev node or wallet daemon.
pub struct JsonRpcProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
    changes: broadcast::Sender<Vec<String>>,
}

impl JsonRpcProvider {
    pub fn new(url: impl Into<String>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
            changes,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str) -> Result<Vec<String>, BridgeError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params: Vec::new(),
        };
        debug!("wallet rpc {} -> {}", method, self.url);

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| BridgeError::Provider(e.to_string()))?
            .json()
            .await
            .map_err(|e| BridgeError::Provider(e.to_string()))?;

        if let Some(error) = response.error {
            debug!("wallet rpc {} failed with code {}", method, error.code);
            return Err(BridgeError::Provider(error.message));
        }
        Ok(response.result.unwrap_or_default())
    }

    /// Polls `eth_accounts` and broadcasts the list whenever it differs from the last poll.
    ///
    /// The first successful poll only sets the baseline.
    pub fn spawn_account_poller(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let provider = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut last: Option<Vec<String>> = None;
            loop {
                ticker.tick().await;
                match provider.accounts().await {
                    Ok(accounts) => {
                        if last.as_ref() == Some(&accounts) {
                            continue;
                        }
                        if last.is_some() {
                            debug!("accounts changed: {:?}", accounts);
                            // no subscribers is fine
                            let _ = provider.changes.send(accounts.clone());
                        }
                        last = Some(accounts);
                    }
                    Err(err) => warn!("polling wallet accounts failed: {}", err),
                }
            }
        })
    }
}

#[async_trait]
impl WalletProvider for JsonRpcProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, BridgeError> {
        self.call("eth_requestAccounts").await
    }

    async fn accounts(&self) -> Result<Vec<String>, BridgeError> {
        self.call("eth_accounts").await
    }

    fn account_changes(&self) -> broadcast::Receiver<Vec<String>> {
        self.changes.subscribe()
    }
}
