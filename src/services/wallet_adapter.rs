use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::errors::BridgeError;
use crate::models::status::{Status, CONNECT_HINT, CONNECT_PROMPT, FILL_FORM};
use crate::models::wallet::WalletState;
use crate::services::wallet_provider::WalletProvider;

/// Reads the active account from an optional wallet provider.
#[derive(Clone, Default)]
pub struct WalletAdapter {
    provider: Option<Arc<dyn WalletProvider>>,
}

impl WalletAdapter {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self { provider }
    }

    pub fn with_provider(provider: Arc<dyn WalletProvider>) -> Self {
        Self::new(Some(provider))
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Asks the provider for account access.
    pub async fn connect(&self) -> WalletState {
        let Some(provider) = &self.provider else {
            return missing_provider();
        };

        match provider.request_accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(address) => {
                    info!("wallet connected: {}", address);
                    WalletState::new(address, Status::plain(CONNECT_PROMPT))
                }
                None => WalletState::disconnected(Status::plain(CONNECT_HINT)),
            },
            Err(err) => rejected(err),
        }
    }

    /// Reads already authorised accounts without prompting.
    pub async fn current_account(&self) -> WalletState {
        let Some(provider) = &self.provider else {
            return missing_provider();
        };

        match provider.accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(address) => WalletState::new(address, Status::plain(FILL_FORM)),
                None => WalletState::disconnected(Status::plain(CONNECT_HINT)),
            },
            Err(err) => rejected(err),
        }
    }

    /// Follows account changes, starting from `initial`.
    ///
    /// Must be called inside a tokio runtime. Listening stops when the
    /// returned subscription is dropped.
    pub fn watch_accounts(&self, initial: WalletState) -> AccountSubscription {
        let Some(provider) = &self.provider else {
            let (_, state) = watch::channel(missing_provider());
            return AccountSubscription { state, task: None };
        };

        let (sender, state) = watch::channel(initial);
        let changes = provider.account_changes();
        let task = tokio::spawn(forward_changes(changes, sender));

        AccountSubscription {
            state,
            task: Some(task),
        }
    }
}

fn missing_provider() -> WalletState {
    WalletState::disconnected(BridgeError::ProviderMissing.status())
}

fn rejected(err: BridgeError) -> WalletState {
    warn!("wallet provider error: {}", err);
    WalletState::disconnected(err.status())
}

/// State shown after an `accountsChanged` notification.
pub fn state_for_accounts(accounts: &[String]) -> WalletState {
    match accounts.first() {
        Some(address) => WalletState::new(address.clone(), Status::plain(CONNECT_PROMPT)),
        None => WalletState::disconnected(Status::plain(CONNECT_HINT)),
    }
}

async fn forward_changes(
    mut changes: broadcast::Receiver<Vec<String>>,
    sender: watch::Sender<WalletState>,
) {
    loop {
        match changes.recv().await {
            Ok(accounts) => {
                if sender.send(state_for_accounts(&accounts)).is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!("skipped {} stale account notifications", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Live view of the wallet state, owned by whoever renders it.
pub struct AccountSubscription {
    state: watch::Receiver<WalletState>,
    task: Option<JoinHandle<()>>,
}

impl AccountSubscription {
    pub fn state(&self) -> WalletState {
        self.state.borrow().clone()
    }

    /// Waits for the next update. `None` once the provider stops notifying.
    pub async fn changed(&mut self) -> Option<WalletState> {
        self.state.changed().await.ok()?;
        Some(self.state())
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops listening and waits for the listener to shut down.
    pub async fn unsubscribe(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }
}

impl Drop for AccountSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
