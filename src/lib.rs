//! Client and server halves of the UNICOIN ETH <-> BSC bridge transfer API.
//!
//! - [`services::bridge_client`] validates transfer input and posts it to the bridge API
//! - [`services::wallet_adapter`] reads the active account from a wallet provider
//! - [`api`] serves the bridge endpoints with actix-web

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::Config;
pub use errors::BridgeError;
pub use models::status::Status;
pub use models::transfer::{Direction, TransferBody, TransferRequest, TransferResult};
pub use models::wallet::WalletState;
pub use services::bridge_client::BridgeClient;
pub use services::transport::{BridgeTransport, HttpTransport};
pub use services::wallet_adapter::{AccountSubscription, WalletAdapter};
pub use services::wallet_provider::{JsonRpcProvider, WalletProvider};
