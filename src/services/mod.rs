pub mod bridge_client;
pub mod transfer_registry;
pub mod transport;
pub mod units;
pub mod wallet_adapter;
pub mod wallet_provider;
