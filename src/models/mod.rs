pub mod api_response;
pub mod bridge_transfer;
pub mod status;
pub mod transfer;
pub mod wallet;
