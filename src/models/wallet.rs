use serde::{Deserialize, Serialize};

use crate::models::status::Status;

/// Active wallet account together with the message shown next to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub address: String,
    pub status: Status,
}

impl WalletState {
    pub fn new(address: impl Into<String>, status: Status) -> Self {
        Self {
            address: address.into(),
            status,
        }
    }

    pub fn disconnected(status: Status) -> Self {
        Self::new(String::new(), status)
    }

    pub fn is_connected(&self) -> bool {
        !self.address.is_empty()
    }

    /// `0x5B38...ddC4` style label for a full 42 character address.
    pub fn short_address(&self) -> String {
        let chars: Vec<char> = self.address.chars().collect();
        if chars.len() <= 10 {
            return self.address.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len().min(38).max(6)..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
