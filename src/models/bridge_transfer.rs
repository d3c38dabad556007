use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::transfer::Direction;

/// A transfer accepted by the bridge API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeTransfer {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub amount: String,
    /// `amount` scaled to 18 decimal base units.
    pub amount_base_units: String,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    pub status: TransferStatus,
}

/// Settlement happens outside this service, so accepted transfers stay `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    Pending,
}
