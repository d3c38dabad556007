use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::errors::BridgeError;
use crate::models::bridge_transfer::{BridgeTransfer, TransferStatus};
use crate::models::transfer::TransferRequest;
use crate::services::units::{to_base_units, TOKEN_DECIMALS};

/// Transfers kept before the oldest ones are evicted.
pub const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Default)]
struct Entries {
    by_id: HashMap<Uuid, BridgeTransfer>,
    order: VecDeque<Uuid>,
}

/// In-memory record of transfers the bridge API accepted.
///
/// Nothing is persisted. Once `capacity` transfers are held, recording a
/// new one evicts the oldest.
pub struct TransferRegistry {
    entries: Mutex<Entries>,
    capacity: usize,
}

impl Default for TransferRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl TransferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            capacity: capacity.max(1),
        }
    }

    /// Records a validated request as `Pending`.
    pub fn record(&self, request: &TransferRequest) -> Result<BridgeTransfer, BridgeError> {
        let transfer = BridgeTransfer {
            id: Uuid::new_v4(),
            from: request.from().trim().to_string(),
            to: request.to().trim().to_string(),
            amount: request.amount().trim().to_string(),
            amount_base_units: to_base_units(request.amount(), TOKEN_DECIMALS)?,
            direction: request.direction(),
            timestamp: Utc::now(),
            status: TransferStatus::Pending,
        };

        info!(
            "accepted {} transfer {} of {} to {}",
            transfer.direction, transfer.id, transfer.amount, transfer.to
        );

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        while entries.order.len() >= self.capacity {
            match entries.order.pop_front() {
                Some(oldest) => {
                    entries.by_id.remove(&oldest);
                }
                None => break,
            }
        }
        entries.order.push_back(transfer.id);
        entries.by_id.insert(transfer.id, transfer.clone());
        Ok(transfer)
    }

    pub fn get(&self, id: &Uuid) -> Result<BridgeTransfer, BridgeError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .get(id)
            .cloned()
            .ok_or(BridgeError::NotFoundError)
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
