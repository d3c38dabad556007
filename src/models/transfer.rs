use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BridgeError;
use crate::models::status::{Status, TRANSFER_FINISHED};

pub const ETH_TO_BSC_PATH: &str = "/api/v1/bridge/ethtobsc";
pub const BSC_TO_ETH_PATH: &str = "/api/v1/bridge/bsctoeth";

/// Which way tokens cross the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    EthToBsc,
    BscToEth,
}

impl Direction {
    /// Endpoint path on the bridge API, relative to the base url.
    pub fn path(self) -> &'static str {
        match self {
            Direction::EthToBsc => ETH_TO_BSC_PATH,
            Direction::BscToEth => BSC_TO_ETH_PATH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::EthToBsc => "ethToBsc",
            Direction::BscToEth => "bscToEth",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = BridgeError;

    /// Accepts `ethToBsc`, `eth-to-bsc`, `ETH_TO_BSC` and the reverse forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "ethtobsc" => Ok(Direction::EthToBsc),
            "bsctoeth" => Ok(Direction::BscToEth),
            _ => Err(BridgeError::UnknownDirection(s.to_string())),
        }
    }
}

/// JSON body posted to the bridge API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferBody {
    pub from: String,
    pub to: String,
    pub amount: String,
}

/// A transfer that passed input validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    from: String,
    to: String,
    amount: String,
    direction: Direction,
}

impl TransferRequest {
    /// Validates raw form input. Checks run in a fixed order: receiver,
    /// amount presence, amount format, then direction.
    pub fn new(from: &str, to: &str, amount: &str, direction: &str) -> Result<Self, BridgeError> {
        validate_fields(to, amount)?;
        let direction = direction.parse::<Direction>()?;

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            amount: amount.to_string(),
            direction,
        })
    }

    /// Validates a body that already arrived with a known direction.
    pub fn from_body(body: TransferBody, direction: Direction) -> Result<Self, BridgeError> {
        validate_fields(&body.to, &body.amount)?;

        Ok(Self {
            from: body.from,
            to: body.to,
            amount: body.amount,
            direction,
        })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn body(&self) -> TransferBody {
        TransferBody {
            from: self.from.clone(),
            to: self.to.clone(),
            amount: self.amount.clone(),
        }
    }
}

fn validate_fields(to: &str, amount: &str) -> Result<(), BridgeError> {
    if to.trim().is_empty() {
        return Err(BridgeError::MissingAddress);
    }

    let amount = amount.trim();
    if amount.is_empty() {
        return Err(BridgeError::MissingAmount);
    }

    match amount.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(()),
        _ => Err(BridgeError::InvalidAmount(amount.to_string())),
    }
}

/// Outcome of one bridge transfer attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub success: bool,
    pub status: Status,
}

impl TransferResult {
    pub fn finished() -> Self {
        Self {
            success: true,
            status: Status::plain(TRANSFER_FINISHED),
        }
    }

    pub fn failed(err: &BridgeError) -> Self {
        Self {
            success: false,
            status: err.status(),
        }
    }
}
