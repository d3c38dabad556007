use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::errors::BridgeError;

/// Decimals of the bridged ERC20 token on both chains.
pub const TOKEN_DECIMALS: u32 = 18;

fn power_of_ten(decimals: u32) -> BigDecimal {
    // "1e<n>" always parses
    BigDecimal::from_str(&format!("1e{}", decimals)).unwrap_or_else(|_| BigDecimal::from(1))
}

/// Converts a decimal token amount into integer base units (wei for 18 decimals).
pub fn to_base_units(amount: &str, decimals: u32) -> Result<String, BridgeError> {
    let value = BigDecimal::from_str(amount.trim())
        .map_err(|_| BridgeError::InvalidAmount(amount.to_string()))?;

    if value < BigDecimal::from(0) {
        return Err(BridgeError::InvalidAmount(amount.to_string()));
    }

    let (_, scale) = value.normalized().as_bigint_and_exponent();
    if scale > i64::from(decimals) {
        return Err(BridgeError::InvalidAmount(format!(
            "{} has more than {} decimal places",
            amount, decimals
        )));
    }

    Ok((value * power_of_ten(decimals)).with_scale(0).to_string())
}

/// Formats integer base units as a token amount with `fixed` decimal places, truncating.
pub fn from_base_units(units: &str, decimals: u32, fixed: i64) -> Result<String, BridgeError> {
    let value = BigDecimal::from_str(units.trim())
        .map_err(|_| BridgeError::InvalidAmount(units.to_string()))?;

    Ok((value / power_of_ten(decimals)).with_scale(fixed).to_string())
}
