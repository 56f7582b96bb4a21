use alloy_primitives::utils::format_units;
use alloy_primitives::U256;

use crate::chains::EvmChain;
use crate::error::EthError;

/// Formats a smallest-unit amount as an exact decimal string.
///
/// Trailing zeros in the fraction are dropped but at least one fractional
/// digit is kept, so 1.5 ETH is `"1.5"` and 2 ETH is `"2.0"`.
pub fn format_exact(amount: U256, decimals: u8) -> Result<String, EthError> {
    let padded =
        format_units(amount, decimals).map_err(|e| EthError::InvalidAmount(e.to_string()))?;
    Ok(trim_fraction(&padded))
}

/// Formats a wei balance for display with the chain's native symbol,
/// e.g. `"1.5 MATIC"`.
pub fn format_native(wei: U256, chain: &EvmChain) -> Result<String, EthError> {
    Ok(format!("{} {}", format_exact(wei, chain.decimals)?, chain.symbol))
}

fn trim_fraction(value: &str) -> String {
    match value.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{value}.0"),
    }
}
