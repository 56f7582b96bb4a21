//! EIP-1193 request names and response decoding.
//!
//! Injected providers answer `request({ method, params })` with plain JSON.
//! Quantities come back as 0x-prefixed hex strings without leading zeros
//! (`"0x0"`, `"0x14d1120d7b160000"`), accounts as an array of addresses.

use alloy_primitives::U256;
use serde_json::{json, Value};

use crate::error::EthError;

pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const ETH_GET_BALANCE: &str = "eth_getBalance";
pub const ETH_CHAIN_ID: &str = "eth_chainId";

/// Params for `eth_getBalance` at the latest block.
pub fn balance_params(address: &str) -> Value {
    json!([address, "latest"])
}

/// Decodes a hex quantity into a `U256`.
pub fn decode_quantity(value: &Value) -> Result<U256, EthError> {
    let text = value
        .as_str()
        .ok_or_else(|| EthError::InvalidQuantity(format!("expected a string, got {value}")))?;
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| EthError::InvalidQuantity(format!("missing 0x prefix: {text}")))?;
    if digits.is_empty() {
        return Err(EthError::InvalidQuantity("no digits after 0x".into()));
    }
    U256::from_str_radix(digits, 16).map_err(|e| EthError::InvalidQuantity(format!("{text}: {e}")))
}

/// Decodes an `eth_chainId` answer.
pub fn decode_chain_id(value: &Value) -> Result<u64, EthError> {
    let id = decode_quantity(value)?;
    u64::try_from(id).map_err(|_| EthError::InvalidQuantity(format!("chain id out of range: {id}")))
}

/// Decodes an `eth_requestAccounts` answer into address strings.
pub fn decode_accounts(value: Value) -> Result<Vec<String>, EthError> {
    serde_json::from_value(value).map_err(|e| EthError::UnexpectedResponse(e.to_string()))
}
