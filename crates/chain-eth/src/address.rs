use std::str::FromStr;

use alloy_primitives::Address;

use crate::error::EthError;

/// Parses a 0x-prefixed Ethereum address.
///
/// All-lowercase and all-uppercase addresses carry no checksum and are
/// accepted as-is. Mixed-case addresses must satisfy EIP-55.
pub fn parse_address(address: &str) -> Result<Address, EthError> {
    let Some(hex_part) = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    else {
        return Err(EthError::InvalidAddress("address must start with 0x".into()));
    };

    if hex_part.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());

    let parsed = if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{hex_part}"), None)
            .map_err(|e| EthError::InvalidAddress(format!("EIP-55 checksum mismatch: {e}")))?
    } else {
        Address::from_str(hex_part)
            .map_err(|e| EthError::InvalidAddress(format!("not a hex address: {e}")))?
    };

    Ok(parsed)
}

/// Returns the EIP-55 checksummed form of `address`.
pub fn checksum_address(address: &str) -> Result<String, EthError> {
    Ok(parse_address(address)?.to_checksum(None))
}
