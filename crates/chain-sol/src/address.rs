//! Solana address validation.
//!
//! A Solana address is the base58 encoding of a raw 32-byte Ed25519 public
//! key. Wallets hand the key back already encoded, so all the session needs
//! is to check that what it received decodes to exactly 32 bytes before it
//! is used in an RPC call or shown to the player.

use crate::error::SolError;

/// Decode a Solana address string to its 32-byte representation.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], SolError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| SolError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    bytes.try_into().map_err(|v: Vec<u8>| {
        SolError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })
}

/// Validate a Solana address string, returning it unchanged on success.
pub fn validate_address(address: &str) -> Result<&str, SolError> {
    if address.is_empty() {
        return Err(SolError::InvalidAddress("address is empty".into()));
    }
    address_to_bytes(address)?;
    Ok(address)
}
