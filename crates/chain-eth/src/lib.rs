//! Ethereum/EVM chain support for the coinflip session.
//!
//! This crate provides:
//! - The EVM network table the session can select (Ethereum, Polygon)
//! - EIP-55 address validation and checksumming
//! - Exact wei <-> display-unit conversion
//! - EIP-1193 method names and decoding of the values injected providers return

pub mod address;
pub mod chains;
pub mod error;
pub mod rpc;
pub mod units;

pub use error::EthError;
