//! Solana chain support for the coinflip session.
//!
//! This crate covers the read-only slice of Solana the session needs:
//! validating the base58 public key a wallet hands back, turning lamports
//! into the two-decimal SOL string shown to the player, and querying a
//! balance over JSON-RPC. There is no `solana-client` dependency; the single
//! `getBalance` call is made with `reqwest` directly.

pub mod address;
pub mod error;
pub mod rpc;
pub mod units;

// Re-export key public types for ergonomic imports.
pub use address::{address_to_bytes, validate_address};
pub use error::SolError;
pub use rpc::{Commitment, RpcClient, DEVNET_URL};
pub use units::{format_sol, LAMPORTS_PER_SOL, SOL_DECIMALS};
