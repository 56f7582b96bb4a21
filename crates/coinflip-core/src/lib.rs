//! Wallet and wager session for a multi-chain coin flip.
//!
//! A [`SessionController`] owns the selected chain, the connected wallet's
//! address and balance, and the bet form. Wallets are reached through the
//! provider traits in [`provider`]; the flip is resolved locally and only
//! ever changes the displayed balance.

pub mod config;
pub mod controller;
pub mod error;
pub mod provider;
pub mod session;
pub mod types;
pub mod wager;

pub use config::{ConfigError, SessionConfig};
pub use controller::SessionController;
pub use error::{BetRejection, ProviderError, SessionError};
pub use provider::{Eip1193, SolanaRpc, SolanaWallet, WalletEnvironment};
pub use session::{Message, MessageKind, Session, SessionView, SIMULATED_LABEL};
pub use types::{Balance, Chain, Side};
pub use wager::{Coin, FlipOutcome, RandomCoin};

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `info`).
/// Does nothing if a subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
