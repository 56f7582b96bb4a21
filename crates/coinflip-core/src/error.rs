use chain_eth::EthError;
use chain_sol::SolError;
use thiserror::Error;

use crate::types::Chain;

/// Everything a session handler can fail with. Each variant is something the
/// player can recover from: install the wallet, retry, or fix the bet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(
        "{} wallet not installed. Please install {}.",
        .chain.family().wallet_name(),
        .chain.family().wallet_name()
    )]
    ProviderMissing { chain: Chain },

    #[error("Failed to connect {chain} wallet: {reason}")]
    ConnectionFailed { chain: Chain, reason: String },

    #[error("invalid bet: {0}")]
    InvalidBet(#[from] BetRejection),
}

/// Why a bet was refused before the coin was flipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetRejection {
    #[error("non-positive amount")]
    NonPositive,

    #[error("amount `{0}` is not a number")]
    Malformed(String),

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("no side chosen")]
    NoSideChosen,
}

/// Failure reported by an injected wallet or an RPC endpoint.
///
/// `code` carries the EIP-1193 / JSON-RPC error code when the provider
/// supplied one (4001 is a user rejection).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", .code.map(|c| format!(" (code {c})")).unwrap_or_default())]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }
}

impl From<SolError> for ProviderError {
    fn from(e: SolError) -> Self {
        match e {
            SolError::Rpc { code, message } => ProviderError::with_code(code, message),
            other => ProviderError::new(other.to_string()),
        }
    }
}

impl From<EthError> for ProviderError {
    fn from(e: EthError) -> Self {
        ProviderError::new(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chain `{0}`; expected solana, ethereum or polygon")]
pub struct UnknownChain(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown side `{0}`; expected heads or tails")]
pub struct UnknownSide(pub String);
