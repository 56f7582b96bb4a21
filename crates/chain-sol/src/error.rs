use thiserror::Error;

/// Solana chain operation errors.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid rpc url: {0}")]
    InvalidUrl(String),

    #[error("rpc transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed rpc response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for SolError {
    fn from(e: reqwest::Error) -> Self {
        SolError::Transport(e.to_string())
    }
}
