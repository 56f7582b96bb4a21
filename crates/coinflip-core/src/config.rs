use std::path::{Path, PathBuf};

use chain_sol::{Commitment, DEVNET_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Chain;

/// Session settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Solana JSON-RPC endpoint used for balance lookups.
    pub solana_rpc_url: String,
    pub solana_commitment: Commitment,
    /// Chain preselected in the picker when the session starts.
    pub initial_chain: Chain,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            solana_rpc_url: DEVNET_URL.to_string(),
            solana_commitment: Commitment::Confirmed,
            initial_chain: Chain::Solana,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
