//! Wallet providers.
//!
//! A browser exposes wallets as injected objects: a Solana object (Phantom)
//! with a detection flag and `connect()`, and an EIP-1193 object (MetaMask)
//! with a generic `request()`. The traits below describe those objects; a
//! host (a wasm front-end, a test) implements them and hands them to the
//! session through a [`WalletEnvironment`].
//!
//! Provider calls are `?Send`: injected objects live on the page's single
//! thread.

use alloy_primitives::U256;
use async_trait::async_trait;
use chain_eth::address::checksum_address;
use chain_eth::chains::{get_chain, EvmChain};
use chain_eth::rpc::{
    balance_params, decode_accounts, decode_chain_id, decode_quantity, ETH_CHAIN_ID,
    ETH_GET_BALANCE, ETH_REQUEST_ACCOUNTS,
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{ProviderError, SessionError};
use crate::types::Chain;

/// The injected Solana wallet object.
#[async_trait(?Send)]
pub trait SolanaWallet {
    /// Detection flag set by the Phantom extension.
    fn is_phantom(&self) -> bool;

    /// Asks the user to approve the site; resolves to the base58 public key.
    async fn connect(&self) -> Result<String, ProviderError>;
}

/// Balance lookups against a Solana cluster.
#[async_trait(?Send)]
pub trait SolanaRpc {
    async fn get_balance(&self, address: &str) -> Result<u64, ProviderError>;
}

/// An EIP-1193 provider object.
#[async_trait(?Send)]
pub trait Eip1193 {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

#[async_trait(?Send)]
impl SolanaRpc for chain_sol::RpcClient {
    async fn get_balance(&self, address: &str) -> Result<u64, ProviderError> {
        Ok(chain_sol::RpcClient::get_balance(self, address).await?)
    }
}

/// What the page offers: whichever wallet objects were injected, plus the
/// Solana RPC endpoint balances are read from.
pub struct WalletEnvironment {
    solana: Option<Box<dyn SolanaWallet>>,
    ethereum: Option<Box<dyn Eip1193>>,
    solana_rpc: Box<dyn SolanaRpc>,
}

impl WalletEnvironment {
    /// An environment with no injected wallets.
    pub fn new(solana_rpc: impl SolanaRpc + 'static) -> Self {
        Self {
            solana: None,
            ethereum: None,
            solana_rpc: Box::new(solana_rpc),
        }
    }

    /// An environment whose Solana balances come from the configured cluster.
    pub fn from_config(config: &SessionConfig) -> Result<Self, ProviderError> {
        let rpc = chain_sol::RpcClient::new(&config.solana_rpc_url, config.solana_commitment)?;
        Ok(Self::new(rpc))
    }

    pub fn with_solana_wallet(mut self, wallet: impl SolanaWallet + 'static) -> Self {
        self.solana = Some(Box::new(wallet));
        self
    }

    pub fn with_ethereum(mut self, provider: impl Eip1193 + 'static) -> Self {
        self.ethereum = Some(Box::new(provider));
        self
    }
}

/// Result of a successful handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub address: String,
    /// Balance in the chain's smallest unit.
    pub balance: U256,
}

/// The connection procedure for one chain.
pub enum WalletProvider<'a> {
    Solana(SolanaProvider<'a>),
    Evm(EvmProvider<'a>),
}

impl<'a> WalletProvider<'a> {
    /// Picks the provider for `chain`, failing with `ProviderMissing` when the
    /// page lacks the matching wallet object.
    pub fn for_chain(chain: Chain, env: &'a WalletEnvironment) -> Result<Self, SessionError> {
        let missing = SessionError::ProviderMissing { chain };
        match chain.evm() {
            None => {
                let wallet = env
                    .solana
                    .as_deref()
                    .filter(|w| w.is_phantom())
                    .ok_or(missing)?;
                Ok(WalletProvider::Solana(SolanaProvider {
                    wallet,
                    rpc: env.solana_rpc.as_ref(),
                }))
            }
            Some(network) => {
                let ethereum = env.ethereum.as_deref().ok_or(missing)?;
                Ok(WalletProvider::Evm(EvmProvider {
                    chain,
                    network,
                    ethereum,
                }))
            }
        }
    }

    pub fn chain(&self) -> Chain {
        match self {
            WalletProvider::Solana(_) => Chain::Solana,
            WalletProvider::Evm(p) => p.chain,
        }
    }

    pub async fn connect(&self) -> Result<Connection, SessionError> {
        let result = match self {
            WalletProvider::Solana(p) => p.connect().await,
            WalletProvider::Evm(p) => p.connect().await,
        };
        result.map_err(|e| SessionError::ConnectionFailed {
            chain: self.chain(),
            reason: e.to_string(),
        })
    }
}

pub struct SolanaProvider<'a> {
    wallet: &'a dyn SolanaWallet,
    rpc: &'a dyn SolanaRpc,
}

impl SolanaProvider<'_> {
    pub async fn connect(&self) -> Result<Connection, ProviderError> {
        let address = self.wallet.connect().await?;
        chain_sol::validate_address(&address)?;
        let lamports = self.rpc.get_balance(&address).await?;
        Ok(Connection {
            address,
            balance: U256::from(lamports),
        })
    }
}

pub struct EvmProvider<'a> {
    chain: Chain,
    network: &'static EvmChain,
    ethereum: &'a dyn Eip1193,
}

impl EvmProvider<'_> {
    pub async fn connect(&self) -> Result<Connection, ProviderError> {
        let address = self.signer_address().await?;
        self.check_network().await;
        let balance = self.get_balance(&address).await?;
        Ok(Connection { address, balance })
    }

    /// Requests account access and returns the first authorised account,
    /// EIP-55 checksummed.
    pub async fn signer_address(&self) -> Result<String, ProviderError> {
        let accounts = decode_accounts(self.ethereum.request(ETH_REQUEST_ACCOUNTS, json!([])).await?)?;
        let first = accounts
            .first()
            .ok_or_else(|| ProviderError::new("wallet returned no accounts"))?;
        Ok(checksum_address(first)?)
    }

    pub async fn get_balance(&self, address: &str) -> Result<U256, ProviderError> {
        let value = self
            .ethereum
            .request(ETH_GET_BALANCE, balance_params(address))
            .await?;
        Ok(decode_quantity(&value)?)
    }

    /// The session never switches the wallet's network; a mismatch is only
    /// logged.
    async fn check_network(&self) {
        let reported = match self.ethereum.request(ETH_CHAIN_ID, json!([])).await {
            Ok(value) => decode_chain_id(&value).map_err(ProviderError::from),
            Err(e) => Err(e),
        };
        match reported {
            Ok(id) if id == self.network.chain_id => {}
            Ok(id) => warn!(
                chain = %self.chain,
                expected = self.network.chain_id,
                actual = id,
                wallet_network = get_chain(id).map_or("unknown", |c| c.name),
                "wallet is on a different network than the selected chain"
            ),
            Err(err) => debug!(chain = %self.chain, %err, "could not read wallet chain id"),
        }
    }
}
