use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use chain_eth::chains::{EvmChain, ETHEREUM, POLYGON};
use serde::{Deserialize, Serialize};

use crate::error::{UnknownChain, UnknownSide};

/// Networks the player can pick from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Solana,
    Ethereum,
    Polygon,
}

impl Chain {
    pub const ALL: [Chain; 3] = [Chain::Solana, Chain::Ethereum, Chain::Polygon];

    /// Identifier used by the chain picker (`"solana"`, `"ethereum"`, `"polygon"`).
    pub fn id(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Chain::Solana => "Solana",
            Chain::Ethereum => "Ethereum",
            Chain::Polygon => "Polygon",
        }
    }

    /// Native token symbol
    pub fn symbol(&self) -> &'static str {
        match self.evm() {
            Some(evm) => evm.symbol,
            None => "SOL",
        }
    }

    /// Decimal places between the smallest unit and the display unit.
    pub fn decimals(&self) -> u8 {
        match self.evm() {
            Some(evm) => evm.decimals,
            None => chain_sol::SOL_DECIMALS,
        }
    }

    /// Which kind of injected wallet this chain connects through.
    pub fn family(&self) -> WalletFamily {
        match self {
            Chain::Solana => WalletFamily::Solana,
            Chain::Ethereum | Chain::Polygon => WalletFamily::Evm,
        }
    }

    /// EVM network definition, `None` for Solana.
    pub fn evm(&self) -> Option<&'static EvmChain> {
        match self {
            Chain::Solana => None,
            Chain::Ethereum => Some(&ETHEREUM),
            Chain::Polygon => Some(&POLYGON),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Chain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| UnknownChain(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletFamily {
    Solana,
    Evm,
}

impl WalletFamily {
    /// The browser extension the player is asked to install.
    pub fn wallet_name(&self) -> &'static str {
        match self {
            WalletFamily::Solana => "Phantom",
            WalletFamily::Evm => "MetaMask",
        }
    }
}

/// A face of the coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Heads,
    Tails,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Heads => "heads",
            Side::Tails => "tails",
        })
    }
}

impl FromStr for Side {
    type Err = UnknownSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heads" => Ok(Side::Heads),
            "tails" => Ok(Side::Tails),
            other => Err(UnknownSide(other.to_string())),
        }
    }
}

/// Balance held in the chain's smallest unit (lamports or wei).
///
/// Rendering to SOL/ETH/MATIC happens only in `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    chain: Chain,
    raw: U256,
    simulated: bool,
}

impl Balance {
    pub fn new(chain: Chain, raw: U256) -> Self {
        Self {
            chain,
            raw,
            simulated: false,
        }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn raw(&self) -> U256 {
        self.raw
    }

    /// True once a local flip has changed the figure, after which it no
    /// longer matches the wallet's on-chain balance.
    pub fn is_simulated(&self) -> bool {
        self.simulated
    }

    pub fn covers(&self, amount: U256) -> bool {
        amount <= self.raw
    }

    /// Adds a locally simulated payout.
    pub fn credit(&mut self, amount: U256) {
        self.raw = self.raw.saturating_add(amount);
        self.simulated = true;
    }
}

impl fmt::Display for Balance {
    /// Solana renders as `"5.00"`, EVM chains as `"1.5 ETH"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chain.evm() {
            None => f.write_str(&chain_sol::format_sol(self.raw)),
            Some(evm) => match chain_eth::units::format_native(self.raw, evm) {
                Ok(text) => f.write_str(&text),
                Err(_) => write!(f, "{} wei", self.raw),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids_round_trip_through_picker_values() {
        for chain in Chain::ALL {
            assert_eq!(chain.id().parse::<Chain>().unwrap(), chain);
        }
    }

    #[test]
    fn unknown_chain_is_rejected() {
        let err = "bitcoin".parse::<Chain>().unwrap_err();
        assert_eq!(err, UnknownChain("bitcoin".into()));
        assert!("".parse::<Chain>().is_err());
        assert!("Solana".parse::<Chain>().is_err());
    }

    #[test]
    fn symbols_and_decimals() {
        assert_eq!(Chain::Solana.symbol(), "SOL");
        assert_eq!(Chain::Ethereum.symbol(), "ETH");
        assert_eq!(Chain::Polygon.symbol(), "MATIC");
        assert_eq!(Chain::Solana.decimals(), 9);
        assert_eq!(Chain::Polygon.decimals(), 18);
    }

    #[test]
    fn evm_chains_share_a_wallet_family() {
        assert_eq!(Chain::Ethereum.family(), WalletFamily::Evm);
        assert_eq!(Chain::Polygon.family(), WalletFamily::Evm);
        assert_eq!(Chain::Solana.family().wallet_name(), "Phantom");
        assert_eq!(Chain::Polygon.family().wallet_name(), "MetaMask");
    }

    #[test]
    fn chain_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Chain::Polygon).unwrap(), "\"polygon\"");
        assert_eq!(
            serde_json::from_str::<Chain>("\"ethereum\"").unwrap(),
            Chain::Ethereum
        );
    }

    #[test]
    fn side_parsing() {
        assert_eq!("heads".parse::<Side>().unwrap(), Side::Heads);
        assert_eq!("tails".parse::<Side>().unwrap(), Side::Tails);
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn solana_balance_renders_two_decimals() {
        let balance = Balance::new(Chain::Solana, U256::from(5_000_000_000u64));
        assert_eq!(balance.to_string(), "5.00");
    }

    #[test]
    fn solana_balance_past_u64_is_not_capped() {
        let lamports = U256::from(u64::MAX) * U256::from(4u64);
        let balance = Balance::new(Chain::Solana, lamports);
        assert_eq!(balance.to_string(), "73786976294.84");
    }

    #[test]
    fn evm_balance_renders_exact_with_symbol() {
        let wei = U256::from(1_500_000_000_000_000_000u64);
        assert_eq!(Balance::new(Chain::Ethereum, wei).to_string(), "1.5 ETH");
        assert_eq!(Balance::new(Chain::Polygon, wei).to_string(), "1.5 MATIC");
    }

    #[test]
    fn credit_marks_balance_simulated() {
        let mut balance = Balance::new(Chain::Solana, U256::from(1u64));
        assert!(!balance.is_simulated());
        balance.credit(U256::from(2u64));
        assert_eq!(balance.raw(), U256::from(3u64));
        assert!(balance.is_simulated());
    }

    #[test]
    fn covers_is_inclusive() {
        let balance = Balance::new(Chain::Solana, U256::from(10u64));
        assert!(balance.covers(U256::from(10u64)));
        assert!(!balance.covers(U256::from(11u64)));
    }
}
