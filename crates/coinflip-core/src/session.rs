use serde::Serialize;

use crate::error::SessionError;
use crate::types::{Balance, Chain};
use crate::wager::{FlipOutcome, WagerState};

/// Label shown next to a balance that a flip has changed.
pub const SIMULATED_LABEL: &str = "simulated";

/// Connection state for the current page. Only the controller mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) chain: Option<Chain>,
    pub(crate) address: Option<String>,
    pub(crate) balance: Option<Balance>,
    pub(crate) error: Option<SessionError>,
    pub(crate) connecting: bool,
}

impl Session {
    pub fn new(chain: Chain) -> Self {
        Self {
            chain: Some(chain),
            address: None,
            balance: None,
            error: None,
            connecting: false,
        }
    }

    pub fn chain(&self) -> Option<Chain> {
        self.chain
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn balance(&self) -> Option<&Balance> {
        self.balance.as_ref()
    }

    /// The single visible error; a newer one replaces it.
    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Drops address, balance and error but keeps the chain selection.
    pub(crate) fn clear_wallet(&mut self) {
        self.address = None;
        self.balance = None;
        self.error = None;
    }

    /// Drops everything, chain selection included.
    pub(crate) fn clear(&mut self) {
        self.clear_wallet();
        self.chain = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Chain::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    ProviderMissing,
    ConnectionFailed,
    InvalidBet,
    Win,
    Lose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl From<&SessionError> for Message {
    fn from(err: &SessionError) -> Self {
        let kind = match err {
            SessionError::ProviderMissing { .. } => MessageKind::ProviderMissing,
            SessionError::ConnectionFailed { .. } => MessageKind::ConnectionFailed,
            SessionError::InvalidBet(_) => MessageKind::InvalidBet,
        };
        Message {
            kind,
            text: err.to_string(),
        }
    }
}

impl From<&FlipOutcome> for Message {
    fn from(outcome: &FlipOutcome) -> Self {
        Message {
            kind: if outcome.won() {
                MessageKind::Win
            } else {
                MessageKind::Lose
            },
            text: outcome.to_string(),
        }
    }
}

/// Everything the UI renders, as one serialisable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub chain: Option<Chain>,
    pub address: Option<String>,
    /// `"5.00"` on Solana, `"1.5 ETH"` on EVM chains.
    pub balance: Option<String>,
    /// Full balance line, e.g. `"Balance: 9.00 SOL (simulated)"`.
    pub balance_label: Option<String>,
    pub simulated: bool,
    pub connecting: bool,
    pub bet_amount: String,
    pub error: Option<Message>,
    pub outcome: Option<Message>,
}

impl SessionView {
    pub fn new(session: &Session, wager: &WagerState) -> Self {
        let balance = session.balance();
        Self {
            chain: session.chain(),
            address: session.address.clone(),
            balance: balance.map(|b| b.to_string()),
            balance_label: balance.map(balance_label),
            simulated: balance.is_some_and(|b| b.is_simulated()),
            connecting: session.is_connecting(),
            bet_amount: wager.bet_amount().to_string(),
            error: session.error().map(Message::from),
            outcome: wager.outcome().map(Message::from),
        }
    }
}

fn balance_label(balance: &Balance) -> String {
    let mut label = match balance.chain() {
        // EVM balances already carry their symbol.
        Chain::Solana => format!("Balance: {balance} SOL"),
        Chain::Ethereum | Chain::Polygon => format!("Balance: {balance}"),
    };
    if balance.is_simulated() {
        label.push_str(&format!(" ({SIMULATED_LABEL})"));
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BetRejection;
    use alloy_primitives::U256;

    #[test]
    fn new_session_has_only_a_chain() {
        let session = Session::default();
        assert_eq!(session.chain(), Some(Chain::Solana));
        assert!(session.address().is_none());
        assert!(session.balance().is_none());
        assert!(session.error().is_none());
        assert!(!session.is_connecting());
        assert!(!session.is_connected());
    }

    #[test]
    fn clear_drops_chain_too() {
        let mut session = Session::new(Chain::Polygon);
        session.address = Some("0xabc".into());
        session.error = Some(BetRejection::NonPositive.into());
        session.clear_wallet();
        assert_eq!(session.chain(), Some(Chain::Polygon));
        assert!(session.address().is_none());
        session.clear();
        assert_eq!(session.chain(), None);
    }

    #[test]
    fn view_labels_simulated_balance() {
        let mut session = Session::default();
        let mut balance = Balance::new(Chain::Solana, U256::from(5_000_000_000u64));
        session.balance = Some(balance);
        let view = SessionView::new(&session, &WagerState::default());
        assert_eq!(view.balance_label.as_deref(), Some("Balance: 5.00 SOL"));
        assert!(!view.simulated);

        balance.credit(U256::from(4_000_000_000u64));
        session.balance = Some(balance);
        let view = SessionView::new(&session, &WagerState::default());
        assert_eq!(view.balance.as_deref(), Some("9.00"));
        assert_eq!(
            view.balance_label.as_deref(),
            Some("Balance: 9.00 SOL (simulated)")
        );
        assert!(view.simulated);
    }

    #[test]
    fn evm_label_does_not_repeat_symbol() {
        let mut session = Session::new(Chain::Ethereum);
        session.balance = Some(Balance::new(
            Chain::Ethereum,
            U256::from(1_500_000_000_000_000_000u64),
        ));
        let view = SessionView::new(&session, &WagerState::default());
        assert_eq!(view.balance_label.as_deref(), Some("Balance: 1.5 ETH"));
    }

    #[test]
    fn error_message_carries_category() {
        let mut session = Session::default();
        session.error = Some(SessionError::ProviderMissing {
            chain: Chain::Solana,
        });
        let view = SessionView::new(&session, &WagerState::default());
        let error = view.error.unwrap();
        assert_eq!(error.kind, MessageKind::ProviderMissing);
        assert_eq!(error.text, "Phantom wallet not installed. Please install Phantom.");
    }

    #[test]
    fn view_serializes_for_the_ui() {
        let view = SessionView::new(&Session::default(), &WagerState::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["chain"], "solana");
        assert_eq!(json["connecting"], false);
        assert!(json["address"].is_null());
    }
}
