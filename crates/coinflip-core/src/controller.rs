use tracing::{debug, info, instrument, warn};

use crate::config::SessionConfig;
use crate::error::{BetRejection, ProviderError, SessionError};
use crate::provider::{Connection, Eip1193, SolanaWallet, WalletEnvironment, WalletProvider};
use crate::session::{Session, SessionView};
use crate::types::{Balance, Chain, Side};
use crate::wager::{self, Coin, FlipOutcome, RandomCoin, WagerState};

/// Owns the session and wager state and runs every user action against them.
///
/// Handlers take `&mut self`, so actions are serialised. Each handler
/// returns its error and also stores it in the session's error slot.
pub struct SessionController<C = RandomCoin> {
    env: WalletEnvironment,
    session: Session,
    wager: WagerState,
    coin: C,
}

impl SessionController<RandomCoin> {
    pub fn new(env: WalletEnvironment) -> Self {
        Self::with_coin(env, RandomCoin::default())
    }

    /// Controller on the configured Solana cluster, preselecting the
    /// configured chain. Wallets are attached with
    /// [`with_solana_wallet`](Self::with_solana_wallet) and
    /// [`with_ethereum`](Self::with_ethereum).
    pub fn from_config(config: &SessionConfig) -> Result<Self, ProviderError> {
        let env = WalletEnvironment::from_config(config)?;
        Ok(Self::new(env).starting_on(config.initial_chain))
    }
}

impl<C: Coin> SessionController<C> {
    pub fn with_coin(env: WalletEnvironment, coin: C) -> Self {
        Self {
            env,
            session: Session::default(),
            wager: WagerState::default(),
            coin,
        }
    }

    /// Preselects `chain` instead of the default.
    pub fn starting_on(mut self, chain: Chain) -> Self {
        self.session.chain = Some(chain);
        self
    }

    pub fn with_solana_wallet(mut self, wallet: impl SolanaWallet + 'static) -> Self {
        self.env = self.env.with_solana_wallet(wallet);
        self
    }

    pub fn with_ethereum(mut self, provider: impl Eip1193 + 'static) -> Self {
        self.env = self.env.with_ethereum(provider);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn wager(&self) -> &WagerState {
        &self.wager
    }

    pub fn view(&self) -> SessionView {
        SessionView::new(&self.session, &self.wager)
    }

    /// Picker setter. Reconnects when a wallet is connected and the chain
    /// actually changed.
    pub async fn select_chain(&mut self, chain: Chain) -> Result<(), SessionError> {
        if self.session.chain == Some(chain) {
            return Ok(());
        }
        if self.session.is_connected() {
            return self.on_chain_changed(chain).await;
        }
        info!(%chain, "chain selected");
        self.session.chain = Some(chain);
        Ok(())
    }

    /// Drops the current wallet state and connects on `chain`.
    #[instrument(skip(self))]
    pub async fn on_chain_changed(&mut self, chain: Chain) -> Result<(), SessionError> {
        info!(from = ?self.session.chain, "chain changed, reconnecting");
        self.session.clear_wallet();
        self.session.chain = Some(chain);
        self.connect().await
    }

    /// Runs the connection procedure for the selected chain.
    #[instrument(skip(self))]
    pub async fn connect(&mut self) -> Result<(), SessionError> {
        let Some(chain) = self.session.chain else {
            debug!("connect ignored: no chain selected");
            return Ok(());
        };
        if self.session.connecting {
            warn!(%chain, "connect ignored: already connecting");
            return Ok(());
        }

        self.session.error = None;
        let result = {
            let _connecting = Connecting::start(&mut self.session);
            establish(chain, &self.env).await
        };

        match result {
            Ok(Connection { address, balance }) => {
                let balance = Balance::new(chain, balance);
                info!(%chain, %address, %balance, "wallet connected");
                self.session.address = Some(address);
                self.session.balance = Some(balance);
                Ok(())
            }
            Err(err) => {
                warn!(%chain, %err, "wallet connection failed");
                self.session.address = None;
                self.session.balance = None;
                self.session.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Forgets the wallet and the chain selection. No provider is called.
    pub fn disconnect(&mut self) {
        info!(chain = ?self.session.chain, "wallet disconnected");
        self.session.clear();
    }

    pub fn set_bet_amount(&mut self, amount: impl Into<String>) {
        self.wager.bet_amount = amount.into();
    }

    pub fn choose_side(&mut self, side: Side) {
        self.wager.side = Some(side);
    }

    /// Records the bet and flips.
    pub fn place_bet(
        &mut self,
        amount: impl Into<String>,
        side: Side,
    ) -> Result<FlipOutcome, SessionError> {
        self.set_bet_amount(amount);
        self.choose_side(side);
        self.submit_bet()
    }

    /// Flips with the amount and side already in the bet form.
    pub fn submit_bet(&mut self) -> Result<FlipOutcome, SessionError> {
        match self.flip() {
            Ok(outcome) => {
                info!(
                    chosen = %outcome.chosen,
                    landed = %outcome.landed,
                    won = outcome.won(),
                    "coin flipped"
                );
                self.session.error = None;
                self.wager.outcome = Some(outcome);
                Ok(outcome)
            }
            Err(err) => {
                warn!(%err, "bet rejected");
                self.session.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn flip(&mut self) -> Result<FlipOutcome, SessionError> {
        let bet = wager::validate_bet(
            &self.wager.bet_amount,
            self.wager.side,
            self.session.balance.as_ref(),
        )?;
        let balance = self
            .session
            .balance
            .as_mut()
            .ok_or(BetRejection::InsufficientFunds)?;
        Ok(wager::settle(balance, &bet, self.coin.draw()))
    }
}

async fn establish(chain: Chain, env: &WalletEnvironment) -> Result<Connection, SessionError> {
    WalletProvider::for_chain(chain, env)?.connect().await
}

/// Keeps `connecting` set for the lifetime of a handshake. Clearing it on
/// drop covers a connect future that is abandoned before it resolves.
struct Connecting<'a>(&'a mut Session);

impl<'a> Connecting<'a> {
    fn start(session: &'a mut Session) -> Self {
        session.connecting = true;
        Self(session)
    }
}

impl Drop for Connecting<'_> {
    fn drop(&mut self) {
        self.0.connecting = false;
    }
}
