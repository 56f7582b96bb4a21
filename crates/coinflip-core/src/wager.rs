//! Bet validation and the coin flip itself.
//!
//! Nothing here moves funds. A win credits the session's displayed balance
//! and marks it simulated; the wallet's real balance is untouched.

use std::fmt;

use alloy_primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::U256;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};

use crate::error::BetRejection;
use crate::types::{Balance, Side};

/// A win returns the stake plus an equal amount.
pub const PAYOUT_MULTIPLIER: u64 = 2;

/// Precision used to read an amount when no balance (and so no chain
/// decimals) is known yet. Only the sign matters in that case.
const FALLBACK_DECIMALS: u8 = 18;

/// Source of uniform draws in `[0, 1)`.
pub trait Coin {
    fn draw(&mut self) -> f64;
}

/// A coin backed by a `rand` generator, the OS RNG by default.
#[derive(Debug, Clone)]
pub struct RandomCoin<R = OsRng> {
    rng: R,
}

impl Default for RandomCoin<OsRng> {
    fn default() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore> RandomCoin<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> Coin for RandomCoin<R> {
    fn draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Heads below one half, tails otherwise.
pub fn landed_side(draw: f64) -> Side {
    if draw < 0.5 {
        Side::Heads
    } else {
        Side::Tails
    }
}

/// A bet that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bet {
    /// Stake in the chain's smallest unit.
    pub stake: U256,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipOutcome {
    pub chosen: Side,
    pub landed: Side,
    pub stake: U256,
    /// Amount credited to the balance; zero on a loss.
    pub payout: U256,
}

impl FlipOutcome {
    pub fn won(&self) -> bool {
        self.landed == self.chosen
    }
}

impl fmt::Display for FlipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.won() {
            f.write_str("You win! 🎉")
        } else {
            f.write_str("You lose 😢")
        }
    }
}

/// The bet form: what the player typed, which side they picked, and the
/// last result. Amount and side survive a flip so the same bet can be
/// replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WagerState {
    pub(crate) bet_amount: String,
    pub(crate) side: Option<Side>,
    pub(crate) outcome: Option<FlipOutcome>,
}

impl WagerState {
    /// The amount as typed, in display units (SOL, ETH, MATIC).
    pub fn bet_amount(&self) -> &str {
        &self.bet_amount
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn outcome(&self) -> Option<&FlipOutcome> {
        self.outcome.as_ref()
    }
}

/// Reads a display-unit amount into smallest units.
///
/// Digits past the chain's precision are rejected rather than truncated;
/// trailing zeros do not count.
pub fn parse_stake(input: &str, decimals: u8) -> Result<U256, BetRejection> {
    let input = input.trim();
    if input.is_empty() {
        return Err(BetRejection::NonPositive);
    }
    if let Some((_, fraction)) = input.split_once('.') {
        if fraction.trim_end_matches('0').len() > usize::from(decimals) {
            return Err(BetRejection::Malformed(input.to_string()));
        }
    }
    match parse_units(input, decimals) {
        Ok(ParseUnits::U256(amount)) if !amount.is_zero() => Ok(amount),
        Ok(_) => Err(BetRejection::NonPositive),
        Err(_) => Err(BetRejection::Malformed(input.to_string())),
    }
}

/// Checks, in order: the amount is positive, the balance covers it, a side
/// is chosen. A missing balance never covers anything.
pub fn validate_bet(
    input: &str,
    side: Option<Side>,
    balance: Option<&Balance>,
) -> Result<Bet, BetRejection> {
    let decimals = balance.map_or(FALLBACK_DECIMALS, |b| b.chain().decimals());
    let stake = parse_stake(input, decimals)?;

    match balance {
        Some(balance) if balance.covers(stake) => {}
        _ => return Err(BetRejection::InsufficientFunds),
    }

    let side = side.ok_or(BetRejection::NoSideChosen)?;
    Ok(Bet { stake, side })
}

/// Resolves `bet` against `draw` and credits the balance on a win.
pub fn settle(balance: &mut Balance, bet: &Bet, draw: f64) -> FlipOutcome {
    let landed = landed_side(draw);
    let payout = if landed == bet.side {
        bet.stake.saturating_mul(U256::from(PAYOUT_MULTIPLIER))
    } else {
        U256::ZERO
    };
    if !payout.is_zero() {
        balance.credit(payout);
    }
    FlipOutcome {
        chosen: bet.side,
        landed,
        stake: bet.stake,
        payout,
    }
}
