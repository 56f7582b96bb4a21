use alloy_primitives::U256;

/// Number of decimal places in one SOL.
pub const SOL_DECIMALS: u8 = 9;

/// Lamports per SOL (10^9).
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Lamports in one hundredth of a SOL.
const LAMPORTS_PER_CENT: u64 = LAMPORTS_PER_SOL / 100;

/// Format a lamport amount as SOL with exactly two decimal places.
///
/// Rounds half up on the third decimal, computed on integers so the result
/// does not depend on floating point representation. Takes a `U256` because
/// simulated winnings can push a balance past `u64::MAX` lamports.
pub fn format_sol(lamports: U256) -> String {
    let per_cent = U256::from(LAMPORTS_PER_CENT);
    let hundred = U256::from(100u64);

    let mut cents = lamports / per_cent;
    if lamports % per_cent >= per_cent / U256::from(2u64) {
        cents += U256::from(1u64);
    }
    format!("{}.{:02}", cents / hundred, (cents % hundred).to::<u64>())
}
