//! Fee-aware quotes against constant-product reserves.
//!
//! Pools never use these to price a swap: a swap states its outputs and
//! the pool only verifies the fee-adjusted invariant. Callers use the
//! quotes to size a swap that will pass that check, and the multi-outcome
//! pool uses the input quote to project its state before any transfer.

use crate::domain::{Amount, Reserve};
use crate::error::{AmmError, Result};
use crate::math::{to_u128, widening_mul, U256};

/// Fee numerator: 0.3% of every input stays in the pool.
pub const FEE_NUMERATOR: u128 = 3;

/// Fee denominator.
pub const FEE_DENOMINATOR: u128 = 1_000;

const NET_NUMERATOR: u128 = FEE_DENOMINATOR - FEE_NUMERATOR;

/// Largest output obtainable for `amount_in`.
///
/// ```text
/// out = in · 997 · r_out / (r_in · 1000 + in · 997)
/// ```
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is empty.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Amount, Reserve};
/// use outcome_amm::pools::quote_amount_out;
///
/// let r = Reserve::new(1_000_000).expect("fits");
/// let out = quote_amount_out(Amount::new(1_000), r, r).expect("quote");
/// assert_eq!(out, Amount::new(996));
/// ```
pub fn quote_amount_out(
    amount_in: Amount,
    reserve_in: Reserve,
    reserve_out: Reserve,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let net_in = widening_mul(amount_in.get(), NET_NUMERATOR);
    let numerator = net_in
        .checked_mul(U256::from(reserve_out.get()))
        .ok_or(AmmError::Overflow("quote numerator"))?;
    let denominator = widening_mul(reserve_in.get(), FEE_DENOMINATOR)
        .checked_add(net_in)
        .ok_or(AmmError::Overflow("quote denominator"))?;
    numerator
        .checked_div(denominator)
        .and_then(to_u128)
        .map(Amount::new)
        .ok_or(AmmError::Overflow("quote result"))
}

/// Smallest input that buys `amount_out`.
///
/// ```text
/// in = r_in · out · 1000 / ((r_out − out) · 997) + 1
/// ```
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if `amount_out` is not below
///   `reserve_out` or `reserve_in` is empty.
/// - [`AmmError::Overflow`] if the input does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Amount, Reserve};
/// use outcome_amm::pools::{quote_amount_in, quote_amount_out};
///
/// let r = Reserve::new(1_000_000).expect("fits");
/// let amount_in = quote_amount_in(Amount::new(996), r, r).expect("quote");
/// assert!(quote_amount_out(amount_in, r, r).expect("quote") >= Amount::new(996));
/// ```
pub fn quote_amount_in(
    amount_out: Amount,
    reserve_in: Reserve,
    reserve_out: Reserve,
) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || amount_out.get() >= reserve_out.get() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let numerator = widening_mul(reserve_in.get(), amount_out.get())
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .ok_or(AmmError::Overflow("quote numerator"))?;
    let denominator = widening_mul(reserve_out.get() - amount_out.get(), NET_NUMERATOR);
    numerator
        .checked_div(denominator)
        .and_then(|q| q.checked_add(U256::one()))
        .and_then(to_u128)
        .map(Amount::new)
        .ok_or(AmmError::Overflow("quote result"))
}
