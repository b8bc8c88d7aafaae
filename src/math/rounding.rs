//! Rounding helpers for integer division.
//!
//! [`div_round`] divides two `u128` values with an explicit [`Rounding`]
//! direction. [`mul_div`] computes `a × b / d` through a 256-bit
//! intermediate, which is how pools scale balances by share supply
//! without overflowing: both factors may be full 112-bit (or wider)
//! quantities.
//!
//! # Convention
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Shares minted, assets paid out | [`Rounding::Down`] |
//! | Input required for an output | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use outcome_amm::domain::Rounding;
//! use outcome_amm::math::{div_round, mul_div};
//!
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(mul_div(2_000, 5_000, 4_000, Rounding::Down), Ok(2_500));
//! ```

use super::{checked_div_rem, to_u128, widening_mul, U256};
use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        Rounding::Up => {
            // q + 1 cannot overflow: a non-zero remainder implies q < u128::MAX.
            if numerator % denominator != 0 {
                Some(q + 1)
            } else {
                Some(q)
            }
        }
    }
}

/// Computes `a × b / denominator` without intermediate overflow.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let (quotient, remainder) = checked_div_rem(widening_mul(a, b), U256::from(denominator))
        .ok_or(AmmError::DivisionByZero)?;
    let quotient =
        to_u128(quotient).ok_or(AmmError::Overflow("mul_div quotient exceeds u128"))?;
    if rounding.is_up() && !remainder.is_zero() {
        return quotient
            .checked_add(1)
            .ok_or(AmmError::Overflow("mul_div rounding overflow"));
    }
    Ok(quotient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_by_zero_returns_none() {
        assert_eq!(div_round(100, 0, Rounding::Down), None);
        assert_eq!(div_round(0, 0, Rounding::Up), None);
    }

    #[test]
    fn div_round_directions() {
        assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
        assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
        assert_eq!(div_round(9, 3, Rounding::Up), Some(3));
        assert_eq!(div_round(0, 5, Rounding::Up), Some(0));
    }

    #[test]
    fn div_round_extremes() {
        assert_eq!(div_round(u128::MAX, 1, Rounding::Up), Some(u128::MAX));
        assert_eq!(div_round(u128::MAX, u128::MAX - 1, Rounding::Up), Some(2));
        assert_eq!(div_round(1, u128::MAX, Rounding::Up), Some(1));
    }

    #[test]
    fn mul_div_uses_wide_intermediate() {
        // (2^100 * 2^100) / 2^90 = 2^110: the product alone needs 200 bits.
        let a = 1u128 << 100;
        assert_eq!(mul_div(a, a, 1u128 << 90, Rounding::Down), Ok(1u128 << 110));
    }

    #[test]
    fn mul_div_rounding() {
        assert_eq!(mul_div(7, 3, 2, Rounding::Down), Ok(10));
        assert_eq!(mul_div(7, 3, 2, Rounding::Up), Ok(11));
        assert_eq!(mul_div(8, 3, 2, Rounding::Up), Ok(12));
    }

    #[test]
    fn mul_div_errors() {
        assert_eq!(mul_div(1, 1, 0, Rounding::Down), Err(AmmError::DivisionByZero));
        assert!(matches!(
            mul_div(u128::MAX, u128::MAX, 1, Rounding::Down),
            Err(AmmError::Overflow(_))
        ));
    }
}
