//! Protocol fee on liquidity growth.
//!
//! When the fee is on, one sixth of the growth in `√k` since the last
//! liquidity event is minted as new shares to the fee recipient, just
//! before the next mint or burn. With `s` the share supply:
//!
//! ```text
//! shares = s · (√k − √k_last) / (5 · √k + √k_last)
//! ```

use crate::domain::{Liquidity, Reserve};
use crate::error::{AmmError, Result};
use crate::math::{isqrt, to_u128, widening_mul, U256};

/// Shares owed to the protocol for the growth of `k` since `k_last`.
///
/// Returns zero when `k_last` is zero (fee was off at the last liquidity
/// event) or when `k` did not grow.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the share amount does not fit in
/// `u128`, which requires a supply far beyond any reachable state.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Liquidity, Reserve};
/// use outcome_amm::math::U256;
/// use outcome_amm::pools::protocol_fee_shares;
///
/// // √k grew from 1000 to 2000 with 1000 shares outstanding.
/// let r = Reserve::new(2_000).expect("fits");
/// let fee = protocol_fee_shares(
///     Liquidity::new(1_000),
///     r,
///     r,
///     U256::from(1_000_000u128),
/// )
/// .expect("fee");
/// assert_eq!(fee, Liquidity::new(90)); // 1000 · 1000 / 11000
/// ```
pub fn protocol_fee_shares(
    total_supply: Liquidity,
    reserve0: Reserve,
    reserve1: Reserve,
    k_last: U256,
) -> Result<Liquidity> {
    if k_last.is_zero() {
        return Ok(Liquidity::ZERO);
    }
    let root_k = isqrt(widening_mul(reserve0.get(), reserve1.get()));
    let root_k_last = isqrt(k_last);
    if root_k <= root_k_last {
        return Ok(Liquidity::ZERO);
    }

    let numerator = widening_mul(total_supply.get(), root_k - root_k_last);
    let denominator = widening_mul(root_k, 5)
        .checked_add(U256::from(root_k_last))
        .ok_or(AmmError::Overflow("protocol fee denominator"))?;
    let shares = numerator
        .checked_div(denominator)
        .ok_or(AmmError::DivisionByZero)?;
    to_u128(shares)
        .map(Liquidity::new)
        .ok_or(AmmError::Overflow("protocol fee shares"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn reserve(v: u128) -> Reserve {
        let Ok(r) = Reserve::new(v) else {
            panic!("valid reserve");
        };
        r
    }

    #[test]
    fn off_when_k_last_is_zero() {
        assert_eq!(
            protocol_fee_shares(Liquidity::new(1_000), reserve(5), reserve(5), U256::zero()),
            Ok(Liquidity::ZERO)
        );
    }

    #[test]
    fn nothing_without_growth() {
        let k = widening_mul(4_000, 9_000);
        assert_eq!(
            protocol_fee_shares(Liquidity::new(6_000), reserve(4_000), reserve(9_000), k),
            Ok(Liquidity::ZERO)
        );
        assert_eq!(
            protocol_fee_shares(Liquidity::new(6_000), reserve(3_000), reserve(9_000), k),
            Ok(Liquidity::ZERO)
        );
    }

    #[test]
    fn one_sixth_of_growth_in_value() {
        // √k: 10_000 → 12_000 on 10_000 shares.
        // 10_000 · 2_000 / (60_000 + 10_000) = 285 (truncated).
        let k_last = widening_mul(10_000, 10_000);
        let Ok(fee) =
            protocol_fee_shares(Liquidity::new(10_000), reserve(12_000), reserve(12_000), k_last)
        else {
            panic!("expected Ok");
        };
        assert_eq!(fee, Liquidity::new(285));
    }
}
