//! Bridges between `u128` domain values and [`U256`] intermediates.
//!
//! Reserve products need 224 bits, fee-adjusted products about 244, and
//! price accumulators 256 with wrap-around. [`U256`] comes from
//! `ethereum-types`; these helpers cover the conversions the pools repeat.

use ethereum_types::U256;

/// Full-width product of two `u128` values. Never overflows.
///
/// # Examples
///
/// ```
/// use outcome_amm::math::{isqrt, to_u128, widening_mul};
///
/// let k = widening_mul(4_000, 9_000);
/// assert_eq!(isqrt(k), 6_000);
/// assert_eq!(to_u128(k), Some(36_000_000));
/// ```
#[must_use]
pub fn widening_mul(a: u128, b: u128) -> U256 {
    // (2^128 - 1)^2 < 2^256
    U256::from(a) * U256::from(b)
}

/// Narrows to `u128`, or `None` if the value needs more than 128 bits.
#[must_use]
pub fn to_u128(value: U256) -> Option<u128> {
    (value.bits() <= 128).then(|| value.low_u128())
}

/// Floor of the square root. Always fits in `u128`.
#[must_use]
pub fn isqrt(value: U256) -> u128 {
    value.integer_sqrt().low_u128()
}

/// Quotient and remainder of truncating division, `None` for a zero divisor.
#[must_use]
pub fn checked_div_rem(value: U256, divisor: U256) -> Option<(U256, U256)> {
    (!divisor.is_zero()).then(|| value.div_mod(divisor))
}

/// Division rounded up, `None` for a zero divisor.
#[must_use]
pub fn checked_div_ceil(value: U256, divisor: U256) -> Option<U256> {
    let (quotient, remainder) = checked_div_rem(value, divisor)?;
    if remainder.is_zero() {
        Some(quotient)
    } else {
        quotient.checked_add(U256::one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_mul_of_max() {
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        let p = widening_mul(u128::MAX, u128::MAX);
        assert_eq!(p.low_u128(), 1);
        assert_eq!(p + U256::from(u128::MAX) * U256::from(2u128), U256::MAX);
    }

    #[test]
    fn narrowing() {
        assert_eq!(to_u128(U256::from(u128::MAX)), Some(u128::MAX));
        assert_eq!(to_u128(U256::from(u128::MAX) + U256::one()), None);
    }

    #[test]
    fn isqrt_floor_and_extremes() {
        assert_eq!(isqrt(U256::zero()), 0);
        assert_eq!(isqrt(U256::from(15u128)), 3);
        assert_eq!(isqrt(U256::from(16u128)), 4);
        assert_eq!(isqrt(U256::MAX), u128::MAX);
        let r = (1u128 << 112) - 1;
        assert_eq!(isqrt(widening_mul(r, r)), r);
    }

    #[test]
    fn division_helpers() {
        let a = widening_mul(u128::MAX, 1_000_003);
        assert_eq!(
            checked_div_rem(a, U256::from(1_000_003u128)),
            Some((U256::from(u128::MAX), U256::zero()))
        );
        assert_eq!(checked_div_rem(a, U256::zero()), None);
        assert_eq!(checked_div_ceil(U256::from(10u128), U256::from(3u128)), Some(U256::from(4u128)));
        assert_eq!(checked_div_ceil(U256::from(9u128), U256::from(3u128)), Some(U256::from(3u128)));
    }
}
