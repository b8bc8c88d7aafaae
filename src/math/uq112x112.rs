//! UQ112x112 fixed-point numbers.
//!
//! A value is stored as a 256-bit integer whose low 112 bits are the
//! fraction and whose next 112 bits are the integer part. Encoding
//! multiplies by `2^112`; dividing an encoded value by a plain 112-bit
//! integer yields a new ratio. Only truncation is performed. The format
//! is used by the price accumulator and never by swap pricing.

use super::{to_u128, widening_mul, U256};
use crate::domain::Reserve;
use crate::error::{AmmError, Result};

/// Number of fractional bits.
pub const RESOLUTION: u32 = 112;

const Q112: u128 = 1 << RESOLUTION;

/// An unsigned 112.112 fixed-point number.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::Reserve;
/// use outcome_amm::math::Uq112x112;
///
/// let nine = Reserve::new(9_000).expect("fits");
/// let four = Reserve::new(4_000).expect("fits");
/// let price = Uq112x112::encode(nine).uqdiv(four).expect("non-zero");
/// assert_eq!(price.decode(), 2); // 2.25 truncated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uq112x112(U256);

impl Uq112x112 {
    /// Encodes an integer reserve as a fixed-point value.
    #[must_use]
    pub fn encode(value: Reserve) -> Self {
        Self(widening_mul(value.get(), Q112))
    }

    /// Wraps a raw 256-bit fixed-point representation.
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Returns the raw 256-bit representation.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Divides by a 112-bit integer, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `divisor` is zero.
    pub fn uqdiv(self, divisor: Reserve) -> Result<Self> {
        self.0
            .checked_div(U256::from(divisor.get()))
            .map(Self)
            .ok_or(AmmError::DivisionByZero)
    }

    /// Scales the value by an elapsed time in seconds.
    ///
    /// A ratio below `2^224` times a `u32` always fits in 256 bits, so
    /// this only fails for raw values that were not produced by
    /// [`encode`](Self::encode)/[`uqdiv`](Self::uqdiv).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product exceeds 256 bits.
    pub fn mul_elapsed(self, elapsed: u32) -> Result<U256> {
        self.0
            .checked_mul(U256::from(elapsed))
            .ok_or(AmmError::Overflow("price accumulator increment"))
    }

    /// Integer part, truncating the fraction.
    #[must_use]
    pub fn decode(&self) -> u128 {
        to_u128(self.0 / U256::from(Q112)).unwrap_or(u128::MAX)
    }

    /// Fractional part as a raw 112-bit numerator over `2^112`.
    #[must_use]
    pub fn fraction(&self) -> u128 {
        self.0.low_u128() & (Q112 - 1)
    }
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
    fn encode_decode_round_trip() {
        let x = Uq112x112::encode(reserve(12_345));
        assert_eq!(x.decode(), 12_345);
        assert_eq!(x.fraction(), 0);
    }

    #[test]
    fn encode_max_reserve_fits_224_bits() {
        let x = Uq112x112::encode(Reserve::MAX);
        assert_eq!(x.raw().bits(), 224);
        assert_eq!(x.decode(), Reserve::MAX.get());
    }

    #[test]
    fn division_yields_fraction() {
        let Ok(half) = Uq112x112::encode(reserve(1)).uqdiv(reserve(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(half.decode(), 0);
        assert_eq!(half.fraction(), 1 << 111);
    }

    #[test]
    fn division_by_zero_rejected() {
        assert_eq!(
            Uq112x112::encode(reserve(1)).uqdiv(Reserve::ZERO),
            Err(AmmError::DivisionByZero)
        );
    }

    #[test]
    fn mul_elapsed_never_overflows_for_encoded_ratios() {
        let Ok(p) = Uq112x112::encode(Reserve::MAX).uqdiv(reserve(1)) else {
            panic!("expected Ok");
        };
        assert!(p.mul_elapsed(u32::MAX).is_ok());
        assert_eq!(
            Uq112x112::from_raw(U256::MAX).mul_elapsed(2),
            Err(AmmError::Overflow("price accumulator increment"))
        );
    }
}
