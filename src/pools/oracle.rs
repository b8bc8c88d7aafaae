//! Time-weighted price accumulator.
//!
//! On every reserve update the pool adds the price that held since the
//! previous update, weighted by the seconds it held:
//!
//! ```text
//! price0_cumulative += (reserve1 / reserve0) · elapsed
//! price1_cumulative += (reserve0 / reserve1) · elapsed
//! ```
//!
//! Prices are UQ112x112 ratios and the accumulators are 256-bit integers
//! that wrap. Timestamps are kept modulo 2^32 and elapsed time is taken
//! with wrapping subtraction, so differencing two observations stays
//! correct across both wraps.

use crate::domain::Reserve;
use crate::error::{AmmError, Result};
use crate::math::{Uq112x112, U256};

/// Cumulative prices of a pair at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PriceObservation {
    /// Σ (`reserve1 / reserve0`) · seconds, UQ112x112.
    pub price0_cumulative: U256,
    /// Σ (`reserve0 / reserve1`) · seconds, UQ112x112.
    pub price1_cumulative: U256,
    /// Timestamp (mod 2^32) the observation refers to.
    pub timestamp: u32,
}

/// Accumulator state stored by a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PriceAccumulator {
    price0_cumulative: U256,
    price1_cumulative: U256,
    block_timestamp_last: u32,
}

impl PriceAccumulator {
    /// Creates an accumulator at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative price of `token0` in `token1`.
    #[must_use]
    pub const fn price0_cumulative(&self) -> U256 {
        self.price0_cumulative
    }

    /// Cumulative price of `token1` in `token0`.
    #[must_use]
    pub const fn price1_cumulative(&self) -> U256 {
        self.price1_cumulative
    }

    /// Timestamp of the last accumulation.
    #[must_use]
    pub const fn block_timestamp_last(&self) -> u32 {
        self.block_timestamp_last
    }

    /// Accumulates the prices implied by the reserves that held until
    /// `block_timestamp`, then moves the clock.
    ///
    /// Nothing is added when no time passed or when either reserve is
    /// empty.
    ///
    /// # Errors
    ///
    /// Propagates fixed-point errors, which cannot occur for reserves
    /// within 112 bits.
    pub fn accumulate(
        &mut self,
        reserve0: Reserve,
        reserve1: Reserve,
        block_timestamp: u32,
    ) -> Result<()> {
        let elapsed = block_timestamp.wrapping_sub(self.block_timestamp_last);
        if elapsed > 0 && !reserve0.is_zero() && !reserve1.is_zero() {
            let p0 = Uq112x112::encode(reserve1)
                .uqdiv(reserve0)?
                .mul_elapsed(elapsed)?;
            let p1 = Uq112x112::encode(reserve0)
                .uqdiv(reserve1)?
                .mul_elapsed(elapsed)?;
            self.price0_cumulative = self.price0_cumulative.overflowing_add(p0).0;
            self.price1_cumulative = self.price1_cumulative.overflowing_add(p1).0;
        }
        self.block_timestamp_last = block_timestamp;
        Ok(())
    }

    /// The observation as it would read at `block_timestamp` if the given
    /// reserves held until then. The accumulator itself is not modified.
    ///
    /// # Errors
    ///
    /// Same as [`accumulate`](Self::accumulate).
    pub fn observe_at(
        &self,
        reserve0: Reserve,
        reserve1: Reserve,
        block_timestamp: u32,
    ) -> Result<PriceObservation> {
        let mut projected = *self;
        projected.accumulate(reserve0, reserve1, block_timestamp)?;
        Ok(PriceObservation {
            price0_cumulative: projected.price0_cumulative,
            price1_cumulative: projected.price1_cumulative,
            timestamp: block_timestamp,
        })
    }
}

/// Time-weighted average prices between two observations.
///
/// Returns `(price0, price1)` as UQ112x112 ratios: the average of
/// `reserve1 / reserve0` and of `reserve0 / reserve1` over the window.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if both observations carry the
/// same timestamp.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::Reserve;
/// use outcome_amm::pools::{twap, PriceAccumulator};
///
/// let r0 = Reserve::new(4_000).expect("fits");
/// let r1 = Reserve::new(9_000).expect("fits");
///
/// let acc = PriceAccumulator::new();
/// let start = acc.observe_at(r0, r1, 100).expect("observe");
/// let end = acc.observe_at(r0, r1, 160).expect("observe");
/// let (price0, _) = twap(&start, &end).expect("window");
/// assert_eq!(price0.decode(), 2); // 9000 / 4000 = 2.25
/// ```
pub fn twap(
    earlier: &PriceObservation,
    later: &PriceObservation,
) -> Result<(Uq112x112, Uq112x112)> {
    let elapsed = U256::from(later.timestamp.wrapping_sub(earlier.timestamp));
    let average = |end: U256, start: U256| {
        let (delta, _) = end.overflowing_sub(start);
        delta
            .checked_div(elapsed)
            .map(Uq112x112::from_raw)
            .ok_or(AmmError::DivisionByZero)
    };
    Ok((
        average(later.price0_cumulative, earlier.price0_cumulative)?,
        average(later.price1_cumulative, earlier.price1_cumulative)?,
    ))
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
    fn first_update_only_sets_clock() {
        let mut acc = PriceAccumulator::new();
        let Ok(()) = acc.accumulate(Reserve::ZERO, Reserve::ZERO, 50) else {
            panic!("expected Ok");
        };
        assert_eq!(acc.price0_cumulative(), U256::zero());
        assert_eq!(acc.block_timestamp_last(), 50);
    }

    #[test]
    fn accumulates_ratio_times_elapsed() {
        let mut acc = PriceAccumulator::new();
        let Ok(()) = acc.accumulate(reserve(1), reserve(2), 10) else {
            panic!("expected Ok");
        };
        assert_eq!(Uq112x112::from_raw(acc.price0_cumulative()).decode(), 20);
        assert_eq!(Uq112x112::from_raw(acc.price1_cumulative()).decode(), 5);
    }

    #[test]
    fn same_timestamp_adds_nothing() {
        let mut acc = PriceAccumulator::new();
        let Ok(()) = acc.accumulate(reserve(3), reserve(5), 0) else {
            panic!("expected Ok");
        };
        assert_eq!(acc, PriceAccumulator::new());
    }

    #[test]
    fn elapsed_wraps_around_u32() {
        let mut acc = PriceAccumulator::new();
        let Ok(()) = acc.accumulate(Reserve::ZERO, Reserve::ZERO, u32::MAX - 4) else {
            panic!("expected Ok");
        };
        let Ok(()) = acc.accumulate(reserve(1), reserve(1), 5) else {
            panic!("expected Ok");
        };
        // 10 seconds across the wrap at price 1.
        assert_eq!(Uq112x112::from_raw(acc.price0_cumulative()).decode(), 10);
    }

    #[test]
    fn twap_over_window() {
        let mut acc = PriceAccumulator::new();
        let Ok(()) = acc.accumulate(reserve(100), reserve(100), 0) else {
            panic!("expected Ok");
        };
        let Ok(start) = acc.observe_at(reserve(100), reserve(100), 0) else {
            panic!("expected Ok");
        };
        // Price 1 for 10s, then price 3 for 10s: average 2.
        let Ok(()) = acc.accumulate(reserve(100), reserve(100), 10) else {
            panic!("expected Ok");
        };
        let Ok(end) = acc.observe_at(reserve(100), reserve(300), 20) else {
            panic!("expected Ok");
        };
        let Ok((p0, _)) = twap(&start, &end) else {
            panic!("expected Ok");
        };
        assert_eq!(p0.decode(), 2);
    }

    #[test]
    fn accumulator_wraps_past_256_bits() {
        let mut acc = PriceAccumulator {
            price0_cumulative: U256::MAX,
            ..PriceAccumulator::default()
        };
        let Ok(start) = acc.observe_at(reserve(7), reserve(7), 0) else {
            panic!("expected Ok");
        };
        let Ok(()) = acc.accumulate(reserve(7), reserve(7), 1) else {
            panic!("expected Ok");
        };
        // MAX + 2^112 wraps to 2^112 - 1.
        assert_eq!(acc.price0_cumulative(), U256::from((1u128 << 112) - 1));
        let end = PriceObservation {
            price0_cumulative: acc.price0_cumulative(),
            price1_cumulative: acc.price1_cumulative(),
            timestamp: 1,
        };
        let Ok((p0, p1)) = twap(&start, &end) else {
            panic!("expected Ok");
        };
        assert_eq!(p0.decode(), 1);
        assert_eq!(p1.decode(), 1);
    }

    #[test]
    fn twap_requires_a_window() {
        let obs = PriceObservation::default();
        assert_eq!(twap(&obs, &obs), Err(AmmError::DivisionByZero));
    }
}
