//! Configuration for multi-outcome pools.

use crate::domain::Address;
use crate::error::AmmError;

/// Default fixed-point unit of the reference asset (18 decimals).
pub const DEFAULT_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Configuration for a [`MultiOutcomePool`](crate::pools::MultiOutcomePool).
///
/// Outcome tokens are stored sorted by address, so two configurations
/// naming the same outcomes in different orders are equal.
///
/// # Derived Values
///
/// - `price(outcome) = reserve(outcome) × precision / reference_reserve`
/// - Probability ceiling: `precision` (certainty).
///
/// # Validation
///
/// - At least two outcomes.
/// - No null address, no duplicate outcome, no outcome equal to the
///   reference asset.
/// - `precision` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiOutcomeConfig {
    reference: Address,
    outcomes: Vec<Address>,
    precision: u128,
}

impl MultiOutcomeConfig {
    /// Creates a config with [`DEFAULT_PRECISION`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if a rule is violated.
    pub fn new(reference: Address, outcomes: Vec<Address>) -> Result<Self, AmmError> {
        Self::with_precision(reference, outcomes, DEFAULT_PRECISION)
    }

    /// Creates a config with an explicit fixed-point unit.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if a rule is violated.
    pub fn with_precision(
        reference: Address,
        mut outcomes: Vec<Address>,
        precision: u128,
    ) -> Result<Self, AmmError> {
        outcomes.sort_unstable();
        let config = Self {
            reference,
            outcomes,
            precision,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] describing the first
    /// violated rule.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.reference.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "reference asset must not be null",
            ));
        }
        if self.outcomes.len() < 2 {
            return Err(AmmError::InvalidConfiguration(
                "a market needs at least two outcomes",
            ));
        }
        if self.outcomes.iter().any(Address::is_zero) {
            return Err(AmmError::InvalidConfiguration(
                "outcome token must not be null",
            ));
        }
        if self.outcomes.contains(&self.reference) {
            return Err(AmmError::InvalidConfiguration(
                "outcome token must differ from the reference asset",
            ));
        }
        if self.outcomes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AmmError::InvalidConfiguration(
                "outcome tokens must be distinct and sorted",
            ));
        }
        if self.precision == 0 {
            return Err(AmmError::InvalidConfiguration(
                "precision must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the reference asset.
    #[must_use]
    pub const fn reference(&self) -> Address {
        self.reference
    }

    /// Returns the outcome tokens, sorted.
    #[must_use]
    pub fn outcomes(&self) -> &[Address] {
        &self.outcomes
    }

    /// Returns the fixed-point unit, which is also the probability ceiling.
    #[must_use]
    pub const fn precision(&self) -> u128 {
        self.precision
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn outcomes_are_sorted() {
        let Ok(cfg) = MultiOutcomeConfig::new(addr(1), vec![addr(9), addr(3), addr(5)]) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.outcomes(), &[addr(3), addr(5), addr(9)]);
        assert_eq!(cfg.precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn order_of_outcomes_is_irrelevant() {
        assert_eq!(
            MultiOutcomeConfig::new(addr(1), vec![addr(2), addr(3)]),
            MultiOutcomeConfig::new(addr(1), vec![addr(3), addr(2)])
        );
    }

    #[test]
    fn rejects_invalid_markets() {
        let cases = [
            MultiOutcomeConfig::new(addr(1), vec![addr(2)]),
            MultiOutcomeConfig::new(addr(1), vec![addr(2), addr(2)]),
            MultiOutcomeConfig::new(addr(1), vec![addr(1), addr(2)]),
            MultiOutcomeConfig::new(Address::zero(), vec![addr(2), addr(3)]),
            MultiOutcomeConfig::new(addr(1), vec![Address::zero(), addr(3)]),
            MultiOutcomeConfig::with_precision(addr(1), vec![addr(2), addr(3)], 0),
        ];
        for case in cases {
            let Err(AmmError::InvalidConfiguration(_)) = case else {
                panic!("expected InvalidConfiguration");
            };
        }
    }
}
