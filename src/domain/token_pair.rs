//! Canonically ordered pair of distinct tokens.

use super::Address;
use crate::error::AmmError;

/// An unordered pair of distinct, non-null tokens stored in canonical order.
///
/// The constructor sorts its inputs so that `first() < second()`. The
/// pair `(X, Y)` and the pair `(Y, X)` are therefore the same value, which
/// is what lets the registry keep exactly one pool per unordered pair.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Address, TokenPair};
///
/// let yes = Address::from_bytes([2u8; 32]);
/// let usd = Address::from_bytes([1u8; 32]);
///
/// let pair = TokenPair::new(yes, usd).expect("distinct tokens");
/// assert_eq!(pair.first(), usd);
/// assert_eq!(pair.second(), yes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Creates a new canonically ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAddresses`] if both tokens are the same.
    /// - [`AmmError::ZeroAddress`] if either token is the null address.
    pub fn new(x: Address, y: Address) -> Result<Self, AmmError> {
        if x == y {
            return Err(AmmError::IdenticalAddresses);
        }
        let (token0, token1) = if x < y { (x, y) } else { (y, x) };
        if token0.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        Ok(Self { token0, token1 })
    }

    /// Returns the lower-addressed token.
    #[must_use]
    pub const fn first(&self) -> Address {
        self.token0
    }

    /// Returns the higher-addressed token.
    #[must_use]
    pub const fn second(&self) -> Address {
        self.token1
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn other(&self, token: &Address) -> Result<Address, AmmError> {
        if *token == self.token0 {
            Ok(self.token1)
        } else if *token == self.token1 {
            Ok(self.token0)
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
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
    fn sorts_reversed_input() {
        let Ok(pair) = TokenPair::new(addr(2), addr(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), addr(1));
        assert_eq!(pair.second(), addr(2));
    }

    #[test]
    fn both_orderings_are_equal() {
        assert_eq!(
            TokenPair::new(addr(1), addr(2)),
            TokenPair::new(addr(2), addr(1))
        );
    }

    #[test]
    fn rejects_identical() {
        assert_eq!(
            TokenPair::new(addr(3), addr(3)),
            Err(AmmError::IdenticalAddresses)
        );
    }

    #[test]
    fn rejects_null_token_on_either_side() {
        assert_eq!(
            TokenPair::new(Address::zero(), addr(1)),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(
            TokenPair::new(addr(1), Address::zero()),
            Err(AmmError::ZeroAddress)
        );
    }

    #[test]
    fn other_returns_counterpart() {
        let Ok(pair) = TokenPair::new(addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.other(&addr(1)), Ok(addr(2)));
        assert_eq!(pair.other(&addr(2)), Ok(addr(1)));
        assert!(pair.other(&addr(9)).is_err());
        assert!(pair.contains(&addr(2)));
        assert!(!pair.contains(&addr(9)));
    }
}
