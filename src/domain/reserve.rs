//! Pool reserve bounded to 112 bits.

use core::fmt;

use super::Amount;
use crate::error::AmmError;

/// A recorded pool reserve, bounded to `2^112 - 1`.
///
/// The bound keeps `reserve0 × reserve1` inside 224 bits and lets a
/// reserve be encoded as a UQ112x112 fixed-point value. Reserves are only
/// produced through a fallible widen-then-check conversion from an
/// [`Amount`]; there is no wrapping or truncating constructor.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Amount, Reserve};
///
/// let r = Reserve::try_from(Amount::new(1_000)).expect("fits");
/// assert_eq!(r.get(), 1_000);
/// assert!(Reserve::try_from(Amount::new(1 << 112)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Reserve(u128);

impl Reserve {
    /// Empty reserve.
    pub const ZERO: Self = Self(0);

    /// Largest representable reserve (`2^112 - 1`).
    pub const MAX: Self = Self((1 << 112) - 1);

    /// Creates a reserve, failing if `value` exceeds [`Reserve::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ReserveOverflow`] if the value needs more than
    /// 112 bits.
    pub const fn new(value: u128) -> Result<Self, AmmError> {
        if value > Self::MAX.0 {
            return Err(AmmError::ReserveOverflow);
        }
        Ok(Self(value))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the reserve is empty.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Widens the reserve back to an [`Amount`].
    pub const fn amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl TryFrom<Amount> for Reserve {
    type Error = AmmError;

    fn try_from(value: Amount) -> Result<Self, Self::Error> {
        Self::new(value.get())
    }
}

impl From<Reserve> for Amount {
    fn from(value: Reserve) -> Self {
        value.amount()
    }
}

impl fmt::Display for Reserve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a pair's recorded reserves and the time of their last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PairReserves {
    /// Reserve of `token0`.
    pub reserve0: Reserve,
    /// Reserve of `token1`.
    pub reserve1: Reserve,
    /// Timestamp (mod 2^32) of the last reserve update.
    pub block_timestamp_last: u32,
}
