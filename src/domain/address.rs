//! Chain-agnostic 32-byte identifier for tokens, pools, and holders.

use core::fmt;

/// A generic 32-byte address.
///
/// The same type identifies assets (outcome tokens, the reference asset),
/// pools, the registry, and share holders. All byte sequences are valid;
/// the all-zero value is the *null* address, which pools use as the sink
/// for permanently locked shares and which the registry refuses as a
/// token identifier.
///
/// Ordering is lexicographic over the bytes, which is what canonical
/// pair ordering relies on.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// assert!(Address::zero().is_zero());
/// assert!(Address::zero() < addr);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the null address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the null address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
