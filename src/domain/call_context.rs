//! Caller identity and clock reading for a single operation.

use super::Address;

/// Who is calling, and when.
///
/// Every state-changing pool or registry operation receives a
/// `CallContext`. The `sender` is checked where an operation is gated
/// (pair initialization, share transfers) and recorded in events; the
/// `timestamp` (seconds, any epoch) drives the price accumulator.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Address, CallContext};
///
/// let alice = Address::from_bytes([7u8; 32]);
/// let ctx = CallContext::new(alice, 1_700_000_000);
/// assert_eq!(ctx.sender(), alice);
/// assert_eq!(ctx.at(1_700_000_060).timestamp(), 1_700_000_060);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    sender: Address,
    timestamp: u64,
}

impl CallContext {
    /// Creates a context for `sender` at `timestamp`.
    #[must_use]
    pub const fn new(sender: Address, timestamp: u64) -> Self {
        Self { sender, timestamp }
    }

    /// Returns the calling address.
    #[must_use]
    pub const fn sender(&self) -> Address {
        self.sender
    }

    /// Returns the call timestamp in seconds.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Same sender, different time.
    #[must_use]
    pub const fn at(&self, timestamp: u64) -> Self {
        Self {
            sender: self.sender,
            timestamp,
        }
    }

    /// The timestamp reduced modulo 2^32, as stored by the accumulator.
    #[must_use]
    pub const fn block_timestamp(&self) -> u32 {
        (self.timestamp % (1 << 32)) as u32
    }
}
