//! Source of the protocol fee recipient.

use crate::domain::Address;

/// Supplies the current protocol fee recipient to a pool.
///
/// The registry implements this trait; pools receive it by reference on
/// every liquidity operation and hold no pointer back to it. A bare
/// `Option<Address>` is also a fee source, which is convenient for pools
/// driven without a registry.
pub trait FeeSource {
    /// The protocol fee recipient, or `None` when the fee is off.
    fn fee_recipient(&self) -> Option<Address>;
}

impl FeeSource for Option<Address> {
    fn fee_recipient(&self) -> Option<Address> {
        *self
    }
}
