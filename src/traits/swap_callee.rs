//! Flash-swap callback.

use crate::domain::{Address, TokenAmount};
use crate::error::Result;
use crate::traits::AssetLedger;

/// Data handed to a [`SwapCallee`] after the optimistic output transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCallback<'a> {
    /// The pool executing the swap.
    pub pool: Address,
    /// Caller of `swap`.
    pub sender: Address,
    /// Outputs already transferred to the recipient.
    pub outputs: [TokenAmount; 2],
    /// Opaque data supplied with the swap request.
    pub data: &'a [u8],
}

/// Receiver of flash-swap callbacks.
///
/// Invoked when a swap request carries non-empty data. The callee runs
/// after the outputs have been transferred and before the pool checks its
/// invariant, so it may use the outputs and must leave the pool with
/// enough input to satisfy the fee-adjusted product. Transfers made
/// through `assets` are journaled with the rest of the swap and undone if
/// the swap fails.
///
/// Calling back into the same pool from `on_swap` fails with
/// [`AmmError::Locked`](crate::error::AmmError::Locked).
pub trait SwapCallee {
    /// Handles the callback.
    ///
    /// # Errors
    ///
    /// Any error aborts and reverts the whole swap.
    fn on_swap(&mut self, callback: SwapCallback<'_>, assets: &mut dyn AssetLedger) -> Result<()>;
}
