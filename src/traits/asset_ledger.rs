//! Seam to the external ledger holding the pooled assets.
//!
//! Pools never own asset balances themselves. They read balances from,
//! and send transfers to, an [`AssetLedger`] supplied by the caller on
//! every operation. Deposits are ordinary transfers to the pool's address
//! made before calling `mint` or `swap`; the pool infers them from the
//! difference between its balance and its recorded reserve.

use crate::domain::{Address, Amount};
use crate::error::Result;

/// Balances and transfers of fungible assets keyed by token address.
///
/// # Contract
///
/// - `transfer` either moves exactly `amount` or fails without effect.
/// - A transfer of zero succeeds and changes nothing.
/// - `balance_of` of an unknown holder is zero.
pub trait AssetLedger {
    /// Balance of `holder` in `token`.
    fn balance_of(&self, token: Address, holder: Address) -> Amount;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Implementations return [`AmmError::InsufficientBalance`] when
    /// `from` holds less than `amount`, and [`AmmError::Overflow`] when the
    /// recipient balance would overflow.
    ///
    /// [`AmmError::InsufficientBalance`]: crate::error::AmmError::InsufficientBalance
    /// [`AmmError::Overflow`]: crate::error::AmmError::Overflow
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;
}
