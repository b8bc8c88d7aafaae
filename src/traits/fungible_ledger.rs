//! Share token interface of a pool.

use crate::domain::{Address, CallContext, Liquidity};
use crate::error::Result;

/// Transferable pool shares with allowances.
///
/// Share queries return `Result` because they go through the pool's lock:
/// reading shares from inside a swap callback on the same pool fails with
/// [`AmmError::Locked`](crate::error::AmmError::Locked).
pub trait FungibleLedger {
    /// Total shares outstanding, including the locked minimum.
    ///
    /// # Errors
    ///
    /// Guard errors.
    fn total_supply(&self) -> Result<Liquidity>;

    /// Shares held by `holder`.
    ///
    /// # Errors
    ///
    /// Guard errors.
    fn balance_of(&self, holder: Address) -> Result<Liquidity>;

    /// Shares `spender` may move on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Guard errors.
    fn allowance(&self, owner: Address, spender: Address) -> Result<Liquidity>;

    /// Sets the allowance of `spender` over the caller's shares.
    ///
    /// # Errors
    ///
    /// Guard errors.
    fn approve(&self, ctx: &CallContext, spender: Address, value: Liquidity) -> Result<()>;

    /// Moves the caller's shares to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance).
    fn transfer(&self, ctx: &CallContext, to: Address, value: Liquidity) -> Result<()>;

    /// Moves `from`'s shares to `to`, spending the caller's allowance.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientAllowance`](crate::error::AmmError::InsufficientAllowance)
    /// or [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance).
    fn transfer_from(
        &self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        value: Liquidity,
    ) -> Result<()>;
}
