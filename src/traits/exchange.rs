//! Core exchange operations of a two-token pool.
//!
//! [`Exchange`] covers the full lifecycle of a pair:
//!
//! 1. **Bind**: [`Exchange::initialize`] fixes the two tokens, once.
//! 2. **Provide**: [`Exchange::mint`] turns deposited assets into shares.
//! 3. **Withdraw**: [`Exchange::burn`] redeems shares sent to the pool.
//! 4. **Trade**: [`Exchange::swap`] sends outputs and verifies inputs.
//! 5. **Reconcile**: [`Exchange::skim`] and [`Exchange::sync`] resolve
//!    differences between balances and recorded reserves.
//!
//! # Atomicity
//!
//! Every operation either commits all of its effects (state, asset
//! transfers, events) or none of them. Implementations must also reject
//! a nested call on the same pool with
//! [`AmmError::Locked`](crate::error::AmmError::Locked).

use crate::domain::{
    Address, Amount, CallContext, Liquidity, PairReserves, SwapOutcome, SwapRequest, TokenPair,
};
use crate::error::Result;
use crate::traits::{AssetLedger, FeeSource, SwapCallee};

/// Exchange operations of a constant-product pair.
pub trait Exchange {
    /// Binds the pool to its tokens.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if `ctx.sender()` is not the registry.
    /// - [`AmmError::AlreadyInitialized`] on a second call.
    /// - Any [`TokenPair::new`] error.
    ///
    /// [`AmmError::Unauthorized`]: crate::error::AmmError::Unauthorized
    /// [`AmmError::AlreadyInitialized`]: crate::error::AmmError::AlreadyInitialized
    fn initialize(&self, ctx: &CallContext, token_a: Address, token_b: Address) -> Result<()>;

    /// Mints shares to `to` for assets deposited since the last update.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidityMinted`] when the deposit is worth
    /// no shares, plus arithmetic and guard errors.
    ///
    /// [`AmmError::InsufficientLiquidityMinted`]: crate::error::AmmError::InsufficientLiquidityMinted
    fn mint(
        &self,
        ctx: &CallContext,
        fees: &dyn FeeSource,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<Liquidity>;

    /// Burns the shares held by the pool itself and pays both assets to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidityBurned`] when either payout is zero.
    ///
    /// [`AmmError::InsufficientLiquidityBurned`]: crate::error::AmmError::InsufficientLiquidityBurned
    fn burn(
        &self,
        ctx: &CallContext,
        fees: &dyn FeeSource,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<(Amount, Amount)>;

    /// Executes a swap, optionally calling `callee` between the output
    /// transfer and the invariant check.
    ///
    /// # Errors
    ///
    /// See the pair documentation for the ordered list of checks.
    fn swap(
        &self,
        ctx: &CallContext,
        assets: &mut dyn AssetLedger,
        request: SwapRequest<'_>,
        callee: Option<&mut dyn SwapCallee>,
    ) -> Result<SwapOutcome>;

    /// Sends balances in excess of the reserves to `to`.
    ///
    /// # Errors
    ///
    /// Transfer and guard errors.
    fn skim(
        &self,
        ctx: &CallContext,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<(Amount, Amount)>;

    /// Sets the reserves to the current balances.
    ///
    /// # Errors
    ///
    /// [`AmmError::ReserveOverflow`](crate::error::AmmError::ReserveOverflow)
    /// if a balance exceeds 112 bits, plus guard errors.
    fn sync(&self, ctx: &CallContext, assets: &mut dyn AssetLedger) -> Result<()>;

    /// The pool's tokens.
    ///
    /// # Errors
    ///
    /// [`AmmError::NotInitialized`](crate::error::AmmError::NotInitialized)
    /// before `initialize`.
    fn tokens(&self) -> Result<TokenPair>;

    /// Recorded reserves and the timestamp of their last update.
    ///
    /// # Errors
    ///
    /// [`AmmError::Locked`](crate::error::AmmError::Locked) while an
    /// operation is in progress.
    fn reserves(&self) -> Result<PairReserves>;
}
