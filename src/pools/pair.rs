//! Constant-product pair (Uniswap V2 style).
//!
//! A pair holds two recorded reserves and issues fungible shares against
//! them. Assets live on an external [`AssetLedger`]: callers transfer
//! them to the pair's address first and then call an operation, which
//! infers the deposit from `balance − reserve`.
//!
//! # Swap Algorithm
//!
//! 1. Reject empty outputs, outputs not below the reserves, and
//!    recipients that are one of the pair's tokens.
//! 2. Transfer the requested outputs to the recipient.
//! 3. If the request carries data, call the [`SwapCallee`].
//! 4. Infer `amount_in = balance − (reserve − amount_out)` per token.
//! 5. Require the fee-adjusted product not to decrease:
//!
//! ```text
//! (b0·1000 − 3·in0) · (b1·1000 − 3·in1) ≥ r0 · r1 · 1000²
//! ```
//!
//! Every step runs inside the pair's lock and transfer journal, so a
//! failure at step 5 also returns the outputs sent at step 2.

use std::sync::OnceLock;

use super::guard::{PoolLock, ShareState};
use super::oracle::{PriceAccumulator, PriceObservation};
use super::protocol_fee::protocol_fee_shares;
use super::quote::{FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::domain::{
    Address, Amount, CallContext, Liquidity, PairReserves, PoolEvent, Reserve, Rounding,
    SwapOutcome, SwapRequest, TokenAmount, TokenPair,
};
use crate::error::{AmmError, Result};
use crate::ledger::LiquidityLedger;
use crate::math::{isqrt, mul_div, widening_mul, CheckedArithmetic, U256};
use crate::traits::{AssetLedger, Exchange, FeeSource, FungibleLedger, SwapCallback, SwapCallee};

/// Shares locked at the null address by the first mint of every pool.
pub const MINIMUM_LIQUIDITY: Liquidity = Liquidity::new(1_000);

#[derive(Debug, Clone, Default)]
struct PairState {
    reserve0: Reserve,
    reserve1: Reserve,
    oracle: PriceAccumulator,
    k_last: U256,
    shares: LiquidityLedger,
    events: Vec<PoolEvent>,
}

impl PairState {
    fn reserves(&self) -> PairReserves {
        PairReserves {
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            block_timestamp_last: self.oracle.block_timestamp_last(),
        }
    }

    fn update(
        &mut self,
        tokens: &TokenPair,
        balance0: Amount,
        balance1: Amount,
        block_timestamp: u32,
    ) -> Result<()> {
        let reserve0 = Reserve::try_from(balance0)?;
        let reserve1 = Reserve::try_from(balance1)?;
        self.oracle
            .accumulate(self.reserve0, self.reserve1, block_timestamp)?;
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.events.push(PoolEvent::ReservesSynced {
            reserves: vec![
                TokenAmount::new(tokens.first(), balance0),
                TokenAmount::new(tokens.second(), balance1),
            ],
        });
        Ok(())
    }

    /// Mints the protocol's share of `√k` growth; returns whether the fee
    /// is on.
    fn mint_protocol_fee(&mut self, fees: &dyn FeeSource) -> Result<bool> {
        let Some(recipient) = fees.fee_recipient() else {
            self.k_last = U256::zero();
            return Ok(false);
        };
        let owed = protocol_fee_shares(
            self.shares.total_supply(),
            self.reserve0,
            self.reserve1,
            self.k_last,
        )?;
        if !owed.is_zero() {
            let event = self.shares.mint(recipient, owed)?;
            self.events.push(event);
        }
        Ok(true)
    }

    fn record_k_last(&mut self, fee_on: bool) {
        if fee_on {
            self.k_last = widening_mul(self.reserve0.get(), self.reserve1.get());
        }
    }
}

impl ShareState for PairState {
    fn shares(&self) -> &LiquidityLedger {
        &self.shares
    }

    fn shares_mut(&mut self) -> &mut LiquidityLedger {
        &mut self.shares
    }

    fn events_mut(&mut self) -> &mut Vec<PoolEvent> {
        &mut self.events
    }
}

fn balances(assets: &dyn AssetLedger, tokens: &TokenPair, pool: Address) -> (Amount, Amount) {
    (
        assets.balance_of(tokens.first(), pool),
        assets.balance_of(tokens.second(), pool),
    )
}

/// `balance · 1000 − amount_in · 3`, the fee-adjusted side of the invariant.
fn adjusted_balance(balance: Amount, amount_in: Amount) -> Result<U256> {
    widening_mul(balance.get(), FEE_DENOMINATOR)
        .checked_sub(widening_mul(amount_in.get(), FEE_NUMERATOR))
        .ok_or(AmmError::Underflow("fee-adjusted balance"))
}

/// A constant-product pool over two tokens.
///
/// Created by the registry, which passes its own address as `registry`
/// and is then the only caller allowed to [`initialize`] the pair. A pair
/// is shared as `Arc<Pair>`; all mutation goes through its internal lock.
///
/// # Example
///
/// ```rust
/// use outcome_amm::domain::{Address, Amount, CallContext};
/// use outcome_amm::ledger::InMemoryAssetLedger;
/// use outcome_amm::pools::Pair;
/// use outcome_amm::traits::{AssetLedger, Exchange, FungibleLedger};
///
/// let registry = Address::from_bytes([0xfa; 32]);
/// let usd = Address::from_bytes([1u8; 32]);
/// let yes = Address::from_bytes([2u8; 32]);
/// let alice = Address::from_bytes([3u8; 32]);
///
/// let pair = Pair::new(Address::from_bytes([0xab; 32]), registry);
/// pair.initialize(&CallContext::new(registry, 0), yes, usd).expect("init");
///
/// let mut assets = InMemoryAssetLedger::new();
/// assets.deposit(usd, pair.address(), Amount::new(4_000)).expect("deposit");
/// assets.deposit(yes, pair.address(), Amount::new(9_000)).expect("deposit");
///
/// let ctx = CallContext::new(alice, 1_000);
/// let shares = pair.mint(&ctx, &None::<Address>, &mut assets, alice).expect("mint");
/// assert_eq!(shares.get(), 5_000);
/// assert_eq!(pair.total_supply().expect("supply").get(), 6_000);
/// ```
///
/// [`initialize`]: Exchange::initialize
#[derive(Debug)]
pub struct Pair {
    address: Address,
    registry: Address,
    tokens: OnceLock<TokenPair>,
    lock: PoolLock<PairState>,
}

impl Pair {
    /// Creates an uninitialized pair at `address`, owned by `registry`.
    #[must_use]
    pub fn new(address: Address, registry: Address) -> Self {
        Self {
            address,
            registry,
            tokens: OnceLock::new(),
            lock: PoolLock::new(PairState::default()),
        }
    }

    /// The pair's own address on the asset ledger.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The registry that created the pair.
    #[must_use]
    pub const fn registry(&self) -> Address {
        self.registry
    }

    /// Cumulative prices as of `ctx`, counting the time since the last
    /// update at the current reserves.
    ///
    /// # Errors
    ///
    /// [`AmmError::Locked`] during an operation on this pair.
    pub fn observe(&self, ctx: &CallContext) -> Result<PriceObservation> {
        self.lock.read(|state| {
            state
                .oracle
                .observe_at(state.reserve0, state.reserve1, ctx.block_timestamp())
        })
    }

    /// `reserve0 · reserve1` as of the last liquidity event while the
    /// protocol fee was on; zero otherwise.
    ///
    /// # Errors
    ///
    /// [`AmmError::Locked`] during an operation on this pair.
    pub fn k_last(&self) -> Result<U256> {
        self.lock.read(|state| Ok(state.k_last))
    }

    /// Takes every event recorded since the last drain.
    ///
    /// # Errors
    ///
    /// [`AmmError::Locked`] during an operation on this pair.
    pub fn drain_events(&self) -> Result<Vec<PoolEvent>> {
        self.lock.drain_events()
    }
}

impl Exchange for Pair {
    fn initialize(&self, ctx: &CallContext, token_a: Address, token_b: Address) -> Result<()> {
        if ctx.sender() != self.registry {
            return Err(AmmError::Unauthorized("only the registry may initialize a pair"));
        }
        if self.tokens.get().is_some() {
            return Err(AmmError::AlreadyInitialized);
        }
        let tokens = TokenPair::new(token_a, token_b)?;
        self.tokens
            .set(tokens)
            .map_err(|_| AmmError::AlreadyInitialized)?;
        tracing::debug!(
            pair = %self.address,
            token0 = %tokens.first(),
            token1 = %tokens.second(),
            "pair initialized"
        );
        Ok(())
    }

    fn mint(
        &self,
        ctx: &CallContext,
        fees: &dyn FeeSource,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<Liquidity> {
        let tokens = self.tokens()?;
        let pool = self.address;
        self.lock.transact(pool, assets, |state, assets| {
            let (balance0, balance1) = balances(assets, &tokens, pool);
            let amount0 = balance0.safe_sub(&state.reserve0.amount())?;
            let amount1 = balance1.safe_sub(&state.reserve1.amount())?;

            let fee_on = state.mint_protocol_fee(fees)?;
            let supply = state.shares.total_supply();
            let liquidity = if supply.is_zero() {
                let root = isqrt(widening_mul(amount0.get(), amount1.get()));
                let minted = root
                    .checked_sub(MINIMUM_LIQUIDITY.get())
                    .ok_or(AmmError::InsufficientLiquidityMinted)?;
                let event = state.shares.mint(Address::zero(), MINIMUM_LIQUIDITY)?;
                state.events.push(event);
                Liquidity::new(minted)
            } else {
                let by0 = mul_div(
                    amount0.get(),
                    supply.get(),
                    state.reserve0.get(),
                    Rounding::Down,
                )?;
                let by1 = mul_div(
                    amount1.get(),
                    supply.get(),
                    state.reserve1.get(),
                    Rounding::Down,
                )?;
                Liquidity::new(by0.min(by1))
            };
            if liquidity.is_zero() {
                return Err(AmmError::InsufficientLiquidityMinted);
            }

            let event = state.shares.mint(to, liquidity)?;
            state.events.push(event);
            state.update(&tokens, balance0, balance1, ctx.block_timestamp())?;
            state.record_k_last(fee_on);
            state.events.push(PoolEvent::LiquidityAdded {
                sender: ctx.sender(),
                to,
                deposits: vec![
                    TokenAmount::new(tokens.first(), amount0),
                    TokenAmount::new(tokens.second(), amount1),
                ],
                shares: liquidity,
            });
            tracing::debug!(
                pool = %pool,
                to = %to,
                amount0 = %amount0,
                amount1 = %amount1,
                shares = %liquidity,
                "liquidity added"
            );
            Ok(liquidity)
        })
    }

    fn burn(
        &self,
        ctx: &CallContext,
        fees: &dyn FeeSource,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<(Amount, Amount)> {
        let tokens = self.tokens()?;
        let pool = self.address;
        self.lock.transact(pool, assets, |state, assets| {
            let (balance0, balance1) = balances(assets, &tokens, pool);
            let liquidity = state.shares.balance_of(&pool);

            let fee_on = state.mint_protocol_fee(fees)?;
            let supply = state.shares.total_supply();
            if supply.is_zero() {
                return Err(AmmError::InsufficientLiquidityBurned);
            }
            let amount0 = Amount::new(mul_div(
                liquidity.get(),
                balance0.get(),
                supply.get(),
                Rounding::Down,
            )?);
            let amount1 = Amount::new(mul_div(
                liquidity.get(),
                balance1.get(),
                supply.get(),
                Rounding::Down,
            )?);
            if amount0.is_zero() || amount1.is_zero() {
                return Err(AmmError::InsufficientLiquidityBurned);
            }

            let event = state.shares.burn(pool, liquidity)?;
            state.events.push(event);
            assets.transfer(tokens.first(), pool, to, amount0)?;
            assets.transfer(tokens.second(), pool, to, amount1)?;

            let (balance0, balance1) = balances(assets, &tokens, pool);
            state.update(&tokens, balance0, balance1, ctx.block_timestamp())?;
            state.record_k_last(fee_on);
            state.events.push(PoolEvent::LiquidityRemoved {
                sender: ctx.sender(),
                to,
                withdrawals: vec![
                    TokenAmount::new(tokens.first(), amount0),
                    TokenAmount::new(tokens.second(), amount1),
                ],
                shares: liquidity,
            });
            tracing::debug!(
                pool = %pool,
                to = %to,
                amount0 = %amount0,
                amount1 = %amount1,
                shares = %liquidity,
                "liquidity removed"
            );
            Ok((amount0, amount1))
        })
    }

    fn swap(
        &self,
        ctx: &CallContext,
        assets: &mut dyn AssetLedger,
        request: SwapRequest<'_>,
        callee: Option<&mut dyn SwapCallee>,
    ) -> Result<SwapOutcome> {
        let tokens = self.tokens()?;
        let pool = self.address;
        let amount0_out = request.amount0_out();
        let amount1_out = request.amount1_out();
        let to = request.to();
        let data = request.data();

        self.lock.transact(pool, assets, |state, assets| {
            if amount0_out.is_zero() && amount1_out.is_zero() {
                return Err(AmmError::InsufficientOutputAmount);
            }
            if amount0_out >= state.reserve0.amount() || amount1_out >= state.reserve1.amount() {
                return Err(AmmError::InsufficientLiquidity);
            }
            if tokens.contains(&to) {
                return Err(AmmError::InvalidRecipient);
            }
            if !data.is_empty() && callee.is_none() {
                return Err(AmmError::MissingSwapCallee);
            }

            if !amount0_out.is_zero() {
                assets.transfer(tokens.first(), pool, to, amount0_out)?;
            }
            if !amount1_out.is_zero() {
                assets.transfer(tokens.second(), pool, to, amount1_out)?;
            }
            let outputs = [
                TokenAmount::new(tokens.first(), amount0_out),
                TokenAmount::new(tokens.second(), amount1_out),
            ];
            if let (false, Some(callee)) = (data.is_empty(), callee) {
                let callback = SwapCallback {
                    pool,
                    sender: ctx.sender(),
                    outputs,
                    data,
                };
                callee.on_swap(callback, assets)?;
            }

            let (balance0, balance1) = balances(assets, &tokens, pool);
            let floor0 = state.reserve0.amount().safe_sub(&amount0_out)?;
            let floor1 = state.reserve1.amount().safe_sub(&amount1_out)?;
            let amount0_in = balance0.excess_over(&floor0);
            let amount1_in = balance1.excess_over(&floor1);
            if amount0_in.is_zero() && amount1_in.is_zero() {
                return Err(AmmError::InsufficientInputAmount);
            }
            // Both balances must fit in 112 bits before the products below.
            Reserve::try_from(balance0)?;
            Reserve::try_from(balance1)?;

            let adjusted = adjusted_balance(balance0, amount0_in)?
                .checked_mul(adjusted_balance(balance1, amount1_in)?)
                .ok_or(AmmError::Overflow("fee-adjusted product"))?;
            let required = widening_mul(state.reserve0.get(), state.reserve1.get())
                .checked_mul(U256::from(FEE_DENOMINATOR * FEE_DENOMINATOR))
                .ok_or(AmmError::Overflow("reserve product"))?;
            if adjusted < required {
                return Err(AmmError::InvariantViolation);
            }

            state.update(&tokens, balance0, balance1, ctx.block_timestamp())?;
            let inputs = [
                TokenAmount::new(tokens.first(), amount0_in),
                TokenAmount::new(tokens.second(), amount1_in),
            ];
            state.events.push(PoolEvent::SwapExecuted {
                sender: ctx.sender(),
                to,
                inputs,
                outputs,
            });
            tracing::debug!(
                pool = %pool,
                to = %to,
                amount0_in = %amount0_in,
                amount1_in = %amount1_in,
                amount0_out = %amount0_out,
                amount1_out = %amount1_out,
                "swap executed"
            );
            Ok(SwapOutcome::new(inputs, outputs))
        })
    }

    fn skim(
        &self,
        _ctx: &CallContext,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<(Amount, Amount)> {
        let tokens = self.tokens()?;
        let pool = self.address;
        self.lock.transact(pool, assets, |state, assets| {
            let (balance0, balance1) = balances(assets, &tokens, pool);
            let excess0 = balance0.excess_over(&state.reserve0.amount());
            let excess1 = balance1.excess_over(&state.reserve1.amount());
            assets.transfer(tokens.first(), pool, to, excess0)?;
            assets.transfer(tokens.second(), pool, to, excess1)?;
            tracing::debug!(pool = %pool, to = %to, excess0 = %excess0, excess1 = %excess1, "skimmed");
            Ok((excess0, excess1))
        })
    }

    fn sync(&self, ctx: &CallContext, assets: &mut dyn AssetLedger) -> Result<()> {
        let tokens = self.tokens()?;
        let pool = self.address;
        self.lock.transact(pool, assets, |state, assets| {
            let (balance0, balance1) = balances(assets, &tokens, pool);
            state.update(&tokens, balance0, balance1, ctx.block_timestamp())?;
            tracing::debug!(pool = %pool, reserve0 = %balance0, reserve1 = %balance1, "synced");
            Ok(())
        })
    }

    fn tokens(&self) -> Result<TokenPair> {
        self.tokens.get().copied().ok_or(AmmError::NotInitialized)
    }

    fn reserves(&self) -> Result<PairReserves> {
        self.lock.read(|state| Ok(state.reserves()))
    }
}

impl FungibleLedger for Pair {
    fn total_supply(&self) -> Result<Liquidity> {
        self.lock.shares(LiquidityLedger::total_supply)
    }

    fn balance_of(&self, holder: Address) -> Result<Liquidity> {
        self.lock.shares(|shares| shares.balance_of(&holder))
    }

    fn allowance(&self, owner: Address, spender: Address) -> Result<Liquidity> {
        self.lock.shares(|shares| shares.allowance(&owner, &spender))
    }

    fn approve(&self, ctx: &CallContext, spender: Address, value: Liquidity) -> Result<()> {
        self.lock.move_shares(self.address, |shares| {
            Ok(shares.approve(ctx.sender(), spender, value))
        })
    }

    fn transfer(&self, ctx: &CallContext, to: Address, value: Liquidity) -> Result<()> {
        self.lock
            .move_shares(self.address, |shares| shares.transfer(ctx.sender(), to, value))
    }

    fn transfer_from(
        &self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        value: Liquidity,
    ) -> Result<()> {
        self.lock.move_shares(self.address, |shares| {
            shares.transfer_from(ctx.sender(), from, to, value)
        })
    }
}
