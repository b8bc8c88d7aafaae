//! Multi-outcome pool: N outcome tokens sharing one reference reserve.
//!
//! Each outcome token trades against the reference asset with the same
//! optimistic transfer, callback and fee-adjusted invariant as a
//! [`Pair`](super::Pair), restricted to the `(outcome, reference)`
//! reserves. The implied price of an outcome is
//!
//! ```text
//! price(o) = reserve(o) × precision / reference_reserve
//! ```
//!
//! Outcome tokens redeem 1:1 for the reference asset once the market
//! resolves, so the prices must never imply a joint probability above
//! certainty. Every mint, swap and sync is rejected with
//! [`AmmError::ProbabilityCeilingExceeded`] when the new `Σ price` would
//! exceed `precision`. When the reference asset leaves the pool in a
//! swap, the same rule is first applied to the state projected from the
//! smallest admissible outcome input, before anything is transferred.
//! A burn caps its reference payout so that no price rises.

use super::guard::{PoolLock, ShareState};
use super::pair::MINIMUM_LIQUIDITY;
use super::quote::{FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::config::MultiOutcomeConfig;
use crate::domain::{
    Address, Amount, CallContext, Liquidity, OutcomeSwapRequest, PoolEvent, Reserve, Rounding,
    SwapOutcome, TokenAmount,
};
use crate::error::{AmmError, Result};
use crate::ledger::LiquidityLedger;
use crate::math::{checked_div_ceil, mul_div, to_u128, widening_mul, CheckedArithmetic, U256};
use crate::traits::{AssetLedger, FungibleLedger, SwapCallback, SwapCallee};

#[derive(Debug, Clone, Default)]
struct MarketState {
    reference_reserve: Reserve,
    outcome_reserves: Vec<Reserve>,
    block_timestamp_last: u32,
    shares: LiquidityLedger,
    events: Vec<PoolEvent>,
}

impl ShareState for MarketState {
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

fn price_of(reserve: Reserve, reference: Reserve, precision: u128) -> Result<U256> {
    widening_mul(reserve.get(), precision)
        .checked_div(U256::from(reference.get()))
        .ok_or(AmmError::InsufficientLiquidity)
}

/// `Σ price(o)`; zero while the reference reserve is empty.
fn probability_sum(reference: Reserve, outcomes: &[Reserve], precision: u128) -> Result<U256> {
    if reference.is_zero() {
        return Ok(U256::zero());
    }
    outcomes.iter().try_fold(U256::zero(), |sum, reserve| {
        sum.checked_add(price_of(*reserve, reference, precision)?)
            .ok_or(AmmError::Overflow("probability sum"))
    })
}

fn check_ceiling(sum: U256, ceiling: U256) -> Result<()> {
    if sum > ceiling {
        return Err(AmmError::ProbabilityCeilingExceeded);
    }
    Ok(())
}

/// Smallest outcome input that lets `outcome_out` and `reference_out`
/// leave the pool when no reference asset comes in.
///
/// ```text
/// (r_o − out_o)·1000 + 997·in ≥ ⌈r_o · r_ref · 1000 / (r_ref − out_ref)⌉
/// ```
fn minimum_outcome_input(
    reserve_outcome: Reserve,
    reserve_reference: Reserve,
    outcome_out: Amount,
    reference_out: Amount,
) -> Result<Amount> {
    let remaining = U256::from(reserve_reference.get() - reference_out.get());
    let target = widening_mul(reserve_outcome.get(), reserve_reference.get())
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .and_then(|k| checked_div_ceil(k, remaining))
        .ok_or(AmmError::InsufficientLiquidity)?;
    let base = widening_mul(reserve_outcome.get() - outcome_out.get(), FEE_DENOMINATOR);
    let Some(gap) = target.checked_sub(base).filter(|g| !g.is_zero()) else {
        return Ok(Amount::ZERO);
    };
    checked_div_ceil(gap, U256::from(FEE_DENOMINATOR - FEE_NUMERATOR))
        .and_then(to_u128)
        .map(Amount::new)
        .ok_or(AmmError::Overflow("minimum outcome input"))
}

/// Largest reference payout of a burn that leaves no outcome price
/// higher than before: `x ≤ out_o · r_ref / r_o` for every outcome.
fn capped_reference_payout(
    pro_rata: u128,
    reference_balance: Amount,
    outcome_balances: &[Amount],
    outcome_payouts: &[Amount],
) -> Result<u128> {
    outcome_balances
        .iter()
        .zip(outcome_payouts)
        .try_fold(pro_rata, |cap, (balance, payout)| -> Result<u128> {
            let bound = mul_div(
                payout.get(),
                reference_balance.get(),
                balance.get(),
                Rounding::Down,
            )?;
            Ok(cap.min(bound))
        })
}

/// A pool of N outcome tokens priced against one reference asset.
///
/// # Example
///
/// ```rust
/// use outcome_amm::config::MultiOutcomeConfig;
/// use outcome_amm::domain::{Address, Amount, CallContext};
/// use outcome_amm::ledger::InMemoryAssetLedger;
/// use outcome_amm::math::U256;
/// use outcome_amm::pools::MultiOutcomePool;
///
/// let usd = Address::from_bytes([1u8; 32]);
/// let yes = Address::from_bytes([2u8; 32]);
/// let no = Address::from_bytes([3u8; 32]);
/// let lp = Address::from_bytes([4u8; 32]);
///
/// let registry = Address::from_bytes([0xee; 32]);
///
/// let config = MultiOutcomeConfig::new(usd, vec![yes, no]).expect("valid");
/// let pool = MultiOutcomePool::new(
///     &CallContext::new(registry, 0),
///     Address::from_bytes([0xcc; 32]),
///     registry,
///     &config,
/// )
/// .expect("pool");
///
/// let mut assets = InMemoryAssetLedger::new();
/// assets.deposit(usd, pool.address(), Amount::new(10_000)).expect("deposit");
/// assets.deposit(yes, pool.address(), Amount::new(4_000)).expect("deposit");
/// assets.deposit(no, pool.address(), Amount::new(5_000)).expect("deposit");
///
/// let shares = pool.mint(&CallContext::new(lp, 0), &mut assets, lp).expect("mint");
/// assert_eq!(shares.get(), 9_000);
/// assert_eq!(
///     pool.total_probability().expect("sum"),
///     U256::from(900_000_000_000_000_000u128)
/// );
/// ```
#[derive(Debug)]
pub struct MultiOutcomePool {
    address: Address,
    registry: Address,
    reference: Address,
    outcomes: Vec<Address>,
    precision: u128,
    lock: PoolLock<MarketState>,
}

impl MultiOutcomePool {
    /// Creates an empty pool at `address` for the configured market.
    /// Only `registry` itself may create it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller is not `registry`.
    /// - [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(
        ctx: &CallContext,
        address: Address,
        registry: Address,
        config: &MultiOutcomeConfig,
    ) -> Result<Self> {
        if ctx.sender() != registry {
            return Err(AmmError::Unauthorized(
                "only the registry may create a market pool",
            ));
        }
        config.validate()?;
        let state = MarketState {
            outcome_reserves: vec![Reserve::ZERO; config.outcomes().len()],
            ..MarketState::default()
        };
        Ok(Self {
            address,
            registry,
            reference: config.reference(),
            outcomes: config.outcomes().to_vec(),
            precision: config.precision(),
            lock: PoolLock::new(state),
        })
    }

    /// The pool's own address on the asset ledger.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The registry that created the pool.
    #[must_use]
    pub const fn registry(&self) -> Address {
        self.registry
    }

    /// The reference asset.
    #[must_use]
    pub const fn reference(&self) -> Address {
        self.reference
    }

    /// Outcome tokens, sorted by address.
    #[must_use]
    pub fn outcomes(&self) -> &[Address] {
        &self.outcomes
    }

    /// Fixed-point unit of prices.
    #[must_use]
    pub const fn precision(&self) -> u128 {
        self.precision
    }

    /// Upper bound of `Σ price`: certainty in the pool's precision.
    #[must_use]
    pub fn probability_ceiling(&self) -> U256 {
        U256::from(self.precision)
    }

    fn outcome_index(&self, token: &Address) -> Result<usize> {
        self.outcomes
            .binary_search(token)
            .map_err(|_| AmmError::InvalidToken("token is not an outcome of this pool"))
    }

    fn holds(&self, token: &Address) -> bool {
        *token == self.reference || self.outcomes.binary_search(token).is_ok()
    }

    fn balances(&self, assets: &dyn AssetLedger) -> (Amount, Vec<Amount>) {
        let reference = assets.balance_of(self.reference, self.address);
        let outcomes = self
            .outcomes
            .iter()
            .map(|token| assets.balance_of(*token, self.address))
            .collect();
        (reference, outcomes)
    }

    /// Pairs the reference amount and per-outcome amounts with their tokens,
    /// reference first.
    fn tagged(&self, reference: Amount, outcomes: &[Amount]) -> Vec<TokenAmount> {
        std::iter::once(TokenAmount::new(self.reference, reference))
            .chain(
                self.outcomes
                    .iter()
                    .zip(outcomes)
                    .map(|(token, amount)| TokenAmount::new(*token, *amount)),
            )
            .collect()
    }

    fn record_reserves(&self, state: &mut MarketState, block_timestamp: u32) {
        let outcomes: Vec<Amount> = state.outcome_reserves.iter().map(Reserve::amount).collect();
        state.block_timestamp_last = block_timestamp;
        state.events.push(PoolEvent::ReservesSynced {
            reserves: self.tagged(state.reference_reserve.amount(), &outcomes),
        });
    }

    fn write_reserves(
        &self,
        state: &mut MarketState,
        reference: Amount,
        outcomes: &[Amount],
        block_timestamp: u32,
    ) -> Result<()> {
        let reference = Reserve::try_from(reference)?;
        let outcomes = outcomes
            .iter()
            .map(|amount| Reserve::try_from(*amount))
            .collect::<Result<Vec<_>>>()?;
        let sum = probability_sum(reference, &outcomes, self.precision)?;
        check_ceiling(sum, self.probability_ceiling())?;
        state.reference_reserve = reference;
        state.outcome_reserves = outcomes;
        self.record_reserves(state, block_timestamp);
        Ok(())
    }

    /// Every recorded reserve, reference first.
    ///
    /// # Errors
    ///
    /// [`AmmError::Locked`] during an operation on this pool.
    pub fn reserves(&self) -> Result<Vec<TokenAmount>> {
        self.lock.read(|state| {
            let outcomes: Vec<Amount> = state.outcome_reserves.iter().map(Reserve::amount).collect();
            Ok(self.tagged(state.reference_reserve.amount(), &outcomes))
        })
    }

    /// Implied price of `outcome`, in units of [`precision`](Self::precision).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `outcome` is not traded here.
    /// - [`AmmError::InsufficientLiquidity`] while the pool is empty.
    pub fn price(&self, outcome: &Address) -> Result<U256> {
        let index = self.outcome_index(outcome)?;
        self.lock.read(|state| {
            price_of(
                state.outcome_reserves[index],
                state.reference_reserve,
                self.precision,
            )
        })
    }

    /// Implied price of every outcome, in outcome order.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidity`] while the pool is empty.
    pub fn prices(&self) -> Result<Vec<(Address, U256)>> {
        self.lock.read(|state| {
            self.outcomes
                .iter()
                .zip(&state.outcome_reserves)
                .map(|(token, reserve)| -> Result<(Address, U256)> {
                    Ok((*token, price_of(*reserve, state.reference_reserve, self.precision)?))
                })
                .collect()
        })
    }

    /// `Σ price(o)` over every outcome; zero while the pool is empty.
    ///
    /// # Errors
    ///
    /// [`AmmError::Locked`] during an operation on this pool.
    pub fn total_probability(&self) -> Result<U256> {
        self.lock.read(|state| {
            probability_sum(state.reference_reserve, &state.outcome_reserves, self.precision)
        })
    }

    /// Takes every event recorded since the last drain.
    ///
    /// # Errors
    ///
    /// [`AmmError::Locked`] during an operation on this pool.
    pub fn drain_events(&self) -> Result<Vec<PoolEvent>> {
        self.lock.drain_events()
    }

    /// Mints shares to `to` for every asset deposited since the last update.
    ///
    /// The first mint needs a deposit of every asset; it mints
    /// `reference_deposit − 1000` shares and locks 1000 at the null
    /// address. Later mints pay the smallest proportional claim over all
    /// N + 1 assets.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityMinted`] if the deposit is worth
    ///   no shares.
    /// - [`AmmError::ProbabilityCeilingExceeded`] if the new reserves price
    ///   the outcomes above certainty.
    pub fn mint(
        &self,
        ctx: &CallContext,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<Liquidity> {
        let pool = self.address;
        self.lock.transact(pool, assets, |state, assets| {
            let (reference_balance, outcome_balances) = self.balances(assets);
            let reference_deposit = reference_balance.safe_sub(&state.reference_reserve.amount())?;
            let outcome_deposits = outcome_balances
                .iter()
                .zip(&state.outcome_reserves)
                .map(|(balance, reserve)| balance.safe_sub(&reserve.amount()))
                .collect::<Result<Vec<_>>>()?;

            let supply = state.shares.total_supply();
            let liquidity = if supply.is_zero() {
                if outcome_deposits.iter().any(Amount::is_zero) {
                    return Err(AmmError::InsufficientLiquidityMinted);
                }
                let minted = reference_deposit
                    .get()
                    .checked_sub(MINIMUM_LIQUIDITY.get())
                    .ok_or(AmmError::InsufficientLiquidityMinted)?;
                let event = state.shares.mint(Address::zero(), MINIMUM_LIQUIDITY)?;
                state.events.push(event);
                Liquidity::new(minted)
            } else {
                let mut claim = mul_div(
                    reference_deposit.get(),
                    supply.get(),
                    state.reference_reserve.get(),
                    Rounding::Down,
                )?;
                for (deposit, reserve) in outcome_deposits.iter().zip(&state.outcome_reserves) {
                    let by_outcome =
                        mul_div(deposit.get(), supply.get(), reserve.get(), Rounding::Down)?;
                    claim = claim.min(by_outcome);
                }
                Liquidity::new(claim)
            };
            if liquidity.is_zero() {
                return Err(AmmError::InsufficientLiquidityMinted);
            }

            let event = state.shares.mint(to, liquidity)?;
            state.events.push(event);
            self.write_reserves(
                state,
                reference_balance,
                &outcome_balances,
                ctx.block_timestamp(),
            )?;
            state.events.push(PoolEvent::LiquidityAdded {
                sender: ctx.sender(),
                to,
                deposits: self.tagged(reference_deposit, &outcome_deposits),
                shares: liquidity,
            });
            tracing::debug!(
                pool = %pool,
                to = %to,
                reference = %reference_deposit,
                shares = %liquidity,
                "market liquidity added"
            );
            Ok(liquidity)
        })
    }

    /// Burns the shares held by the pool itself and pays every asset to
    /// `to` in proportion. Returns the payouts, reference first.
    ///
    /// Outcome payouts are pro rata. The reference payout is pro rata
    /// too, but never more than `out_o · r_ref / r_o` for any outcome, so
    /// floor rounding cannot raise an outcome price. The remainder stays
    /// with the other liquidity providers.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityBurned`] if any payout is zero.
    /// - [`AmmError::ProbabilityCeilingExceeded`] if unsynced donations
    ///   already price the outcomes above certainty; skim them first.
    pub fn burn(
        &self,
        ctx: &CallContext,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<Vec<TokenAmount>> {
        let pool = self.address;
        self.lock.transact(pool, assets, |state, assets| {
            let (reference_balance, outcome_balances) = self.balances(assets);
            let liquidity = state.shares.balance_of(&pool);
            let supply = state.shares.total_supply();
            if supply.is_zero() {
                return Err(AmmError::InsufficientLiquidityBurned);
            }

            let share_of = |held: Amount| -> Result<Amount> {
                let amount = mul_div(liquidity.get(), held.get(), supply.get(), Rounding::Down)?;
                if amount == 0 {
                    return Err(AmmError::InsufficientLiquidityBurned);
                }
                Ok(Amount::new(amount))
            };
            let outcome_payouts = outcome_balances
                .iter()
                .map(|held| share_of(*held))
                .collect::<Result<Vec<_>>>()?;
            let reference_payout = capped_reference_payout(
                share_of(reference_balance)?.get(),
                reference_balance,
                &outcome_balances,
                &outcome_payouts,
            )?;
            if reference_payout == 0 {
                return Err(AmmError::InsufficientLiquidityBurned);
            }
            let payouts = self.tagged(Amount::new(reference_payout), &outcome_payouts);

            let event = state.shares.burn(pool, liquidity)?;
            state.events.push(event);
            for payout in &payouts {
                assets.transfer(payout.token, pool, to, payout.amount)?;
            }

            let (reference_balance, outcome_balances) = self.balances(assets);
            self.write_reserves(
                state,
                reference_balance,
                &outcome_balances,
                ctx.block_timestamp(),
            )?;
            state.events.push(PoolEvent::LiquidityRemoved {
                sender: ctx.sender(),
                to,
                withdrawals: payouts.clone(),
                shares: liquidity,
            });
            tracing::debug!(pool = %pool, to = %to, shares = %liquidity, "market liquidity removed");
            Ok(payouts)
        })
    }

    /// Trades one outcome token against the reference asset.
    ///
    /// # Errors
    ///
    /// In order of evaluation:
    ///
    /// 1. [`AmmError::InvalidToken`] for an unknown outcome.
    /// 2. [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
    /// 3. [`AmmError::InsufficientLiquidity`] if an output is not below
    ///    its reserve.
    /// 4. [`AmmError::InvalidRecipient`] if `to` is one of the pool's assets.
    /// 5. [`AmmError::MissingSwapCallee`] if data is given without a callee.
    /// 6. [`AmmError::ProbabilityCeilingExceeded`] if the reference asset
    ///    leaves the pool and even the smallest admissible input breaks
    ///    the ceiling. Nothing has been transferred at this point.
    /// 7. [`AmmError::InsufficientInputAmount`],
    ///    [`AmmError::ReserveOverflow`], [`AmmError::InvariantViolation`]
    ///    and [`AmmError::ProbabilityCeilingExceeded`] after the transfer
    ///    and callback, all reverted.
    pub fn swap(
        &self,
        ctx: &CallContext,
        assets: &mut dyn AssetLedger,
        request: OutcomeSwapRequest<'_>,
        callee: Option<&mut dyn SwapCallee>,
    ) -> Result<SwapOutcome> {
        let pool = self.address;
        let outcome = request.outcome();
        let index = self.outcome_index(&outcome)?;
        let outcome_out = request.outcome_out();
        let reference_out = request.reference_out();
        let to = request.to();
        let data = request.data();

        self.lock.transact(pool, assets, |state, assets| {
            if outcome_out.is_zero() && reference_out.is_zero() {
                return Err(AmmError::InsufficientOutputAmount);
            }
            let reserve_outcome = state.outcome_reserves[index];
            let reserve_reference = state.reference_reserve;
            if outcome_out >= reserve_outcome.amount() || reference_out >= reserve_reference.amount()
            {
                return Err(AmmError::InsufficientLiquidity);
            }
            if self.holds(&to) {
                return Err(AmmError::InvalidRecipient);
            }
            if !data.is_empty() && callee.is_none() {
                return Err(AmmError::MissingSwapCallee);
            }

            let ceiling = self.probability_ceiling();
            if !reference_out.is_zero() {
                let minimum_in =
                    minimum_outcome_input(reserve_outcome, reserve_reference, outcome_out, reference_out)?;
                let mut projected = state.outcome_reserves.clone();
                projected[index] = Reserve::try_from(
                    reserve_outcome
                        .amount()
                        .safe_sub(&outcome_out)?
                        .safe_add(&minimum_in)?,
                )?;
                let projected_reference = Reserve::try_from(
                    reserve_reference.amount().safe_sub(&reference_out)?,
                )?;
                let projected_sum = probability_sum(projected_reference, &projected, self.precision)?;
                check_ceiling(projected_sum, ceiling)?;
            }

            if !outcome_out.is_zero() {
                assets.transfer(outcome, pool, to, outcome_out)?;
            }
            if !reference_out.is_zero() {
                assets.transfer(self.reference, pool, to, reference_out)?;
            }
            let outputs = [
                TokenAmount::new(outcome, outcome_out),
                TokenAmount::new(self.reference, reference_out),
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

            let balance_outcome = assets.balance_of(outcome, pool);
            let balance_reference = assets.balance_of(self.reference, pool);
            let floor_outcome = reserve_outcome.amount().safe_sub(&outcome_out)?;
            let floor_reference = reserve_reference.amount().safe_sub(&reference_out)?;
            let outcome_in = balance_outcome.excess_over(&floor_outcome);
            let reference_in = balance_reference.excess_over(&floor_reference);
            if outcome_in.is_zero() && reference_in.is_zero() {
                return Err(AmmError::InsufficientInputAmount);
            }
            let new_outcome = Reserve::try_from(balance_outcome)?;
            let new_reference = Reserve::try_from(balance_reference)?;

            let adjusted = |balance: Amount, amount_in: Amount| {
                widening_mul(balance.get(), FEE_DENOMINATOR)
                    .checked_sub(widening_mul(amount_in.get(), FEE_NUMERATOR))
                    .ok_or(AmmError::Underflow("fee-adjusted balance"))
            };
            let product = adjusted(balance_outcome, outcome_in)?
                .checked_mul(adjusted(balance_reference, reference_in)?)
                .ok_or(AmmError::Overflow("fee-adjusted product"))?;
            let required = widening_mul(reserve_outcome.get(), reserve_reference.get())
                .checked_mul(U256::from(FEE_DENOMINATOR * FEE_DENOMINATOR))
                .ok_or(AmmError::Overflow("reserve product"))?;
            if product < required {
                return Err(AmmError::InvariantViolation);
            }

            let mut outcome_reserves = state.outcome_reserves.clone();
            outcome_reserves[index] = new_outcome;
            let after = probability_sum(new_reference, &outcome_reserves, self.precision)?;
            check_ceiling(after, ceiling)?;

            state.reference_reserve = new_reference;
            state.outcome_reserves = outcome_reserves;
            self.record_reserves(state, ctx.block_timestamp());
            let inputs = [
                TokenAmount::new(outcome, outcome_in),
                TokenAmount::new(self.reference, reference_in),
            ];
            state.events.push(PoolEvent::SwapExecuted {
                sender: ctx.sender(),
                to,
                inputs,
                outputs,
            });
            tracing::debug!(
                pool = %pool,
                outcome = %outcome,
                outcome_in = %outcome_in,
                reference_in = %reference_in,
                outcome_out = %outcome_out,
                reference_out = %reference_out,
                probability = %after,
                "outcome swap executed"
            );
            Ok(SwapOutcome::new(inputs, outputs))
        })
    }

    /// Sends balances in excess of the reserves to `to`, reference first.
    ///
    /// # Errors
    ///
    /// Transfer and guard errors.
    pub fn skim(
        &self,
        _ctx: &CallContext,
        assets: &mut dyn AssetLedger,
        to: Address,
    ) -> Result<Vec<TokenAmount>> {
        let pool = self.address;
        self.lock.transact(pool, assets, |state, assets| {
            let (reference_balance, outcome_balances) = self.balances(assets);
            let reserves = std::iter::once(state.reference_reserve)
                .chain(state.outcome_reserves.iter().copied());
            let excess = self
                .tagged(reference_balance, &outcome_balances)
                .into_iter()
                .zip(reserves)
                .map(|(held, reserve)| {
                    TokenAmount::new(held.token, held.amount.excess_over(&reserve.amount()))
                })
                .collect::<Vec<_>>();
            for surplus in &excess {
                assets.transfer(surplus.token, pool, to, surplus.amount)?;
            }
            tracing::debug!(pool = %pool, to = %to, "market skimmed");
            Ok(excess)
        })
    }

    /// Sets every reserve to the current balance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReserveOverflow`] if a balance exceeds 112 bits.
    /// - [`AmmError::ProbabilityCeilingExceeded`] if the balances price
    ///   the outcomes above certainty.
    pub fn sync(&self, ctx: &CallContext, assets: &mut dyn AssetLedger) -> Result<()> {
        let pool = self.address;
        self.lock.transact(pool, assets, |state, assets| {
            let (reference_balance, outcome_balances) = self.balances(assets);
            self.write_reserves(
                state,
                reference_balance,
                &outcome_balances,
                ctx.block_timestamp(),
            )?;
            tracing::debug!(pool = %pool, reference = %reference_balance, "market synced");
            Ok(())
        })
    }
}

impl FungibleLedger for MultiOutcomePool {
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
