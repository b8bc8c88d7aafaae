//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Invariant preservation**: `reserve0 × reserve1` never decreases
//!    across a quoted swap.
//! 2. **Quote tightness**: one unit past the quoted output is rejected.
//! 3. **Swap reversibility**: a round trip A→B→A returns at most the input.
//! 4. **Quote monotonicity**: a larger input never quotes a smaller output.
//! 5. **First mint**: shares are `isqrt(a·b) − 1000`.
//! 6. **Liquidity conservation**: mint then burn returns the deposit less
//!    the locked share, within rounding.
//! 7. **Probability ceiling**: a multi-outcome sale never leaves the sum of
//!    prices above certainty.
//! 8. **Burn keeps prices**: a multi-outcome burn never raises the sum of
//!    prices, even from a pool priced exactly at certainty.

use proptest::prelude::*;

use super::{quote_amount_in, quote_amount_out, Pair, MINIMUM_LIQUIDITY};
use crate::domain::{Address, Amount, CallContext, Liquidity, Reserve, SwapRequest};
use crate::error::AmmError;
use crate::ledger::InMemoryAssetLedger;
use crate::math::{isqrt, widening_mul};
use crate::traits::{AssetLedger, Exchange, FungibleLedger};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const REGISTRY: Address = Address::from_bytes([0xee; 32]);
const POOL: Address = Address::from_bytes([0xcc; 32]);
const TOKEN_A: Address = Address::from_bytes([1u8; 32]);
const TOKEN_B: Address = Address::from_bytes([2u8; 32]);
const LP: Address = Address::from_bytes([0xa1; 32]);
const TRADER: Address = Address::from_bytes([0xb0; 32]);
const FEE_OFF: Option<Address> = None;
const FUNDING: u128 = 1_000_000_000_000;

fn ctx(sender: Address) -> CallContext {
    CallContext::new(sender, 1_000)
}

fn funded(tokens: &[Address]) -> InMemoryAssetLedger {
    let mut assets = InMemoryAssetLedger::new();
    for holder in [LP, TRADER] {
        for token in tokens {
            let Ok(()) = assets.deposit(*token, holder, Amount::new(FUNDING)) else {
                panic!("valid deposit");
            };
        }
    }
    assets
}

fn seeded_pair(a: u128, b: u128) -> (Pair, InMemoryAssetLedger, Liquidity) {
    let pair = Pair::new(POOL, REGISTRY);
    let Ok(()) = pair.initialize(&ctx(REGISTRY), TOKEN_A, TOKEN_B) else {
        panic!("valid initialization");
    };
    let mut assets = funded(&[TOKEN_A, TOKEN_B]);
    let Ok(()) = assets.transfer(TOKEN_A, LP, POOL, Amount::new(a)) else {
        panic!("valid transfer");
    };
    let Ok(()) = assets.transfer(TOKEN_B, LP, POOL, Amount::new(b)) else {
        panic!("valid transfer");
    };
    let Ok(shares) = pair.mint(&ctx(LP), &FEE_OFF, &mut assets, LP) else {
        panic!("valid first mint");
    };
    (pair, assets, shares)
}

fn pair_reserves(pair: &Pair) -> (Reserve, Reserve) {
    let Ok(r) = pair.reserves() else {
        panic!("unlocked pair");
    };
    (r.reserve0, r.reserve1)
}

/// Sells `amount_in` of `token_in` at the quoted price.
fn sell(
    pair: &Pair,
    assets: &mut InMemoryAssetLedger,
    token_in: Address,
    amount_in: u128,
) -> Result<Amount, AmmError> {
    let (r0, r1) = pair_reserves(pair);
    let zero_for_one = token_in == TOKEN_A;
    let (reserve_in, reserve_out) = if zero_for_one { (r0, r1) } else { (r1, r0) };
    let out = quote_amount_out(Amount::new(amount_in), reserve_in, reserve_out)?;
    assets.transfer(token_in, TRADER, POOL, Amount::new(amount_in))?;
    let request = if zero_for_one {
        SwapRequest::new(Amount::ZERO, out, TRADER)
    } else {
        SwapRequest::new(out, Amount::ZERO, TRADER)
    };
    pair.swap(&ctx(TRADER), assets, request, None)?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Input as a fraction (in basis points) of the input reserve.
fn input_bps_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

// ---------------------------------------------------------------------------
// Pair properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_never_decreases_product(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        bps in input_bps_strategy(),
    ) {
        let (pair, mut assets, _) = seeded_pair(ra, rb);
        let amount_in = (ra * bps / 10_000).max(1);
        let (b0, b1) = pair_reserves(&pair);
        let before = widening_mul(b0.get(), b1.get());
        let Ok(_) = sell(&pair, &mut assets, TOKEN_A, amount_in) else {
            return Ok(());
        };
        let (a0, a1) = pair_reserves(&pair);
        let after = widening_mul(a0.get(), a1.get());
        prop_assert!(after >= before, "product decreased: {} < {}", after, before);
    }

    #[test]
    fn prop_quote_is_tight(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        bps in input_bps_strategy(),
    ) {
        let (pair, mut assets, _) = seeded_pair(ra, rb);
        let amount_in = (ra * bps / 10_000).max(1);
        let (r0, r1) = pair_reserves(&pair);
        let Ok(out) = quote_amount_out(Amount::new(amount_in), r0, r1) else {
            return Ok(());
        };
        let Ok(()) = assets.transfer(TOKEN_A, TRADER, POOL, Amount::new(amount_in)) else {
            panic!("funded trader");
        };
        let greedy = SwapRequest::new(Amount::ZERO, Amount::new(out.get() + 1), TRADER);
        let result = pair.swap(&ctx(TRADER), &mut assets, greedy, None);
        prop_assert!(
            matches!(
                result,
                Err(AmmError::InvariantViolation | AmmError::InsufficientLiquidity)
            ),
            "greedy output accepted: {:?}",
            result
        );
        prop_assert_eq!(pair_reserves(&pair), (r0, r1));
    }

    #[test]
    fn prop_swap_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        bps in input_bps_strategy(),
    ) {
        let (pair, mut assets, _) = seeded_pair(ra, rb);
        let amount_in = (ra * bps / 10_000).max(1);
        let Ok(received) = sell(&pair, &mut assets, TOKEN_A, amount_in) else {
            return Ok(());
        };
        if received.is_zero() {
            return Ok(());
        }
        let Ok(returned) = sell(&pair, &mut assets, TOKEN_B, received.get()) else {
            return Ok(());
        };
        prop_assert!(
            returned.get() <= amount_in,
            "round-trip should lose value: final={} > original={}",
            returned, amount_in
        );
    }

    #[test]
    fn prop_quote_monotone_in_input(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        small in 1u128..=100_000u128,
        extra in 0u128..=100_000u128,
    ) {
        let Ok(reserve_in) = Reserve::new(ra) else { panic!("fits") };
        let Ok(reserve_out) = Reserve::new(rb) else { panic!("fits") };
        let Ok(low) = quote_amount_out(Amount::new(small), reserve_in, reserve_out) else {
            return Ok(());
        };
        let Ok(high) = quote_amount_out(Amount::new(small + extra), reserve_in, reserve_out) else {
            return Ok(());
        };
        prop_assert!(high >= low, "quote not monotone: {} < {}", high, low);

        if low < reserve_out.amount() && !low.is_zero() {
            let Ok(cost) = quote_amount_in(low, reserve_in, reserve_out) else {
                return Ok(());
            };
            // Exact inverse up to the rounding unit added by the input quote.
            prop_assert!(cost.get() <= small + 1, "input quote {} above {}", cost, small);
        }
    }

    #[test]
    fn prop_first_mint_is_geometric_mean(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let (pair, _, shares) = seeded_pair(ra, rb);
        let root = isqrt(widening_mul(ra, rb));
        prop_assert_eq!(shares.get(), root - MINIMUM_LIQUIDITY.get());
        prop_assert_eq!(pair.total_supply(), Ok(Liquidity::new(root)));
    }

    #[test]
    fn prop_mint_burn_returns_deposit(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let (pair, mut assets, shares) = seeded_pair(ra, rb);
        let Ok(()) = pair.transfer(&ctx(LP), POOL, shares) else {
            panic!("LP holds its shares");
        };
        let Ok((out0, out1)) = pair.burn(&ctx(LP), &FEE_OFF, &mut assets, LP) else {
            panic!("burn of minted shares");
        };
        let root = isqrt(widening_mul(ra, rb));
        for (deposit, payout) in [(ra, out0.get()), (rb, out1.get())] {
            let locked = deposit * MINIMUM_LIQUIDITY.get() / root;
            prop_assert!(payout <= deposit);
            prop_assert!(
                payout + locked + 1 >= deposit,
                "payout {} too far below deposit {}",
                payout, deposit
            );
        }
        prop_assert_eq!(pair.total_supply(), Ok(MINIMUM_LIQUIDITY));
    }
}

// ---------------------------------------------------------------------------
// Multi-outcome properties
// ---------------------------------------------------------------------------

#[cfg(feature = "multi-outcome")]
mod multi_outcome {
    use super::*;
    use crate::config::MultiOutcomeConfig;
    use crate::domain::OutcomeSwapRequest;
    use crate::pools::MultiOutcomePool;

    const USD: Address = Address::from_bytes([3u8; 32]);
    const YES: Address = Address::from_bytes([4u8; 32]);
    const NO: Address = Address::from_bytes([5u8; 32]);
    const REFERENCE_SEED: u128 = 10_000;

    fn seeded_market(yes: u128, no: u128) -> (MultiOutcomePool, InMemoryAssetLedger) {
        let Ok(config) = MultiOutcomeConfig::new(USD, vec![YES, NO]) else {
            panic!("valid config");
        };
        let Ok(pool) = MultiOutcomePool::new(&ctx(REGISTRY), POOL, REGISTRY, &config) else {
            panic!("valid pool");
        };
        let mut assets = funded(&[USD, YES, NO]);
        for (token, amount) in [(USD, REFERENCE_SEED), (YES, yes), (NO, no)] {
            let Ok(()) = assets.transfer(token, LP, POOL, Amount::new(amount)) else {
                panic!("valid transfer");
            };
        }
        let Ok(_) = pool.mint(&ctx(LP), &mut assets, LP) else {
            panic!("valid first mint");
        };
        (pool, assets)
    }

    fn market_reserves(pool: &MultiOutcomePool) -> Vec<u128> {
        let Ok(reserves) = pool.reserves() else {
            panic!("unlocked pool");
        };
        reserves.iter().map(|r| r.amount.get()).collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_outcome_sale_respects_ceiling(
            yes in 1_000u128..=4_500u128,
            no in 1_000u128..=4_500u128,
            reference_out in 1u128..=9_000u128,
        ) {
            let (pool, mut assets) = seeded_market(yes, no);
            let before = market_reserves(&pool);
            let Ok(reserve_yes) = Reserve::new(yes) else { panic!("fits") };
            let Ok(reserve_usd) = Reserve::new(REFERENCE_SEED) else { panic!("fits") };
            let Ok(cost) = quote_amount_in(Amount::new(reference_out), reserve_yes, reserve_usd)
            else {
                return Ok(());
            };
            let Ok(()) = assets.transfer(YES, TRADER, POOL, cost) else {
                panic!("funded trader");
            };
            let request =
                OutcomeSwapRequest::sell_outcome(YES, Amount::new(reference_out), TRADER);
            match pool.swap(&ctx(TRADER), &mut assets, request, None) {
                Ok(_) => {
                    let Ok(sum) = pool.total_probability() else {
                        panic!("unlocked pool");
                    };
                    prop_assert!(sum <= pool.probability_ceiling(), "sum {} above ceiling", sum);
                }
                Err(AmmError::ProbabilityCeilingExceeded) => {
                    prop_assert_eq!(market_reserves(&pool), before);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }

        #[test]
        fn prop_burn_never_raises_prices(
            yes in 1_000u128..=8_000u128,
            no_percent in 0u128..=100u128,
            shares in 1u128..=9_000u128,
        ) {
            // NO spans 1_000 up to the amount that puts the pool at the ceiling.
            let no = 1_000 + (REFERENCE_SEED - 1_000 - yes) * no_percent / 100;
            let (pool, mut assets) = seeded_market(yes, no);
            let Ok(before) = pool.total_probability() else {
                panic!("unlocked pool");
            };
            let Ok(()) = pool.transfer(&ctx(LP), POOL, Liquidity::new(shares)) else {
                panic!("LP holds 9000 shares");
            };
            match pool.burn(&ctx(LP), &mut assets, LP) {
                Ok(_) => {
                    let Ok(after) = pool.total_probability() else {
                        panic!("unlocked pool");
                    };
                    prop_assert!(after <= before, "sum rose from {} to {}", before, after);
                    prop_assert!(after <= pool.probability_ceiling());
                }
                Err(AmmError::InsufficientLiquidityBurned) => {}
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
