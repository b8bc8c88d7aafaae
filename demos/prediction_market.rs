//! Prediction market example.
//!
//! Demonstrates a registry creating a YES/NO market pool and a USD/YES
//! pair, seeding both, trading outcomes against the reference asset, the
//! probability ceiling rejecting an over-priced sale, and a protocol fee
//! accruing to its recipient.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example prediction_market
//! ```

use outcome_amm::config::{MultiOutcomeConfig, RegistryConfig};
use outcome_amm::domain::{Address, Amount, CallContext, OutcomeSwapRequest, Reserve, SwapRequest};
use outcome_amm::error::AmmError;
use outcome_amm::factory::PoolRegistry;
use outcome_amm::ledger::InMemoryAssetLedger;
use outcome_amm::pools::{quote_amount_in, quote_amount_out, twap};
use outcome_amm::traits::{AssetLedger, Exchange, FungibleLedger};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Prediction market on a constant-product AMM ===\n");

    // ── 1. Actors and assets ────────────────────────────────────────────
    let usd = Address::from_bytes([1u8; 32]);
    let yes = Address::from_bytes([2u8; 32]);
    let no = Address::from_bytes([3u8; 32]);
    let authority = Address::from_bytes([0xad; 32]);
    let treasury = Address::from_bytes([0xf0; 32]);
    let maker = Address::from_bytes([0xa1; 32]);
    let trader = Address::from_bytes([0xb0; 32]);

    let mut assets = InMemoryAssetLedger::new();
    for holder in [maker, trader] {
        for token in [usd, yes, no] {
            assets.deposit(token, holder, Amount::new(10_000_000))?;
        }
    }

    // ── 2. Registry with the protocol fee on ────────────────────────────
    let config = RegistryConfig::new(Address::from_bytes([0xee; 32]), authority)?
        .with_fee_recipient(treasury)?;
    let mut registry = PoolRegistry::from_config(&config)?;
    println!("Registry {} (fee authority {})", registry.address(), authority);

    // ── 3. Seed a YES/NO market at 40% / 50% ────────────────────────────
    let market = registry.create_market_pool(MultiOutcomeConfig::new(usd, vec![yes, no])?)?;
    let t0 = CallContext::new(maker, 1_700_000_000);
    assets.transfer(usd, maker, market.address(), Amount::new(100_000))?;
    assets.transfer(yes, maker, market.address(), Amount::new(40_000))?;
    assets.transfer(no, maker, market.address(), Amount::new(50_000))?;
    let shares = market.mint(&t0, &mut assets, maker)?;
    println!("\n--- Market seeded ---");
    println!("  Shares minted:   {shares}");
    for (token, price) in market.prices()? {
        println!("  Price of {token}: {price}");
    }
    println!("  Σ price:         {}", market.total_probability()?);

    // ── 4. Buy 1 000 YES with USD ───────────────────────────────────────
    let reserves = market.reserves()?;
    let usd_reserve = Reserve::try_from(reserves[0].amount)?;
    let yes_reserve = Reserve::try_from(reserves[1].amount)?;
    let cost = quote_amount_in(Amount::new(1_000), usd_reserve, yes_reserve)?;
    assets.transfer(usd, trader, market.address(), cost)?;
    let bought = market.swap(
        &t0.at(1_700_000_060),
        &mut assets,
        OutcomeSwapRequest::buy_outcome(yes, Amount::new(1_000), trader),
        None,
    )?;
    println!("\n--- Buy YES ---");
    println!("  Paid:            {} USD", bought.amount_in(&usd));
    println!("  Received:        {} YES", bought.amount_out(&yes));
    println!("  Σ price:         {}", market.total_probability()?);

    // ── 5. A sale that would price the outcomes above certainty ─────────
    assets.transfer(yes, trader, market.address(), Amount::new(10_000))?;
    let greedy = market.swap(
        &t0.at(1_700_000_120),
        &mut assets,
        OutcomeSwapRequest::sell_outcome(yes, Amount::new(20_000), trader),
        None,
    );
    match greedy {
        Err(AmmError::ProbabilityCeilingExceeded) => {
            println!("\n--- Sell YES for 20 000 USD ---");
            println!("  Rejected: the outcome prices would sum above 1");
        }
        other => println!("\nUnexpected result: {other:?}"),
    }
    let skimmed = market.skim(&t0, &mut assets, trader)?;
    println!("  Skimmed back:    {} YES", skimmed[1].amount);

    // ── 6. A USD/YES pair with a protocol fee ───────────────────────────
    let pair = registry.create_pair(yes, usd)?;
    assets.transfer(usd, maker, pair.address(), Amount::new(1_000_000))?;
    assets.transfer(yes, maker, pair.address(), Amount::new(400_000))?;
    let lp = pair.mint(&t0, &registry, &mut assets, maker)?;
    let start = pair.observe(&t0)?;
    println!("\n--- Pair {} ---", pair.address());
    println!("  LP shares:       {lp}");

    for minute in 1..=5u64 {
        let at = t0.at(1_700_000_000 + minute * 60);
        let r = pair.reserves()?;
        let out = quote_amount_out(Amount::new(50_000), r.reserve0, r.reserve1)?;
        assets.transfer(usd, trader, pair.address(), Amount::new(50_000))?;
        pair.swap(&at, &mut assets, SwapRequest::new(Amount::ZERO, out, trader), None)?;
        println!("  Minute {minute}: bought {out} YES for 50 000 USD");
    }

    let end = pair.observe(&t0.at(1_700_000_360))?;
    let (_, usd_per_yes) = twap(&start, &end)?;
    println!("  TWAP USD per YES (integer part): {}", usd_per_yes.decode());

    // The fee is minted on the next liquidity event.
    assets.transfer(usd, maker, pair.address(), Amount::new(10_000))?;
    assets.transfer(yes, maker, pair.address(), Amount::new(3_000))?;
    pair.mint(&t0.at(1_700_000_400), &registry, &mut assets, maker)?;
    println!("  Treasury shares: {}", pair.balance_of(treasury)?);

    println!("\nRegistry events:");
    for event in registry.drain_events() {
        println!("  {event:?}");
    }
    Ok(())
}
