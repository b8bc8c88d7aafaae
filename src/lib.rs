//! # Outcome AMM
//!
//! Constant-product market making for prediction-market outcome tokens.
//!
//! This crate provides the exchange engine a prediction market trades
//! through: two-token pairs with fungible liquidity shares, a protocol fee,
//! and a time-weighted price oracle, a registry that creates and indexes
//! them, and multi-outcome pools that price N mutually exclusive outcomes
//! against one reference asset without ever implying a joint probability
//! above certainty.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `multi-outcome` | yes | [`MultiOutcomePool`](pools::MultiOutcomePool) and its registry support |
//!
//! # Quick Start
//!
//! Assets live on an external ledger. Callers transfer assets to a pool's
//! address, then call the pool, which infers what it received from its
//! balances.
//!
//! ```rust
//! use outcome_amm::config::RegistryConfig;
//! use outcome_amm::domain::{Address, Amount, CallContext, SwapRequest};
//! use outcome_amm::factory::PoolRegistry;
//! use outcome_amm::ledger::InMemoryAssetLedger;
//! use outcome_amm::pools::quote_amount_out;
//! use outcome_amm::traits::{AssetLedger, Exchange};
//!
//! let usd = Address::from_bytes([1u8; 32]);
//! let yes = Address::from_bytes([2u8; 32]);
//! let alice = Address::from_bytes([0xa1; 32]);
//!
//! // 1. A registry and a pair
//! let config = RegistryConfig::new(
//!     Address::from_bytes([0xee; 32]),
//!     Address::from_bytes([0xad; 32]),
//! )
//! .expect("valid config");
//! let mut registry = PoolRegistry::from_config(&config).expect("registry");
//! let pair = registry.create_pair(usd, yes).expect("pair created");
//!
//! // 2. Fund Alice and seed the pair
//! let mut assets = InMemoryAssetLedger::new();
//! assets.deposit(usd, alice, Amount::new(2_000_000)).expect("deposit");
//! assets.deposit(yes, alice, Amount::new(1_000_000)).expect("deposit");
//! assets.transfer(usd, alice, pair.address(), Amount::new(1_000_000)).expect("transfer");
//! assets.transfer(yes, alice, pair.address(), Amount::new(1_000_000)).expect("transfer");
//! let ctx = CallContext::new(alice, 1_700_000_000);
//! let shares = pair.mint(&ctx, &registry, &mut assets, alice).expect("minted");
//! assert_eq!(shares.get(), 999_000);
//!
//! // 3. Buy YES with 10 000 USD (token0 is USD: its address is lower)
//! let reserves = pair.reserves().expect("unlocked");
//! let out = quote_amount_out(Amount::new(10_000), reserves.reserve0, reserves.reserve1)
//!     .expect("quote");
//! assets.transfer(usd, alice, pair.address(), Amount::new(10_000)).expect("transfer");
//! let swap = pair
//!     .swap(&ctx, &mut assets, SwapRequest::new(Amount::ZERO, out, alice), None)
//!     .expect("swap");
//! assert_eq!(swap.amount_out(&yes), out);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer   │  market lifecycle, routing, UI
//! └──────┬───────┘
//!        │ create_pair / create_market_pool
//!        ▼
//! ┌──────────────┐
//! │   Registry   │  deterministic addresses, fee authority, FeeSource
//! └──────┬───────┘
//!        │ Arc<Pair>, Arc<MultiOutcomePool>
//!        ▼
//! ┌──────────────┐
//! │    Pools     │  lock + journal, invariant checks, shares, oracle
//! └──────┬───────┘
//!        │ AssetLedger, SwapCallee
//!        ▼
//! ┌──────────────┐
//! │    Domain    │  Address, Amount, Reserve, Liquidity, events
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Reserve`](domain::Reserve), events |
//! | [`traits`] | Pool operations ([`Exchange`](traits::Exchange), [`FungibleLedger`](traits::FungibleLedger)) and collaborator seams |
//! | [`config`] | Validated [`RegistryConfig`](config::RegistryConfig) and multi-outcome configuration |
//! | [`pools`]  | [`Pair`](pools::Pair), the multi-outcome pool, oracle, protocol fee and quotes |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry) and deterministic pool addresses |
//! | [`ledger`] | Share ledger, in-memory asset ledger and transfer journal |
//! | [`math`]   | 256-bit integer, UQ112x112 fixed point, checked arithmetic |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
