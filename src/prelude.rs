//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use outcome_amm::prelude::*;
//! ```
//!
//! Brings the domain types, the pool and collaborator traits, the
//! registry, pools and the error type into scope at once.

pub use crate::domain::{
    Address, Amount, CallContext, Liquidity, OutcomeSwapRequest, PairReserves, PoolEvent,
    RegistryEvent, Reserve, Rounding, SwapOutcome, SwapRequest, TokenAmount, TokenPair,
};

pub use crate::traits::{
    AssetLedger, Exchange, FeeSource, FungibleLedger, SwapCallback, SwapCallee,
};

pub use crate::math::{CheckedArithmetic, U256};

pub use crate::config::RegistryConfig;
#[cfg(feature = "multi-outcome")]
pub use crate::config::MultiOutcomeConfig;

pub use crate::error::{AmmError, Result};

pub use crate::factory::PoolRegistry;

pub use crate::ledger::InMemoryAssetLedger;

#[cfg(feature = "multi-outcome")]
pub use crate::pools::MultiOutcomePool;
pub use crate::pools::Pair;
