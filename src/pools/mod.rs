//! Pool implementations and the numerics they share.
//!
//! | Item | Role |
//! |------|------|
//! | [`Pair`] | Two-token constant-product pool with shares, oracle and protocol fee |
//! | [`MultiOutcomePool`] | N outcome tokens against one reference asset (`multi-outcome` feature) |
//! | [`PriceAccumulator`] / [`twap`] | UQ112x112 cumulative prices and their time-weighted average |
//! | [`protocol_fee_shares`] | Shares owed to the protocol for invariant growth |
//! | [`quote_amount_out`] / [`quote_amount_in`] | Fee-aware sizing of swaps |
//!
//! Every pool keeps its state behind an internal lock. Operations either
//! commit in full or leave state, shares and asset balances untouched.

mod guard;
#[cfg(feature = "multi-outcome")]
mod multi_outcome;
mod oracle;
mod pair;
mod protocol_fee;
mod quote;

#[cfg(test)]
mod proptest_properties;

#[cfg(feature = "multi-outcome")]
pub use multi_outcome::MultiOutcomePool;
pub use oracle::{twap, PriceAccumulator, PriceObservation};
pub use pair::{Pair, MINIMUM_LIQUIDITY};
pub use protocol_fee::protocol_fee_shares;
pub use quote::{quote_amount_in, quote_amount_out, FEE_DENOMINATOR, FEE_NUMERATOR};
