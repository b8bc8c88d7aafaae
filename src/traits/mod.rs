//! Trait abstractions at the seams of the engine.
//!
//! [`Exchange`] and [`FungibleLedger`] are the operations a pool offers.
//! [`AssetLedger`], [`SwapCallee`] and [`FeeSource`] are the collaborators
//! a pool is handed on each call: the external asset ledger, the
//! flash-swap receiver and the protocol fee configuration.

mod asset_ledger;
mod exchange;
mod fee_source;
mod fungible_ledger;
mod swap_callee;

pub use asset_ledger::AssetLedger;
pub use exchange::Exchange;
pub use fee_source::FeeSource;
pub use fungible_ledger::FungibleLedger;
pub use swap_callee::{SwapCallback, SwapCallee};
