//! Share and asset bookkeeping.
//!
//! - [`LiquidityLedger`]: a pool's own share balances and allowances.
//! - [`InMemoryAssetLedger`]: a reference [`AssetLedger`](crate::traits::AssetLedger).
//! - [`Journal`]: records transfers so a failed operation can undo them.

mod in_memory;
mod journal;
mod liquidity_ledger;

pub use in_memory::InMemoryAssetLedger;
pub use journal::Journal;
pub use liquidity_ledger::LiquidityLedger;
