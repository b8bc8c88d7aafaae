//! Per-pool critical section and all-or-nothing execution.
//!
//! A pool keeps its mutable state inside a [`PoolLock`]. Every public
//! operation enters the lock with `try_lock`, so a nested call on the same
//! pool (typically from a swap callback) fails with [`AmmError::Locked`]
//! instead of deadlocking. The lock is released by the guard's `Drop` on
//! every exit path.
//!
//! [`PoolLock::transact`] also makes an operation atomic: the state is
//! snapshotted on entry, and every asset transfer goes through a
//! [`Journal`]. On error the snapshot is restored and the journal
//! reverted, so neither state, transfers nor buffered events survive a
//! failed call.

use std::sync::{Mutex, MutexGuard, TryLockError};

use crate::domain::{Address, PoolEvent};
use crate::error::{AmmError, Result};
use crate::ledger::{Journal, LiquidityLedger};
use crate::traits::AssetLedger;

/// State types that carry a share ledger and an event buffer.
pub(crate) trait ShareState: Clone {
    fn shares(&self) -> &LiquidityLedger;
    fn shares_mut(&mut self) -> &mut LiquidityLedger;
    fn events_mut(&mut self) -> &mut Vec<PoolEvent>;
}

/// Non-reentrant lock around a pool's state.
#[derive(Debug, Default)]
pub(crate) struct PoolLock<S> {
    state: Mutex<S>,
}

impl<S: Clone> PoolLock<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    // A poisoned lock means an operation panicked halfway; the pool stays
    // closed rather than exposing half-applied state.
    fn enter(&self) -> Result<MutexGuard<'_, S>> {
        match self.state.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock | TryLockError::Poisoned(_)) => Err(AmmError::Locked),
        }
    }

    /// Runs a read-only query under the lock.
    pub(crate) fn read<T>(&self, query: impl FnOnce(&S) -> Result<T>) -> Result<T> {
        let state = self.enter()?;
        query(&state)
    }

    /// Runs a state-only mutation; the state is restored if it fails.
    pub(crate) fn mutate<T>(&self, op: impl FnOnce(&mut S) -> Result<T>) -> Result<T> {
        let mut state = self.enter()?;
        let snapshot = state.clone();
        op(&mut *state).map_err(|err| {
            *state = snapshot;
            err
        })
    }

    /// Runs an operation that may move assets, reverting everything on
    /// failure.
    pub(crate) fn transact<T>(
        &self,
        pool: Address,
        assets: &mut dyn AssetLedger,
        op: impl FnOnce(&mut S, &mut dyn AssetLedger) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.enter()?;
        let snapshot = state.clone();
        let mut journal = Journal::new(assets);
        let ledger: &mut dyn AssetLedger = &mut journal;
        let err = match op(&mut *state, ledger) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        *state = snapshot;
        let transfers = journal.len();
        match journal.rollback() {
            Ok(()) => {
                tracing::warn!(pool = %pool, error = %err, transfers, "operation reverted");
            }
            Err(rollback_err) => {
                tracing::error!(
                    pool = %pool,
                    error = %err,
                    rollback_error = %rollback_err,
                    "failed to revert asset transfers"
                );
            }
        }
        Err(err)
    }
}

impl<S: ShareState> PoolLock<S> {
    /// Reads the share ledger.
    pub(crate) fn shares<T>(&self, query: impl FnOnce(&LiquidityLedger) -> T) -> Result<T> {
        self.read(|state| Ok(query(state.shares())))
    }

    /// Applies a share ledger mutation and records its event.
    pub(crate) fn move_shares(
        &self,
        pool: Address,
        op: impl FnOnce(&mut LiquidityLedger) -> Result<PoolEvent>,
    ) -> Result<()> {
        let mut state = self.enter()?;
        let event = op(state.shares_mut())?;
        tracing::debug!(pool = %pool, ?event, "shares updated");
        state.events_mut().push(event);
        Ok(())
    }

    /// Takes every buffered event.
    pub(crate) fn drain_events(&self) -> Result<Vec<PoolEvent>> {
        let mut state = self.enter()?;
        Ok(std::mem::take(state.events_mut()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Amount;
    use crate::ledger::InMemoryAssetLedger;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn nested_entry_is_locked() {
        let lock = PoolLock::new(0u32);
        let result = lock.mutate(|_| lock.read(|v| Ok(*v)));
        assert_eq!(result, Err(AmmError::Locked));
    }

    #[test]
    fn failed_mutation_restores_state() {
        let lock = PoolLock::new(1u32);
        let result: Result<()> = lock.mutate(|v| {
            *v = 99;
            Err(AmmError::InvariantViolation)
        });
        assert_eq!(result, Err(AmmError::InvariantViolation));
        assert_eq!(lock.read(|v| Ok(*v)), Ok(1));
    }

    #[test]
    fn failed_transaction_reverts_transfers() {
        let mut assets = InMemoryAssetLedger::new();
        let Ok(()) = assets.deposit(addr(1), addr(2), Amount::new(50)) else {
            panic!("expected Ok");
        };
        let before = assets.clone();

        let lock = PoolLock::new(0u32);
        let result: Result<()> = lock.transact(addr(9), &mut assets, |v, ledger| {
            *v = 7;
            ledger.transfer(addr(1), addr(2), addr(3), Amount::new(20))?;
            Err(AmmError::InsufficientInputAmount)
        });
        assert_eq!(result, Err(AmmError::InsufficientInputAmount));
        assert_eq!(assets, before);
        assert_eq!(lock.read(|v| Ok(*v)), Ok(0));
    }

    #[test]
    fn committed_transaction_keeps_transfers() {
        let mut assets = InMemoryAssetLedger::new();
        let Ok(()) = assets.deposit(addr(1), addr(2), Amount::new(50)) else {
            panic!("expected Ok");
        };
        let lock = PoolLock::new(0u32);
        let result = lock.transact(addr(9), &mut assets, |v, ledger| {
            *v = 7;
            ledger.transfer(addr(1), addr(2), addr(3), Amount::new(20))
        });
        assert_eq!(result, Ok(()));
        assert_eq!(assets.balance_of(addr(1), addr(3)), Amount::new(20));
    }
}
