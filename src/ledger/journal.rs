//! Transfer journal used to revert asset movements.

use crate::domain::{Address, Amount};
use crate::error::Result;
use crate::traits::AssetLedger;

#[derive(Debug, Clone, Copy)]
struct AppliedTransfer {
    token: Address,
    from: Address,
    to: Address,
    amount: Amount,
}

/// An [`AssetLedger`] wrapper that records every transfer it forwards.
///
/// [`Journal::rollback`] replays the recorded transfers in reverse, each
/// one sent back from its recipient to its sender. Because the reversal
/// is LIFO, every reversing transfer finds the funds that the original
/// transfer delivered.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Address, Amount};
/// use outcome_amm::ledger::{InMemoryAssetLedger, Journal};
/// use outcome_amm::traits::AssetLedger;
///
/// let usd = Address::from_bytes([1u8; 32]);
/// let alice = Address::from_bytes([2u8; 32]);
/// let pool = Address::from_bytes([3u8; 32]);
///
/// let mut assets = InMemoryAssetLedger::new();
/// assets.deposit(usd, alice, Amount::new(100)).expect("deposit");
///
/// let mut journal = Journal::new(&mut assets);
/// journal.transfer(usd, alice, pool, Amount::new(60)).expect("transfer");
/// journal.rollback().expect("rollback");
///
/// assert_eq!(assets.balance_of(usd, alice), Amount::new(100));
/// ```
pub struct Journal<'a> {
    inner: &'a mut dyn AssetLedger,
    applied: Vec<AppliedTransfer>,
}

impl<'a> Journal<'a> {
    /// Starts an empty journal over `inner`.
    pub fn new(inner: &'a mut dyn AssetLedger) -> Self {
        Self {
            inner,
            applied: Vec::new(),
        }
    }

    /// Number of recorded transfers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Returns `true` if nothing was transferred.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Reverts every recorded transfer, most recent first.
    ///
    /// # Errors
    ///
    /// Propagates the first failing reversal. The remaining transfers
    /// are left in place.
    pub fn rollback(mut self) -> Result<()> {
        while let Some(t) = self.applied.pop() {
            self.inner.transfer(t.token, t.to, t.from, t.amount)?;
        }
        Ok(())
    }
}

impl AssetLedger for Journal<'_> {
    fn balance_of(&self, token: Address, holder: Address) -> Amount {
        self.inner.balance_of(token, holder)
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.inner.transfer(token, from, to, amount)?;
        if !amount.is_zero() && from != to {
            self.applied.push(AppliedTransfer {
                token,
                from,
                to,
                amount,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryAssetLedger;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn rollback_reverses_chained_transfers() {
        let mut assets = InMemoryAssetLedger::new();
        let Ok(()) = assets.deposit(addr(1), addr(10), Amount::new(100)) else {
            panic!("expected Ok");
        };
        let before = assets.clone();

        let mut journal = Journal::new(&mut assets);
        let Ok(()) = journal.transfer(addr(1), addr(10), addr(11), Amount::new(70)) else {
            panic!("expected Ok");
        };
        let Ok(()) = journal.transfer(addr(1), addr(11), addr(12), Amount::new(70)) else {
            panic!("expected Ok");
        };
        let Ok(()) = journal.transfer(addr(1), addr(12), addr(12), Amount::new(5)) else {
            panic!("expected Ok");
        };
        assert_eq!(journal.len(), 2);
        let Ok(()) = journal.rollback() else {
            panic!("expected Ok");
        };
        assert_eq!(assets, before);
    }

    #[test]
    fn failed_transfer_is_not_recorded() {
        let mut assets = InMemoryAssetLedger::new();
        let mut journal = Journal::new(&mut assets);
        assert!(journal
            .transfer(addr(1), addr(10), addr(11), Amount::new(1))
            .is_err());
        assert!(journal.is_empty());
    }
}
