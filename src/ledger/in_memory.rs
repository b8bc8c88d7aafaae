//! In-memory asset ledger.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

/// A map-backed [`AssetLedger`] for tests, simulations and demos.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Address, Amount};
/// use outcome_amm::ledger::InMemoryAssetLedger;
/// use outcome_amm::traits::AssetLedger;
///
/// let usd = Address::from_bytes([1u8; 32]);
/// let alice = Address::from_bytes([2u8; 32]);
/// let bob = Address::from_bytes([3u8; 32]);
///
/// let mut assets = InMemoryAssetLedger::new();
/// assets.deposit(usd, alice, Amount::new(100)).expect("deposit");
/// assets.transfer(usd, alice, bob, Amount::new(40)).expect("transfer");
/// assert_eq!(assets.balance_of(usd, bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryAssetLedger {
    balances: HashMap<(Address, Address), Amount>,
}

impl InMemoryAssetLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `token` to `holder` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would overflow.
    pub fn deposit(&mut self, token: Address, holder: Address, amount: Amount) -> Result<()> {
        let balance = self.balance_of(token, holder).safe_add(&amount)?;
        self.set(token, holder, balance);
        Ok(())
    }

    fn set(&mut self, token: Address, holder: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(token, holder));
        } else {
            self.balances.insert((token, holder), amount);
        }
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn balance_of(&self, token: Address, holder: Address) -> Amount {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let from_balance = self
            .balance_of(token, from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(token, to).safe_add(&amount)?;
        self.set(token, from, from_balance);
        self.set(token, to, to_balance);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn overdraft_rejected() {
        let mut assets = InMemoryAssetLedger::new();
        let Ok(()) = assets.deposit(addr(1), addr(2), Amount::new(5)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            assets.transfer(addr(1), addr(2), addr(3), Amount::new(6)),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(assets.balance_of(addr(1), addr(2)), Amount::new(5));
    }

    #[test]
    fn tokens_are_independent() {
        let mut assets = InMemoryAssetLedger::new();
        let Ok(()) = assets.deposit(addr(1), addr(2), Amount::new(5)) else {
            panic!("expected Ok");
        };
        assert_eq!(assets.balance_of(addr(9), addr(2)), Amount::ZERO);
    }
}
