//! Pool share accounting.
//!
//! Balances and allowances of a pool's liquidity shares. Every mutation
//! computes its new values before writing any of them, so a failed call
//! leaves the ledger untouched, and every successful one returns the
//! [`PoolEvent`] describing it. `total_supply` equals the sum of all
//! balances in every reachable state.

use std::collections::HashMap;

use crate::domain::{Address, Liquidity, PoolEvent};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Share balances, allowances and total supply of one pool.
///
/// An allowance of [`Liquidity::MAX`] is infinite: `transfer_from` never
/// decrements it. Zero balances and allowances are not stored.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Address, Liquidity};
/// use outcome_amm::ledger::LiquidityLedger;
///
/// let alice = Address::from_bytes([1u8; 32]);
/// let mut shares = LiquidityLedger::new();
/// shares.mint(alice, Liquidity::new(500)).expect("mint");
/// assert_eq!(shares.total_supply(), Liquidity::new(500));
/// assert_eq!(shares.balance_of(&alice), Liquidity::new(500));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidityLedger {
    total_supply: Liquidity,
    balances: HashMap<Address, Liquidity>,
    allowances: HashMap<(Address, Address), Liquidity>,
}

impl LiquidityLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total shares outstanding.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> Liquidity {
        self.balances.get(holder).copied().unwrap_or(Liquidity::ZERO)
    }

    /// Shares `spender` may move on behalf of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Liquidity {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Liquidity::ZERO)
    }

    /// Creates `value` new shares for `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the supply would overflow.
    pub fn mint(&mut self, to: Address, value: Liquidity) -> Result<PoolEvent> {
        let supply = self.total_supply.safe_add(&value)?;
        let balance = self.balance_of(&to).safe_add(&value)?;
        self.total_supply = supply;
        self.set_balance(to, balance);
        Ok(PoolEvent::SharesTransferred {
            from: Address::zero(),
            to,
            value,
        })
    }

    /// Destroys `value` of `from`'s shares.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds fewer
    /// than `value` shares.
    pub fn burn(&mut self, from: Address, value: Liquidity) -> Result<PoolEvent> {
        let balance = self
            .balance_of(&from)
            .checked_sub(&value)
            .ok_or(AmmError::InsufficientBalance)?;
        let supply = self.total_supply.safe_sub(&value)?;
        self.total_supply = supply;
        self.set_balance(from, balance);
        Ok(PoolEvent::SharesTransferred {
            from,
            to: Address::zero(),
            value,
        })
    }

    /// Moves `value` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds fewer
    /// than `value` shares.
    pub fn transfer(&mut self, from: Address, to: Address, value: Liquidity) -> Result<PoolEvent> {
        let from_balance = self
            .balance_of(&from)
            .checked_sub(&value)
            .ok_or(AmmError::InsufficientBalance)?;
        if from != to {
            let to_balance = self.balance_of(&to).safe_add(&value)?;
            self.set_balance(from, from_balance);
            self.set_balance(to, to_balance);
        }
        Ok(PoolEvent::SharesTransferred { from, to, value })
    }

    /// Sets the allowance of `spender` over `owner`'s shares.
    pub fn approve(&mut self, owner: Address, spender: Address, value: Liquidity) -> PoolEvent {
        if value.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), value);
        }
        PoolEvent::SharesApproved {
            owner,
            spender,
            value,
        }
    }

    /// Moves `value` shares from `from` to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the allowance is too low.
    /// - [`AmmError::InsufficientBalance`] if `from` holds too few shares.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        value: Liquidity,
    ) -> Result<PoolEvent> {
        let allowance = self.allowance(&from, &spender);
        let remaining = if allowance == Liquidity::MAX {
            allowance
        } else {
            allowance
                .checked_sub(&value)
                .ok_or(AmmError::InsufficientAllowance)?
        };
        let event = self.transfer(from, to, value)?;
        if remaining != allowance {
            self.approve(from, spender, remaining);
        }
        Ok(event)
    }

    fn set_balance(&mut self, holder: Address, value: Liquidity) {
        if value.is_zero() {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, value);
        }
    }
}
