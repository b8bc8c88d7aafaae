//! Configuration for the pool registry.

use crate::domain::Address;
use crate::error::AmmError;

/// Configuration for a [`PoolRegistry`](crate::factory::PoolRegistry).
///
/// # Validation
///
/// - The registry address must not be the null address; pools derive
///   their addresses from it.
/// - The fee authority must not be the null address.
/// - A fee recipient, when set, must not be the null address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryConfig {
    address: Address,
    fee_authority: Address,
    fee_recipient: Option<Address>,
}

impl RegistryConfig {
    /// Creates a new `RegistryConfig` with the protocol fee off.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if either address is null.
    pub fn new(address: Address, fee_authority: Address) -> Result<Self, AmmError> {
        let config = Self {
            address,
            fee_authority,
            fee_recipient: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Starts the registry with the protocol fee on.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `recipient` is null.
    pub fn with_fee_recipient(self, recipient: Address) -> Result<Self, AmmError> {
        let config = Self {
            fee_recipient: Some(recipient),
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] describing the first
    /// violated rule.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.address.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "registry address must not be null",
            ));
        }
        if self.fee_authority.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "fee authority must not be null",
            ));
        }
        if self.fee_recipient.is_some_and(|r| r.is_zero()) {
            return Err(AmmError::InvalidConfiguration(
                "fee recipient must not be null",
            ));
        }
        Ok(())
    }

    /// Returns the registry address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the initial fee authority.
    #[must_use]
    pub const fn fee_authority(&self) -> Address {
        self.fee_authority
    }

    /// Returns the initial fee recipient.
    #[must_use]
    pub const fn fee_recipient(&self) -> Option<Address> {
        self.fee_recipient
    }
}
