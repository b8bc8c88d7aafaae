//! Pool creation and protocol fee administration.
//!
//! The [`PoolRegistry`] creates one [`Pair`](crate::pools::Pair) per
//! unordered token pair and one
//! [`MultiOutcomePool`](crate::pools::MultiOutcomePool) per market, at
//! addresses derived with Keccak-256 from the registry address and the
//! pool's assets.
//!
//! # Usage
//!
//! ```rust
//! use outcome_amm::config::RegistryConfig;
//! use outcome_amm::domain::{Address, TokenPair};
//! use outcome_amm::factory::{pair_address, PoolRegistry};
//! use outcome_amm::traits::FeeSource;
//!
//! let registry_addr = Address::from_bytes([0xee; 32]);
//! let authority = Address::from_bytes([0xad; 32]);
//! let config = RegistryConfig::new(registry_addr, authority).expect("valid");
//! let mut registry = PoolRegistry::from_config(&config).expect("registry");
//!
//! let usd = Address::from_bytes([1u8; 32]);
//! let yes = Address::from_bytes([2u8; 32]);
//! let expected = pair_address(registry_addr, &TokenPair::new(usd, yes).expect("distinct"));
//! let pair = registry.create_pair(yes, usd).expect("created");
//! assert_eq!(pair.address(), expected);
//!
//! registry
//!     .set_fee_recipient(authority, Some(Address::from_bytes([0xf0; 32])))
//!     .expect("authorized");
//! assert!(registry.fee_recipient().is_some());
//! ```

mod registry;

#[cfg(feature = "multi-outcome")]
pub use registry::market_pool_address;
pub use registry::{pair_address, PoolRegistry};
