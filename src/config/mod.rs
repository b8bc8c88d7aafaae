//! Declarative, validated configuration.
//!
//! Each struct validates itself on construction (`new` → `validate`), so
//! the registry and pools can assume a well-formed configuration.

#[cfg(feature = "multi-outcome")]
mod multi_outcome;
mod registry;

#[cfg(feature = "multi-outcome")]
pub use multi_outcome::{MultiOutcomeConfig, DEFAULT_PRECISION};
pub use registry::RegistryConfig;
