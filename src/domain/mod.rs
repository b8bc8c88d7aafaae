//! Fundamental domain value types used throughout the engine.
//!
//! Identifiers, amounts, bounded reserves, share units, canonically
//! ordered pairs, swap requests, call context, and events. All numeric
//! types are newtypes with checked constructors and arithmetic.

mod address;
mod amount;
mod call_context;
mod events;
mod liquidity;
mod reserve;
mod rounding;
mod swap_request;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub use call_context::CallContext;
pub use events::{PoolEvent, RegistryEvent};
pub use liquidity::Liquidity;
pub use reserve::{PairReserves, Reserve};
pub use rounding::Rounding;
pub use swap_request::{OutcomeSwapRequest, SwapOutcome, SwapRequest, TokenAmount};
pub use token_pair::TokenPair;
