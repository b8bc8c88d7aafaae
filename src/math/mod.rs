//! Arithmetic and fixed-point utilities.
//!
//! - [`U256`]: `ethereum-types` 256-bit intermediate for reserve products
//!   and accumulators, with the [`widening_mul`], [`to_u128`] and
//!   [`isqrt`] bridges.
//! - [`Uq112x112`]: the 112.112 fixed-point format of the price oracle.
//! - [`CheckedArithmetic`]: `Result`-returning arithmetic on domain types.
//! - [`div_round`] / [`mul_div`]: division with explicit rounding.

mod checked;
mod rounding;
mod uq112x112;
mod wide;

pub use checked::CheckedArithmetic;
pub use ethereum_types::U256;
pub use rounding::{div_round, mul_div};
pub use uq112x112::{Uq112x112, RESOLUTION};
pub use wide::{checked_div_ceil, checked_div_rem, isqrt, to_u128, widening_mul};
