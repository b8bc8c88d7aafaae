//! Unified error types for the outcome AMM engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Every variant aborts the whole operation: pools restore
//! their state and undo journaled asset transfers before the error reaches
//! the caller, so no variant ever describes a partially applied update.

use thiserror::Error;

/// Errors produced by pools, the share ledger, and the pool registry.
///
/// Variants carrying a `&'static str` name the failing computation or
/// rule so callers can log a precise reason without string allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    // -- invariant violations --------------------------------------------
    /// The fee-adjusted constant product decreased.
    #[error("fee-adjusted invariant decreased")]
    InvariantViolation,

    /// The sum of outcome prices would exceed full certainty.
    #[error("outcome probability sum exceeds the ceiling")]
    ProbabilityCeilingExceeded,

    // -- insufficient liquidity / output ---------------------------------
    /// A requested output would drain (or exceed) a reserve.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A deposit was too small to mint any shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A share redemption would pay out zero of some asset.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// A swap requested no output at all.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A swap received no input after the optimistic transfer.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// A holder tried to move more than it owns.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A spender tried to move more than it was approved for.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    // -- authorization -----------------------------------------------------
    /// The caller is not allowed to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    // -- bounds -------------------------------------------------------------
    /// A reserve would not fit in 112 bits.
    #[error("reserve exceeds the 112-bit bound")]
    ReserveOverflow,

    /// Arithmetic overflow in the named computation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow in the named computation.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    // -- degenerate pairs ---------------------------------------------------
    /// Both sides of a pair are the same token.
    #[error("identical token addresses")]
    IdenticalAddresses,

    /// A token identifier is the null address.
    #[error("zero address")]
    ZeroAddress,

    /// A pool for this token set already exists.
    #[error("pool already exists")]
    PairExists,

    // -- lifecycle and guards ------------------------------------------------
    /// The pool was already initialized.
    #[error("pool already initialized")]
    AlreadyInitialized,

    /// The pool has not been initialized yet.
    #[error("pool not initialized")]
    NotInitialized,

    /// The pool is executing another operation (reentrant call).
    #[error("pool is locked")]
    Locked,

    /// Swap outputs cannot be sent to one of the pool's own tokens.
    #[error("invalid swap recipient")]
    InvalidRecipient,

    /// Swap data was supplied without a callback to receive it.
    #[error("swap data supplied without a callee")]
    MissingSwapCallee,

    /// A token is not part of the pool.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let e = AmmError::Unauthorized("only the fee authority");
        assert_eq!(e.to_string(), "unauthorized: only the fee authority");
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(AmmError::Overflow("x"), AmmError::Overflow("x"));
        assert_ne!(AmmError::Overflow("x"), AmmError::Underflow("x"));
    }
}
