//! Observable events emitted by pools and the registry.
//!
//! Events are buffered by the emitting entity and drained by whoever
//! observes it. They are recorded only by operations that commit: a
//! failed operation discards its events together with its state changes.
//! Every event carries enough data for an observer to rebuild reserve and
//! share history without reading pool internals.

use super::{Address, Liquidity, TokenAmount};

/// Events emitted by a pair or a multi-outcome pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    /// Assets were deposited and shares minted.
    LiquidityAdded {
        /// Caller of `mint`.
        sender: Address,
        /// Share recipient.
        to: Address,
        /// Deposited amount of each pool asset.
        deposits: Vec<TokenAmount>,
        /// Shares minted to `to`.
        shares: Liquidity,
    },
    /// Shares were burned and assets paid out.
    LiquidityRemoved {
        /// Caller of `burn`.
        sender: Address,
        /// Asset recipient.
        to: Address,
        /// Withdrawn amount of each pool asset.
        withdrawals: Vec<TokenAmount>,
        /// Shares burned.
        shares: Liquidity,
    },
    /// A swap was executed.
    SwapExecuted {
        /// Caller of `swap`.
        sender: Address,
        /// Output recipient.
        to: Address,
        /// Inferred inputs of both traded assets.
        inputs: [TokenAmount; 2],
        /// Outputs of both traded assets.
        outputs: [TokenAmount; 2],
    },
    /// Recorded reserves changed; carries every reserve of the pool.
    ReservesSynced {
        /// New reserves.
        reserves: Vec<TokenAmount>,
    },
    /// Pool shares moved (mints come from, burns go to, the null address).
    SharesTransferred {
        /// Previous holder.
        from: Address,
        /// New holder.
        to: Address,
        /// Shares moved.
        value: Liquidity,
    },
    /// A share allowance was set.
    SharesApproved {
        /// Share owner.
        owner: Address,
        /// Approved spender.
        spender: Address,
        /// New allowance.
        value: Liquidity,
    },
}

/// Events emitted by the pool registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A pair was created.
    PairCreated {
        /// Lower-addressed token.
        token0: Address,
        /// Higher-addressed token.
        token1: Address,
        /// Deterministic pair address.
        pair: Address,
        /// Number of pairs after creation.
        pair_count: usize,
    },
    /// A multi-outcome pool was created.
    MarketPoolCreated {
        /// Reference asset.
        reference: Address,
        /// Outcome tokens, sorted.
        outcomes: Vec<Address>,
        /// Deterministic pool address.
        pool: Address,
        /// Number of multi-outcome pools after creation.
        pool_count: usize,
    },
    /// The protocol fee recipient changed.
    FeeRecipientChanged {
        /// Old recipient.
        previous: Option<Address>,
        /// New recipient.
        current: Option<Address>,
    },
    /// The fee authority changed.
    FeeAuthorityChanged {
        /// Old authority.
        previous: Address,
        /// New authority.
        current: Address,
    },
}
