//! Swap requests and their outcomes.

use core::fmt;

use super::{Address, Amount};

/// A request against a two-token pair: how much of each token to send
/// out, to whom, and optional callback data.
///
/// Inputs are never part of the request. The pool infers them from its
/// balances after the optimistic transfer (and after the callback, if
/// `data` is non-empty), so a request carries only outputs.
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::{Address, Amount, SwapRequest};
///
/// let trader = Address::from_bytes([9u8; 32]);
/// let req = SwapRequest::new(Amount::ZERO, Amount::new(1_000), trader);
/// assert!(req.data().is_empty());
/// assert!(req.with_data(b"flash").data().starts_with(b"fl"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapRequest<'a> {
    amount0_out: Amount,
    amount1_out: Amount,
    to: Address,
    data: &'a [u8],
}

impl<'a> SwapRequest<'a> {
    /// Creates a request without callback data.
    pub const fn new(amount0_out: Amount, amount1_out: Amount, to: Address) -> Self {
        Self {
            amount0_out,
            amount1_out,
            to,
            data: &[],
        }
    }

    /// Attaches callback data; non-empty data triggers the swap callee.
    #[must_use]
    pub const fn with_data(self, data: &'a [u8]) -> Self {
        Self { data, ..self }
    }

    /// Requested output of `token0`.
    pub const fn amount0_out(&self) -> Amount {
        self.amount0_out
    }

    /// Requested output of `token1`.
    pub const fn amount1_out(&self) -> Amount {
        self.amount1_out
    }

    /// Recipient of the outputs.
    #[must_use]
    pub const fn to(&self) -> Address {
        self.to
    }

    /// Callback data.
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// A request against a multi-outcome pool: one outcome token traded
/// against the shared reference asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutcomeSwapRequest<'a> {
    outcome: Address,
    outcome_out: Amount,
    reference_out: Amount,
    to: Address,
    data: &'a [u8],
}

impl<'a> OutcomeSwapRequest<'a> {
    /// Buys `outcome_out` of `outcome`, paying in the reference asset.
    pub const fn buy_outcome(outcome: Address, outcome_out: Amount, to: Address) -> Self {
        Self {
            outcome,
            outcome_out,
            reference_out: Amount::ZERO,
            to,
            data: &[],
        }
    }

    /// Sells `outcome` for `reference_out` of the reference asset.
    pub const fn sell_outcome(outcome: Address, reference_out: Amount, to: Address) -> Self {
        Self {
            outcome,
            outcome_out: Amount::ZERO,
            reference_out,
            to,
            data: &[],
        }
    }

    /// General form with both outputs.
    pub const fn new(
        outcome: Address,
        outcome_out: Amount,
        reference_out: Amount,
        to: Address,
    ) -> Self {
        Self {
            outcome,
            outcome_out,
            reference_out,
            to,
            data: &[],
        }
    }

    /// Attaches callback data; non-empty data triggers the swap callee.
    #[must_use]
    pub const fn with_data(self, data: &'a [u8]) -> Self {
        Self { data, ..self }
    }

    /// The traded outcome token.
    #[must_use]
    pub const fn outcome(&self) -> Address {
        self.outcome
    }

    /// Requested output of the outcome token.
    pub const fn outcome_out(&self) -> Amount {
        self.outcome_out
    }

    /// Requested output of the reference asset.
    pub const fn reference_out(&self) -> Amount {
        self.reference_out
    }

    /// Recipient of the outputs.
    #[must_use]
    pub const fn to(&self) -> Address {
        self.to
    }

    /// Callback data.
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// An amount of a specific token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenAmount {
    /// The token.
    pub token: Address,
    /// The amount of it.
    pub amount: Amount,
}

impl TokenAmount {
    /// Pairs a token with an amount.
    pub const fn new(token: Address, amount: Amount) -> Self {
        Self { token, amount }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.amount, self.token)
    }
}

/// What a successful swap actually moved.
///
/// Both traded tokens appear in `inputs` and in `outputs`, in the pool's
/// order; either side may be zero for a given token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapOutcome {
    inputs: [TokenAmount; 2],
    outputs: [TokenAmount; 2],
}

impl SwapOutcome {
    /// Creates a swap outcome.
    pub const fn new(inputs: [TokenAmount; 2], outputs: [TokenAmount; 2]) -> Self {
        Self { inputs, outputs }
    }

    /// Inferred inputs.
    #[must_use]
    pub const fn inputs(&self) -> [TokenAmount; 2] {
        self.inputs
    }

    /// Transferred outputs.
    #[must_use]
    pub const fn outputs(&self) -> [TokenAmount; 2] {
        self.outputs
    }

    /// Input received in `token` (zero if the token was not traded).
    pub fn amount_in(&self, token: &Address) -> Amount {
        Self::lookup(&self.inputs, token)
    }

    /// Output sent in `token` (zero if the token was not traded).
    pub fn amount_out(&self, token: &Address) -> Amount {
        Self::lookup(&self.outputs, token)
    }

    fn lookup(side: &[TokenAmount; 2], token: &Address) -> Amount {
        side.iter()
            .find(|t| t.token == *token)
            .map_or(Amount::ZERO, |t| t.amount)
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapOutcome(in=[{}, {}], out=[{}, {}])",
            self.inputs[0].amount,
            self.inputs[1].amount,
            self.outputs[0].amount,
            self.outputs[1].amount
        )
    }
}
