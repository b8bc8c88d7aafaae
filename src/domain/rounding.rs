//! Explicit rounding direction for integer division.

/// Rounding direction for divisions performed on pool quantities.
///
/// Pools always round against the caller: shares minted and amounts paid
/// out round [`Down`](Rounding::Down); required inputs round
/// [`Up`](Rounding::Up).
///
/// # Examples
///
/// ```
/// use outcome_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
