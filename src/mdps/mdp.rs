use crate::common::defs::*;
use crate::common::error::*;

/// Markov Decision Process - Sutton & Barto 2018.
///
/// The process owns a hidden current state, advanced by `step` between a
/// `reset` and the terminal transition. `step` requires a prior `reset` and
/// no terminal step since; violating that is a [`RlError::ContractViolation`].
/// Single-threaded, sequential use by one evaluator at a time.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn gamma(&self) -> Continous;

    /// Begins a fresh, independent episode and returns the start state.
    fn reset(&mut self) -> Result<Discrete>;

    /// Applies `action` from the current state, returning
    /// `(next_state, reward, done)`. After `done = true` no further `step`
    /// is valid until the next `reset`.
    fn step(&mut self, action: Discrete) -> Result<(Discrete, Continous, bool)>;
}
