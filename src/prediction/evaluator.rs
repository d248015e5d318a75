use crate::common::defs::*;
use crate::common::error::*;
use crate::mdps::policy::Policy;

/// Common contract of the model-free prediction algorithms.
///
/// `evaluate` resets the evaluator's value-function estimate to zero, runs
/// `num_episodes` independent episodes against the evaluator's MDP, and
/// returns a defensive copy of the final estimate, indexed by state.
/// `num_episodes = 0` yields the zero vector.
pub trait Evaluator {
    fn evaluate(&mut self, policy: &dyn Policy, num_episodes: usize) -> Result<Vec<Continous>>;
}

/// Bounds guard on state indices coming back from an MDP.
pub(crate) fn checked_state(s: Discrete, n_s: usize) -> Result<Discrete> {
    if s < n_s {
        Ok(s)
    } else {
        Err(RlError::ContractViolation(format!(
            "mdp returned state {s}, out of range for {n_s} states"
        )))
    }
}
