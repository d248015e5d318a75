use super::evaluator::{checked_state, Evaluator};
use crate::common::defs::*;
use crate::common::error::*;
use crate::mdps::mdp::Mdp;
use crate::mdps::policy::Policy;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// One-step temporal-difference prediction, TD(0).
///
/// Per step: `delta = reward + gamma * V(next) - V(state)` and
/// `V(state) += alpha * delta`, with the next-state term dropped on the
/// terminal transition since there is no continuation value beyond a
/// terminal state. `alpha` is fixed, no decay schedule.
pub struct TdEvaluator {
    env: Rc<RefCell<dyn Mdp>>,
    alpha: Continous,
    value_fun: Vec<Continous>,
}

impl TdEvaluator {
    pub fn new(env: Rc<RefCell<dyn Mdp>>, alpha: Continous) -> Result<Self> {
        let n_s = env.borrow().n_s();
        if n_s == 0 {
            return Err(RlError::InvalidArgument(
                "mdp reports an empty state space".to_string(),
            ));
        }

        Ok(Self {
            env,
            alpha,
            value_fun: vec![0.; n_s],
        })
    }

    fn update_value_function(&mut self, policy: &dyn Policy) -> Result<()> {
        let env = &mut *self.env.borrow_mut();
        let n_s = env.n_s();
        let gamma = env.gamma();

        let mut s = checked_state(env.reset()?, n_s)?;
        let mut done = false;
        while !done {
            let a = policy.sample_action(s)?;
            let (next, r, d) = env.step(a)?;
            let next = checked_state(next, n_s)?;
            done = d;

            let bootstrap = if done { 0. } else { self.value_fun[next] };
            let delta = r + gamma * bootstrap - self.value_fun[s];
            self.value_fun[s] += self.alpha * delta;

            s = next;
        }

        Ok(())
    }
}

impl Evaluator for TdEvaluator {
    fn evaluate(&mut self, policy: &dyn Policy, num_episodes: usize) -> Result<Vec<Continous>> {
        debug!(num_episodes, alpha = self.alpha, "running TD(0) evaluation");
        self.value_fun.fill(0.);

        for _ in 0..num_episodes {
            self.update_value_function(policy)?;
        }

        Ok(self.value_fun.clone())
    }
}
