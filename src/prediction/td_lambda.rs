use super::evaluator::{checked_state, Evaluator};
use crate::common::defs::*;
use crate::common::error::*;
use crate::mdps::mdp::Mdp;
use crate::mdps::policy::Policy;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// TD(lambda) prediction with accumulating eligibility traces.
///
/// Traces reset at the start of every episode, not every `evaluate` call.
/// Each step increments the current state's trace by 1, then sweeps the
/// whole state space applying `alpha * delta * trace(s)` and decaying the
/// trace by `gamma * lambda`. O(n_s) per step, fine at tabular scale.
///
/// Unlike [`super::td::TdEvaluator`], delta bootstraps from
/// `value_fun[next_state]` unconditionally, terminal transitions included.
/// That asymmetry is kept as-is; see
/// `td_lambda_bootstraps_through_terminal_transition` in the integration
/// tests.
pub struct TdLambdaEvaluator {
    env: Rc<RefCell<dyn Mdp>>,
    alpha: Continous,
    lambd: Continous,
    value_fun: Vec<Continous>,
    eligibility_traces: Vec<Continous>,
}

impl TdLambdaEvaluator {
    pub fn new(env: Rc<RefCell<dyn Mdp>>, alpha: Continous, lambd: Continous) -> Result<Self> {
        let n_s = env.borrow().n_s();
        if n_s == 0 {
            return Err(RlError::InvalidArgument(
                "mdp reports an empty state space".to_string(),
            ));
        }

        Ok(Self {
            env,
            alpha,
            lambd,
            value_fun: vec![0.; n_s],
            eligibility_traces: vec![0.; n_s],
        })
    }

    fn update_value_function(&mut self, policy: &dyn Policy) -> Result<()> {
        let env = &mut *self.env.borrow_mut();
        let n_s = env.n_s();
        let gamma = env.gamma();

        let mut s = checked_state(env.reset()?, n_s)?;
        let mut done = false;
        self.eligibility_traces.fill(0.);

        while !done {
            let a = policy.sample_action(s)?;
            let (next, r, d) = env.step(a)?;
            let next = checked_state(next, n_s)?;
            done = d;

            let delta = r + (gamma * self.value_fun[next] - self.value_fun[s]);
            self.eligibility_traces[s] += 1.;

            for cur in 0..n_s {
                self.value_fun[cur] += self.alpha * delta * self.eligibility_traces[cur];
                self.eligibility_traces[cur] *= gamma * self.lambd;
            }

            s = next;
        }

        Ok(())
    }
}

impl Evaluator for TdLambdaEvaluator {
    fn evaluate(&mut self, policy: &dyn Policy, num_episodes: usize) -> Result<Vec<Continous>> {
        debug!(
            num_episodes,
            alpha = self.alpha,
            lambda = self.lambd,
            "running TD(lambda) evaluation"
        );
        self.value_fun.fill(0.);

        for _ in 0..num_episodes {
            self.update_value_function(policy)?;
        }

        Ok(self.value_fun.clone())
    }
}
