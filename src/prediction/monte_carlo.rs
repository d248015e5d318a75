use super::evaluator::{checked_state, Evaluator};
use crate::common::defs::*;
use crate::common::error::*;
use crate::mdps::mdp::Mdp;
use crate::mdps::policy::Policy;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Every-visit Monte Carlo prediction.
///
/// Runs full episodes, computes discounted returns backwards over the
/// recorded trajectory, and keeps an incremental running average of the
/// returns observed at each state. Every visit to a state within one
/// episode contributes one update. Visit counters persist across episodes
/// within one `evaluate` call and reset with the value function.
pub struct McEvaluator {
    env: Rc<RefCell<dyn Mdp>>,
    value_fun: Vec<Continous>,
    visits: Vec<u32>,
}

impl McEvaluator {
    pub fn new(env: Rc<RefCell<dyn Mdp>>) -> Result<Self> {
        let n_s = env.borrow().n_s();
        if n_s == 0 {
            return Err(RlError::InvalidArgument(
                "mdp reports an empty state space".to_string(),
            ));
        }

        Ok(Self {
            env,
            value_fun: vec![0.; n_s],
            visits: vec![0; n_s],
        })
    }

    /// Simulates one episode to termination. Entry `t` of the trajectory is
    /// `(s_t, r_{t+1})`: a visited state and the reward received on leaving
    /// it. Episodes are assumed to terminate in finite steps; a
    /// never-terminating MDP/policy pair is a construction defect upstream.
    fn run_episode(&self, policy: &dyn Policy) -> Result<Vec<(Discrete, Continous)>> {
        let env = &mut *self.env.borrow_mut();
        let n_s = env.n_s();

        let mut s = checked_state(env.reset()?, n_s)?;
        let mut ep = vec![];
        loop {
            let a = policy.sample_action(s)?;
            let (next, r, done) = env.step(a)?;
            let next = checked_state(next, n_s)?;
            ep.push((s, r));
            if done {
                break;
            }
            s = next;
        }

        Ok(ep)
    }

    fn update_value_function(&mut self, ep: &[(Discrete, Continous)], gamma: Continous) {
        let mut g = 0.;
        for &(s, r) in ep.iter().rev() {
            g = gamma * g + r;
            self.visits[s] += 1;
            self.value_fun[s] += (g - self.value_fun[s]) / self.visits[s] as Continous;
        }
    }
}

impl Evaluator for McEvaluator {
    fn evaluate(&mut self, policy: &dyn Policy, num_episodes: usize) -> Result<Vec<Continous>> {
        debug!(num_episodes, "running Monte Carlo evaluation");
        self.value_fun.fill(0.);
        self.visits.fill(0);

        let gamma = self.env.borrow().gamma();
        for _ in 0..num_episodes {
            let ep = self.run_episode(policy)?;
            self.update_value_function(&ep, gamma);
        }

        Ok(self.value_fun.clone())
    }
}
