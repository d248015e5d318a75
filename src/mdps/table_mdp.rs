use super::mdp::Mdp;
use crate::common::defs::*;
use crate::common::error::*;
use rand::distributions::WeightedIndex;
use rand::prelude::*;

/// A finite MDP backed by a [`Transitions`] table.
///
/// Next transitions are sampled categorically by their `probability` weight
/// from a seeded RNG. The hidden current state is `None` until `reset` and
/// again after a terminal step.
#[derive(Debug)]
pub struct TableMdp {
    n_s: usize,
    n_a: usize,
    gamma: Continous,
    start_state: Discrete,
    transitions: Transitions,
    current: Option<Discrete>,
    rng: StdRng,
}

impl TableMdp {
    pub fn new(
        n_s: usize,
        n_a: usize,
        gamma: Continous,
        start_state: Discrete,
        transitions: Transitions,
        seed: u64,
    ) -> Result<Self> {
        if n_s == 0 {
            return Err(RlError::InvalidArgument(
                "n_s must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&gamma) {
            return Err(RlError::InvalidArgument(format!(
                "gamma must be in [0, 1], got {gamma}"
            )));
        }
        if start_state >= n_s {
            return Err(RlError::InvalidArgument(format!(
                "start state {start_state} out of range for {n_s} states"
            )));
        }

        for (&(s, a), ts) in transitions.iter() {
            if s >= n_s || a >= n_a {
                return Err(RlError::InvalidArgument(format!(
                    "transition table entry ({s}, {a}) out of range"
                )));
            }
            let mut sum = 0.;
            for t in ts {
                if t.next_state >= n_s {
                    return Err(RlError::InvalidArgument(format!(
                        "next state {} out of range for {n_s} states",
                        t.next_state
                    )));
                }
                if t.probability < 0. {
                    return Err(RlError::InvalidArgument(format!(
                        "negative probability in transition table entry ({s}, {a})"
                    )));
                }
                sum += t.probability;
            }
            if (sum - 1.).abs() > 1e-6 {
                return Err(RlError::InvalidArgument(format!(
                    "transition probabilities for ({s}, {a}) sum to {sum}, expected 1"
                )));
            }
        }

        Ok(Self {
            n_s,
            n_a,
            gamma,
            start_state,
            transitions,
            current: None,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl Mdp for TableMdp {
    fn n_s(&self) -> usize {
        self.n_s
    }

    fn n_a(&self) -> usize {
        self.n_a
    }

    fn gamma(&self) -> Continous {
        self.gamma
    }

    fn reset(&mut self) -> Result<Discrete> {
        self.current = Some(self.start_state);
        Ok(self.start_state)
    }

    fn step(&mut self, action: Discrete) -> Result<(Discrete, Continous, bool)> {
        let s = self.current.ok_or_else(|| {
            RlError::ContractViolation(
                "step called without a prior reset or after a terminal step".to_string(),
            )
        })?;

        let ts = self.transitions.get(&(s, action)).ok_or_else(|| {
            RlError::ContractViolation(format!("no transitions defined for ({s}, {action})"))
        })?;
        let dist = WeightedIndex::new(ts.iter().map(|t| t.probability))
            .map_err(|e| RlError::ContractViolation(format!("unsampleable ({s}, {action}): {e}")))?;
        let next = &ts[dist.sample(&mut self.rng)];

        self.current = if next.done { None } else { Some(next.next_state) };
        Ok((next.next_state, next.reward, next.done))
    }
}
