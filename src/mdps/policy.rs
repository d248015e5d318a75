use crate::common::defs::*;
use crate::common::error::*;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::cell::RefCell;

/// A fixed stochastic policy over a finite state space.
///
/// `sample_action` must be a pure function of (policy, state) plus the
/// policy's internal random source; evaluators never observe side effects.
pub trait Policy {
    fn sample_action(&self, state: Discrete) -> Result<Discrete>;
}

/// One action distribution per state, validated at construction.
///
/// The RNG lives in a `RefCell` so sampling can take `&self`; the crate is
/// single-threaded by contract.
#[derive(Debug)]
pub struct TablePolicy {
    dists: Vec<WeightedIndex<Continous>>,
    rng: RefCell<StdRng>,
}

impl TablePolicy {
    /// `rows[s]` is the action distribution for state `s`: non-negative
    /// entries summing to 1, one entry per action.
    pub fn new(rows: Vec<Vec<Continous>>, seed: u64) -> Result<Self> {
        let mut dists = Vec::with_capacity(rows.len());
        for (s, row) in rows.iter().enumerate() {
            if row.iter().any(|&p| p < 0.) {
                return Err(RlError::InvalidArgument(format!(
                    "negative action probability for state {s}"
                )));
            }
            let sum: Continous = row.iter().sum();
            if (sum - 1.).abs() > 1e-6 {
                return Err(RlError::InvalidArgument(format!(
                    "action probabilities for state {s} sum to {sum}, expected 1"
                )));
            }
            let dist = WeightedIndex::new(row)
                .map_err(|e| RlError::InvalidArgument(format!("state {s}: {e}")))?;
            dists.push(dist);
        }

        Ok(Self {
            dists,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        })
    }
}

impl Policy for TablePolicy {
    fn sample_action(&self, state: Discrete) -> Result<Discrete> {
        let dist = self.dists.get(state).ok_or_else(|| {
            RlError::ContractViolation(format!(
                "state {state} out of range for {} policy rows",
                self.dists.len()
            ))
        })?;

        Ok(dist.sample(&mut *self.rng.borrow_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;

    #[test]
    fn sample_frequencies_follow_the_distribution() {
        let policy = TablePolicy::new(vec![vec![0.2, 0.8]], 2718).unwrap();

        let n = 10000;
        let mut counts = [0; 2];
        for _ in 0..n {
            counts[policy.sample_action(0).unwrap()] += 1;
        }

        assert_float_eq!(counts[0] as Continous / n as Continous, 0.2, abs <= 2e-2);
        assert_float_eq!(counts[1] as Continous / n as Continous, 0.8, abs <= 2e-2);
    }

    #[test]
    fn is_debug_formattable() {
        // unwrap_err on Result<TablePolicy> needs the Debug impl.
        let policy = TablePolicy::new(vec![vec![1.0]], 0).unwrap();
        assert!(format!("{policy:?}").contains("TablePolicy"));
    }

    #[test]
    fn rejects_negative_probabilities() {
        let err = TablePolicy::new(vec![vec![1.5, -0.5]], 0).unwrap_err();
        assert!(matches!(err, RlError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_rows_not_summing_to_one() {
        let err = TablePolicy::new(vec![vec![0.3, 0.3]], 0).unwrap_err();
        assert!(matches!(err, RlError::InvalidArgument(_)));
    }

    #[test]
    fn out_of_range_state_is_a_contract_violation() {
        let policy = TablePolicy::new(vec![vec![1.0]], 0).unwrap();
        let err = policy.sample_action(7).unwrap_err();
        assert!(matches!(err, RlError::ContractViolation(_)));
    }
}
