use crate::common::defs::*;
use crate::common::error::*;
use crate::mdps::policy::TablePolicy;
use crate::mdps::table_mdp::TableMdp;

const N_S: usize = 4;
const LEFT: Discrete = 0;
const RIGHT: Discrete = 1;

/// A slippery four-state corridor. Moves succeed with probability 0.9 and
/// slip in place otherwise; entering the rightmost state pays reward 1 and
/// ends the episode.
pub fn corridor(seed: u64) -> Result<TableMdp> {
    let mut transitions = Transitions::new();
    for s in 0..N_S - 1 {
        let back = s.saturating_sub(1);
        transitions.insert(
            (s, LEFT),
            vec![
                Transition {
                    next_state: back,
                    probability: 0.9,
                    reward: 0.,
                    done: false,
                },
                Transition {
                    next_state: s,
                    probability: 0.1,
                    reward: 0.,
                    done: false,
                },
            ],
        );
        transitions.insert(
            (s, RIGHT),
            vec![
                Transition {
                    next_state: s + 1,
                    probability: 0.9,
                    reward: if s + 1 == N_S - 1 { 1. } else { 0. },
                    done: s + 1 == N_S - 1,
                },
                Transition {
                    next_state: s,
                    probability: 0.1,
                    reward: 0.,
                    done: false,
                },
            ],
        );
    }

    TableMdp::new(N_S, 2, 0.9, 0, transitions, seed)
}

/// Prefers moving right (0.8 / 0.2) in every state.
pub fn right_biased_policy(seed: u64) -> Result<TablePolicy> {
    TablePolicy::new(vec![vec![0.2, 0.8]; N_S], seed)
}

/// Picks left and right with equal probability in every state.
pub fn uniform_policy(seed: u64) -> Result<TablePolicy> {
    TablePolicy::new(vec![vec![0.5, 0.5]; N_S], seed)
}
