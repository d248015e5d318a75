use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type Discrete = usize;
pub type Continous = f64;

/// One possible outcome of taking an action in a state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub next_state: Discrete,
    pub probability: Continous,
    pub reward: Continous,
    pub done: bool,
}

/// Tabular dynamics: for each (state, action) pair, the distribution over
/// outcomes. Probabilities within one entry must sum to 1.
pub type Transitions = HashMap<(Discrete, Discrete), Vec<Transition>>;
