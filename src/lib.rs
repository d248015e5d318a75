//! Model-free prediction for finite MDPs: every-visit Monte Carlo, TD(0),
//! and TD(lambda) evaluation of a fixed policy.

pub mod common;
pub mod envs;
pub mod mdps;
pub mod prediction;
