use thiserror::Error;

#[derive(Error, Debug)]
pub enum RlError {
    /// Malformed inputs: bad policy distributions, empty state space,
    /// discount factor outside [0, 1].
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An MDP or policy broke its simulation contract: state index out of
    /// range, `step` without a prior `reset`, `step` past a terminal state.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

pub type Result<T> = std::result::Result<T, RlError>;
