pub mod evaluator;
pub mod monte_carlo;
pub mod td;
pub mod td_lambda;
