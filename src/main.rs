use itertools::Itertools;
use mdp_prediction::common::defs::*;
use mdp_prediction::common::error::*;
use mdp_prediction::envs::corridor::*;
use mdp_prediction::mdps::mdp::Mdp;
use mdp_prediction::prediction::evaluator::Evaluator;
use mdp_prediction::prediction::monte_carlo::McEvaluator;
use mdp_prediction::prediction::td::TdEvaluator;
use mdp_prediction::prediction::td_lambda::TdLambdaEvaluator;
use std::cell::RefCell;
use std::rc::Rc;

const NUM_EPISODES: usize = 1000;

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mdp: Rc<RefCell<dyn Mdp>> = Rc::new(RefCell::new(corridor(2718)?));
    let policy_1 = right_biased_policy(42)?;
    let policy_2 = uniform_policy(43)?;

    println!("Evaluating using Monte Carlo:");
    let mc = &mut McEvaluator::new(Rc::clone(&mdp))?;
    let v_pi1 = mc.evaluate(&policy_1, NUM_EPISODES)?;
    let v_pi2 = mc.evaluate(&policy_2, NUM_EPISODES)?;
    compare_policies(&v_pi1, &v_pi2);

    println!("\nEvaluating using TD(0):");
    let td = &mut TdEvaluator::new(Rc::clone(&mdp), 0.1)?;
    let v_pi1 = td.evaluate(&policy_1, NUM_EPISODES)?;
    let v_pi2 = td.evaluate(&policy_2, NUM_EPISODES)?;
    compare_policies(&v_pi1, &v_pi2);

    println!("\nEvaluating using TD(lambda):");
    let tdl = &mut TdLambdaEvaluator::new(Rc::clone(&mdp), 0.1, 0.5)?;
    let v_pi1 = tdl.evaluate(&policy_1, NUM_EPISODES)?;
    let v_pi2 = tdl.evaluate(&policy_2, NUM_EPISODES)?;
    compare_policies(&v_pi1, &v_pi2);

    Ok(())
}

/// State-by-state comparison of two value functions.
fn compare_policies(v_pi1: &[Continous], v_pi2: &[Continous]) {
    for (i, (val1, val2)) in v_pi1.iter().zip_eq(v_pi2).enumerate() {
        if val1 > val2 {
            println!("State {i}: Policy 1 is better (Value: {val1:.4} vs {val2:.4})");
        } else if val1 < val2 {
            println!("State {i}: Policy 2 is better (Value: {val1:.4} vs {val2:.4})");
        } else {
            println!("State {i}: Both policies are equally good (Value: {val1:.4})");
        }
    }
}
