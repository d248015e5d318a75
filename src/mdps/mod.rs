pub mod mdp;
pub mod policy;
pub mod table_mdp;
