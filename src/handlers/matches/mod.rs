pub mod match_handler;
pub mod results_handler;
