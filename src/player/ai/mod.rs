pub mod config;
pub mod heuristic;
pub mod minimax;
pub mod random;

pub use config::SearchConfig;
pub use heuristic::HeuristicAI;
pub use minimax::MinimaxAI;
pub use random::RandomAI;
