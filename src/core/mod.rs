pub mod board;
pub mod r#move;
pub mod types;

pub use board::{Board, CELL_COUNT, CENTER};
pub use r#move::Move;
pub use types::{Difficulty, GameMode, Outcome, Player, Symbol};
