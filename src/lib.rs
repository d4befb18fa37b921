pub mod config;
pub mod core;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;
pub mod storage;


pub use crate::core::{Board, Difficulty, GameMode, Move, Outcome, Player, Symbol};
pub use crate::game::{BotTurn, GameState, PlayerUpdate, Session};
pub use crate::logic::{apply_move, derive_board_from_moves, evaluate, next_to_vanish};
pub use crate::player::select_move;
