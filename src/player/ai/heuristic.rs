//! One-ply lookahead: take a win, else block, else play randomly.

use super::random::RandomAI;
use crate::core::{Board, GameMode, Move, Symbol};
use crate::logic::{apply_move, winner};
use crate::player::MoveSelector;
use rand::Rng;

pub struct HeuristicAI {
    pub name: String,
}

impl HeuristicAI {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn choose_with_rng<R: Rng + ?Sized>(
        board: &Board,
        moves: &[Move],
        symbol: Symbol,
        mode: GameMode,
        rng: &mut R,
    ) -> Option<usize> {
        if board.is_full() {
            return None;
        }
        winning_cell(board, moves, symbol, mode)
            .or_else(|| winning_cell(board, moves, symbol.opponent(), mode))
            .or_else(|| RandomAI::choose_with_rng(board, rng))
    }
}

/// Lowest empty cell where `symbol` completes a line.
///
/// Simulated through [`apply_move`] so an eviction in disappearing mode is
/// taken into account.
pub fn winning_cell(board: &Board, moves: &[Move], symbol: Symbol, mode: GameMode) -> Option<usize> {
    board.empty_cells().into_iter().find(|&cell| {
        let (next_board, _) = apply_move(board, moves, symbol, cell, mode);
        winner(&next_board) == Some(symbol)
    })
}

impl MoveSelector for HeuristicAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(
        &self,
        board: &Board,
        moves: &[Move],
        symbol: Symbol,
        mode: GameMode,
    ) -> Option<usize> {
        let mut rng = rand::thread_rng();
        Self::choose_with_rng(board, moves, symbol, mode, &mut rng)
    }
}
