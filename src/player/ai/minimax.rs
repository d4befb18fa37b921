use super::config::SearchConfig;
use crate::core::{Board, GameMode, Move, Symbol, CENTER};
use crate::logic::{apply_move, winner};
use crate::player::MoveSelector;
use tracing::{debug, instrument};

const WIN_SCORE: i32 = 10;

pub struct MinimaxAI {
    pub name: String,
    pub config: SearchConfig,
}

impl MinimaxAI {
    pub fn new(name: &str) -> Self {
        Self::with_config(name, SearchConfig::default())
    }

    pub fn with_config(name: &str, config: SearchConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
        }
    }

    pub fn max_depth(&self, mode: GameMode) -> usize {
        match mode {
            GameMode::Classic => self.config.classic_depth,
            GameMode::Disappearing => self.config.disappearing_depth,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &Board,
        moves: &[Move],
        depth: usize,
        is_maximizing: bool,
        hero: Symbol,
        mode: GameMode,
        max_depth: usize,
    ) -> i32 {
        match winner(board) {
            Some(s) if s == hero => return WIN_SCORE - depth as i32,
            Some(_) => return depth as i32 - WIN_SCORE,
            None => {}
        }
        if depth >= max_depth {
            return 0;
        }

        let empty = board.empty_cells();
        // 引き分け (disappearing mode never fills the board)
        if empty.is_empty() {
            return 0;
        }

        let mover = if is_maximizing { hero } else { hero.opponent() };
        let scores = empty.into_iter().map(|cell| {
            let (next_board, next_moves) = apply_move(board, moves, mover, cell, mode);
            self.minimax(
                &next_board,
                &next_moves,
                depth + 1,
                !is_maximizing,
                hero,
                mode,
                max_depth,
            )
        });

        if is_maximizing {
            scores.max().unwrap_or(0)
        } else {
            scores.min().unwrap_or(0)
        }
    }
}

impl MoveSelector for MinimaxAI {
    #[instrument(skip(self, board, moves))]
    fn choose_move(
        &self,
        board: &Board,
        moves: &[Move],
        symbol: Symbol,
        mode: GameMode,
    ) -> Option<usize> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        // Opening book
        if empty.len() >= 8 && board.is_empty_at(CENTER) {
            return Some(CENTER);
        }

        let max_depth = self.max_depth(mode);
        let mut best_move = None;
        let mut best_value = i32::MIN;

        for cell in empty {
            let (next_board, next_moves) = apply_move(board, moves, symbol, cell, mode);
            // The root move is already played, so the opponent moves next.
            let value = self.minimax(&next_board, &next_moves, 0, false, symbol, mode, max_depth);
            debug!(cell, value, "root move scored");

            if value > best_value {
                best_value = value;
                best_move = Some(cell);
            }
        }

        best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
