use crate::core::{Board, GameMode, Move, Symbol};
use crate::player::MoveSelector;
use rand::seq::SliceRandom;
use rand::Rng;

pub struct RandomAI {
    pub name: String,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
        }
    }

    pub fn choose_with_rng<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
        board.empty_cells().choose(rng).copied()
    }
}

impl MoveSelector for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(
        &self,
        board: &Board,
        _moves: &[Move],
        _symbol: Symbol,
        _mode: GameMode,
    ) -> Option<usize> {
        let mut rng = rand::thread_rng();
        Self::choose_with_rng(board, &mut rng)
    }
}
