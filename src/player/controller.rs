use crate::core::{Board, GameMode, Move, Symbol};

/// 指し手選択のtrait
pub trait MoveSelector: Send + Sync {
    /// Cell to play for `symbol`, or `None` when the board has no empty cell.
    fn choose_move(
        &self,
        board: &Board,
        moves: &[Move],
        symbol: Symbol,
        mode: GameMode,
    ) -> Option<usize>;

    fn name(&self) -> &str;
}
