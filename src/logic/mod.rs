use crate::core::{Board, GameMode, Move, Outcome, Symbol};

/// Live pieces a side may keep in disappearing mode.
pub const MAX_LIVE_MOVES: usize = 3;

/// Rows, columns, then diagonals. Evaluation order is this order.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 勝敗判定
///
/// The first completed line in [`WINNING_LINES`] order is reported. A full
/// board without a line is a draw.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((symbol, line)) = winning_line(board) {
        return Outcome::Win { symbol, line };
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

/// Winner only, without the draw classification. Used by the search.
pub fn winner(board: &Board) -> Option<Symbol> {
    winning_line(board).map(|(symbol, _)| symbol)
}

fn winning_line(board: &Board) -> Option<(Symbol, [usize; 3])> {
    WINNING_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match board[a] {
            Some(symbol) if board[b] == Some(symbol) && board[c] == Some(symbol) => {
                Some((symbol, line))
            }
            _ => None,
        }
    })
}

/// 移動適用
///
/// `cell` must be empty on `board`; this is not re-checked. In disappearing
/// mode the acting side's oldest live move is evicted once it already has
/// [`MAX_LIVE_MOVES`] pieces down.
pub fn apply_move(
    board: &Board,
    moves: &[Move],
    symbol: Symbol,
    cell: usize,
    mode: GameMode,
) -> (Board, Vec<Move>) {
    let mut next_board = *board;
    let mut next_moves = moves.to_vec();

    if mode == GameMode::Disappearing {
        let live = next_moves.iter().filter(|m| m.symbol == symbol).count();
        if live >= MAX_LIVE_MOVES {
            if let Some(pos) = next_moves.iter().position(|m| m.symbol == symbol) {
                let evicted = next_moves.remove(pos);
                next_board.clear(evicted.cell);
            }
        }
    }

    next_moves.push(Move::new(symbol, cell));
    next_board.place(cell, symbol);
    (next_board, next_moves)
}

/// Rebuilds a board from history alone. A later move on the same cell wins.
pub fn derive_board_from_moves(moves: &[Move]) -> Board {
    let mut board = Board::new();
    for mv in moves {
        if mv.cell < crate::core::CELL_COUNT {
            board.place(mv.cell, mv.symbol);
        }
    }
    board
}

/// Cell that will be vacated the next time `symbol` plays, if any.
pub fn next_to_vanish(moves: &[Move], symbol: Symbol) -> Option<usize> {
    let mut own = moves.iter().filter(|m| m.symbol == symbol);
    let oldest = own.next()?;
    if own.count() + 1 >= MAX_LIVE_MOVES {
        Some(oldest.cell)
    } else {
        None
    }
}
