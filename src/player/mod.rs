pub mod ai;
pub mod controller;

pub use ai::{HeuristicAI, MinimaxAI, RandomAI, SearchConfig};
pub use controller::MoveSelector;

use crate::core::{Board, Difficulty, GameMode, Move, Symbol};

/// Strategy object for a difficulty tier.
pub fn selector_for(difficulty: Difficulty, search: SearchConfig) -> Box<dyn MoveSelector> {
    match difficulty {
        Difficulty::Easy => Box::new(RandomAI::new("Easy AI")),
        Difficulty::Medium => Box::new(HeuristicAI::new("Medium AI")),
        Difficulty::Hard => Box::new(MinimaxAI::with_config("Hard AI", search)),
    }
}

/// Picks the bot's cell with the default search limits.
///
/// Returns `None` when no empty cell is left, whatever the difficulty or mode.
pub fn select_move(
    board: &Board,
    moves: &[Move],
    symbol: Symbol,
    difficulty: Difficulty,
    mode: GameMode,
) -> Option<usize> {
    selector_for(difficulty, SearchConfig::default()).choose_move(board, moves, symbol, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Symbol::{O, X};
    use crate::logic::apply_move;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
    const ALL_MODES: [GameMode; 2] = [GameMode::Classic, GameMode::Disappearing];

    fn board(cells: [Option<Symbol>; 9]) -> Board {
        Board::from_cells(cells)
    }

    #[test]
    fn test_full_board_has_no_move() {
        let full = board([
            Some(X), Some(O), Some(X),
            Some(X), Some(O), Some(O),
            Some(O), Some(X), Some(X),
        ]);
        for difficulty in ALL_DIFFICULTIES {
            for mode in ALL_MODES {
                for symbol in [X, O] {
                    assert_eq!(select_move(&full, &[], symbol, difficulty, mode), None);
                }
            }
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let b = board([Some(X), Some(X), None, Some(O), Some(O), None, None, None, None]);
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            for mode in ALL_MODES {
                assert_eq!(select_move(&b, &[], X, difficulty, mode), Some(2));
            }
        }
    }

    #[test]
    fn test_blocks_threat() {
        let b = board([Some(O), Some(O), None, Some(X), None, None, None, None, None]);
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(select_move(&b, &[], X, difficulty, GameMode::Classic), Some(2));
        }
    }

    #[test]
    fn test_opening_book_takes_center() {
        let empty = Board::new();
        for mode in ALL_MODES {
            assert_eq!(select_move(&empty, &[], X, Difficulty::Hard, mode), Some(4));
        }

        let mut corner = Board::new();
        corner.place(0, X);
        assert_eq!(select_move(&corner, &[], O, Difficulty::Hard, GameMode::Classic), Some(4));
    }

    #[test]
    fn test_easy_picks_empty_cell() {
        let b = board([Some(X), Some(O), Some(X), None, Some(O), None, Some(X), Some(O), Some(X)]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let cell = RandomAI::choose_with_rng(&b, &mut rng).unwrap();
            assert!(cell == 3 || cell == 5);
        }
    }

    #[test]
    fn test_medium_prefers_win_over_block() {
        // X can win on 2, O threatens on 5.
        let b = board([Some(X), Some(X), None, Some(O), Some(O), None, None, None, None]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            HeuristicAI::choose_with_rng(&b, &[], X, GameMode::Classic, &mut rng),
            Some(2)
        );
        assert_eq!(
            HeuristicAI::choose_with_rng(&b, &[], O, GameMode::Classic, &mut rng),
            Some(5)
        );
    }

    #[test]
    fn test_medium_blocks_lowest_of_several_threats() {
        // X threatens 2, 7 and 8 at once; O has no win of its own.
        let b = board([Some(X), Some(X), None, None, Some(X), Some(O), Some(O), None, None]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..8 {
            assert_eq!(
                HeuristicAI::choose_with_rng(&b, &[], O, GameMode::Classic, &mut rng),
                Some(2)
            );
        }
    }

    #[test]
    fn test_medium_sees_eviction_in_disappearing_mode() {
        // X holds 0, 1, 8 with 0 the oldest; playing 2 would evict 0, so no win.
        let mut b = Board::new();
        let mut moves = Vec::new();
        for (symbol, cell) in [(X, 0), (O, 3), (X, 1), (O, 6), (X, 8), (O, 7)] {
            let (nb, nm) = apply_move(&b, &moves, symbol, cell, GameMode::Disappearing);
            b = nb;
            moves = nm;
        }
        assert_eq!(
            ai::heuristic::winning_cell(&b, &moves, X, GameMode::Disappearing),
            None
        );
        assert_eq!(ai::heuristic::winning_cell(&b, &moves, X, GameMode::Classic), Some(2));
    }

    #[test]
    fn test_hard_never_loses_from_center_reply() {
        // O to move after X opened in a corner and O took the centre; X plays 8.
        let b = board([Some(X), None, None, None, Some(O), None, None, None, Some(X)]);
        // Any corner for O loses to a fork; every edge holds, and the lowest one is kept.
        let cell = select_move(&b, &[], O, Difficulty::Hard, GameMode::Classic).unwrap();
        assert_eq!(cell, 1);
    }

    #[test]
    fn test_hard_keeps_lowest_cell_among_equal_scores() {
        // Every corner draws against a centre opening; edges lose.
        let mut b = Board::new();
        b.place(4, X);
        assert_eq!(select_move(&b, &[], O, Difficulty::Hard, GameMode::Classic), Some(0));
    }

    #[test]
    fn test_hard_depth_follows_mode() {
        let ai = MinimaxAI::new("Hard AI");
        assert_eq!(ai.max_depth(GameMode::Classic), 9);
        assert_eq!(ai.max_depth(GameMode::Disappearing), 4);
    }

    #[test]
    fn test_hard_plays_in_disappearing_mode() {
        let mut b = Board::new();
        let mut moves = Vec::new();
        for (symbol, cell) in [(X, 4), (O, 0), (X, 2), (O, 6), (X, 8), (O, 5)] {
            let (nb, nm) = apply_move(&b, &moves, symbol, cell, GameMode::Disappearing);
            b = nb;
            moves = nm;
        }
        assert_eq!(crate::logic::evaluate(&b), crate::core::Outcome::Ongoing);
        let cell = select_move(&b, &moves, X, Difficulty::Hard, GameMode::Disappearing).unwrap();
        assert!(b.is_empty_at(cell));
    }
}
