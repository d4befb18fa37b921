//! Persisted session shape and the hydrate-with-defaults loader.
//!
//! Saved data may come from older versions or be hand-edited, so loading
//! never trusts structure: every field is read on its own and replaced by
//! its default when missing or unreadable. The board is always rebuilt from
//! the move history and the outcome re-evaluated.

use super::{random_starter, GameState, Session};
use crate::core::{Board, Difficulty, GameMode, Move, Outcome, Player, Symbol, CELL_COUNT};
use crate::logic::{derive_board_from_moves, evaluate, MAX_LIVE_MOVES};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub players: [Player; 2],
    pub game_state: GameStateSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub game_mode: GameMode,
    pub board: Board,
    pub current_player_index: usize,
    pub winner: Option<Winner>,
    pub winning_line: Option<[usize; 3]>,
    pub moves: Vec<Move>,
    pub last_starter_index: usize,
}

/// `"X"`, `"O"` or `"draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("move targets cell {0}, outside the board")]
    CellOutOfRange(usize),
    #[error("cell {0} appears more than once in the history")]
    DuplicateCell(usize),
    #[error("{0} has more than three live moves")]
    TooManyLive(Symbol),
}

impl Snapshot {
    pub fn from_session(session: &Session) -> Self {
        let state = session.state();
        let (winner, winning_line) = match state.outcome {
            Outcome::Ongoing => (None, None),
            Outcome::Draw => (Some(Winner::Draw), None),
            Outcome::Win { symbol, line } => {
                let winner = match symbol {
                    Symbol::X => Winner::X,
                    Symbol::O => Winner::O,
                };
                (Some(winner), Some(line))
            }
        };

        Snapshot {
            players: session.players().clone(),
            game_state: GameStateSnapshot {
                game_mode: state.mode,
                board: state.board,
                current_player_index: state.current_player_index,
                winner,
                winning_line,
                moves: state.moves.clone(),
                last_starter_index: state.last_starter_index,
            },
        }
    }

    /// Restores through [`hydrate`], so the same validation applies.
    pub fn into_session(self) -> Session {
        match serde_json::to_value(&self) {
            Ok(value) => hydrate(&value),
            Err(e) => {
                warn!(error = %e, "snapshot could not be re-encoded");
                Session::new_random()
            }
        }
    }
}

/// Rebuilds a session from arbitrary JSON.
///
/// Anything that is not an object yields a fresh session with a random starter.
pub fn hydrate(value: &Value) -> Session {
    let Some(root) = value.as_object() else {
        warn!("saved data is not an object, starting fresh");
        return Session::new_random();
    };

    let players = hydrate_players(root.get("players"));
    let state = match root.get("gameState").and_then(Value::as_object) {
        Some(obj) => hydrate_state(obj),
        None => GameState::fresh(GameMode::Classic, random_starter()),
    };
    Session::restore(players, state)
}

pub fn hydrate_str(raw: &str) -> Session {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => hydrate(&value),
        Err(e) => {
            warn!(error = %e, "saved data is not valid JSON, starting fresh");
            Session::new_random()
        }
    }
}

fn hydrate_players(value: Option<&Value>) -> [Player; 2] {
    let list = value.and_then(Value::as_array);
    [0usize, 1].map(|index| {
        let obj = list
            .and_then(|l| l.get(index))
            .and_then(Value::as_object);
        match obj {
            Some(obj) => hydrate_player(index, obj),
            None => Player::default_for(index),
        }
    })
}

/// Seat id and symbol are fixed by position and never read back.
fn hydrate_player(index: usize, obj: &Map<String, Value>) -> Player {
    let mut player = Player::default_for(index);
    if let Some(name) = field::<String>(obj, "name") {
        player.name = name;
    }
    if let Some(wins) = field::<u32>(obj, "wins") {
        player.wins = wins;
    }
    if let Some(is_bot) = field::<bool>(obj, "isBot") {
        player.is_bot = is_bot;
    }
    if let Some(difficulty) = field::<Difficulty>(obj, "difficulty") {
        player.difficulty = difficulty;
    }
    player
}

fn hydrate_state(obj: &Map<String, Value>) -> GameState {
    let mode = field::<GameMode>(obj, "gameMode").unwrap_or_default();
    let last_starter_index = field::<usize>(obj, "lastStarterIndex").map_or(0, |i| i.min(1));
    let current_player_index =
        field::<usize>(obj, "currentPlayerIndex").map_or(last_starter_index, |i| i.min(1));
    let moves = field::<Vec<Move>>(obj, "moves").unwrap_or_default();

    if let Err(e) = validate_history(&moves, mode) {
        warn!(error = %e, "discarding saved round");
        return GameState::fresh(mode, last_starter_index);
    }

    let board = derive_board_from_moves(&moves);
    GameState {
        mode,
        board,
        outcome: evaluate(&board),
        moves,
        current_player_index,
        last_starter_index,
    }
}

/// Checks that a history could have been produced by normal play.
pub fn validate_history(moves: &[Move], mode: GameMode) -> Result<(), HistoryError> {
    let mut seen = [false; CELL_COUNT];
    for mv in moves {
        if mv.cell >= CELL_COUNT {
            return Err(HistoryError::CellOutOfRange(mv.cell));
        }
        if seen[mv.cell] {
            return Err(HistoryError::DuplicateCell(mv.cell));
        }
        seen[mv.cell] = true;
    }

    if mode == GameMode::Disappearing {
        for symbol in [Symbol::X, Symbol::O] {
            if moves.iter().filter(|m| m.symbol == symbol).count() > MAX_LIVE_MOVES {
                return Err(HistoryError::TooManyLive(symbol));
            }
        }
    }
    Ok(())
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    obj.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}
