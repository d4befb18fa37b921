use serde::{Deserialize, Serialize};
use std::fmt;

/// Player mark. Index 0 always plays `X`, index 1 always plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Symbol {
    #[default]
    X,
    O,
}

impl Symbol {
    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Seat index owning this symbol.
    pub fn index(self) -> usize {
        match self {
            Symbol::X => 0,
            Symbol::O => 1,
        }
    }

    pub fn from_index(index: usize) -> Symbol {
        if index == 0 {
            Symbol::X
        } else {
            Symbol::O
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

/// Rule variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    /// At most three live pieces per side; the fourth placement evicts the oldest.
    Disappearing,
}

impl GameMode {
    pub fn toggled(self) -> GameMode {
        match self {
            GameMode::Classic => GameMode::Disappearing,
            GameMode::Disappearing => GameMode::Classic,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameMode::Classic => write!(f, "Classic"),
            GameMode::Disappearing => write!(f, "Infinity"),
        }
    }
}

/// Bot strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn next(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub symbol: Symbol,
    pub wins: u32,
    pub is_bot: bool,
    pub difficulty: Difficulty,
}

impl Player {
    /// Default occupant of seat `index` (0 or 1).
    pub fn default_for(index: usize) -> Self {
        Player {
            id: index,
            name: format!("Player {}", index + 1),
            symbol: Symbol::from_index(index),
            wins: 0,
            is_bot: false,
            difficulty: Difficulty::default(),
        }
    }

    pub fn defaults() -> [Player; 2] {
        [Player::default_for(0), Player::default_for(1)]
    }
}

/// Terminal classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Ongoing,
    Win {
        symbol: Symbol,
        line: [usize; 3],
    },
    Draw,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    pub fn winner(&self) -> Option<Symbol> {
        match self {
            Outcome::Win { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }
}
