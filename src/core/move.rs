use super::types::Symbol;
use serde::{Deserialize, Serialize};

/// A single placement. Position in the history decides eviction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    #[serde(rename = "playerSymbol")]
    pub symbol: Symbol,
    #[serde(rename = "cellIndex")]
    pub cell: usize,
}

impl Move {
    pub fn new(symbol: Symbol, cell: usize) -> Self {
        Move { symbol, cell }
    }
}
