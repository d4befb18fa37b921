use serde::{Deserialize, Serialize};

/// Depth caps for the minimax search, one per rule variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// A full classic game never needs more than nine plies.
    pub classic_depth: usize,
    /// Disappearing games have no natural end, so the search is cut short.
    pub disappearing_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            classic_depth: 9,
            disappearing_depth: 4,
        }
    }
}
