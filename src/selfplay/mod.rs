use crate::core::{Difficulty, GameMode, Outcome, Symbol};
use crate::game::{PlayerUpdate, Session};
use crate::player::{selector_for, MoveSelector, SearchConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub num_rounds: usize,
    pub x_difficulty: Difficulty,
    pub o_difficulty: Difficulty,
    pub mode: GameMode,
    /// Disappearing rounds can cycle forever; past this many plies the round is a draw.
    pub max_moves: usize,
    pub search: SearchConfig,
    pub save_stats: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_rounds: 20,
            x_difficulty: Difficulty::Hard,
            o_difficulty: Difficulty::Medium,
            mode: GameMode::Classic,
            max_moves: 60,
            search: SearchConfig::default(),
            save_stats: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub starter: Symbol,
    pub winner: Option<Symbol>,
    pub moves: usize,
    /// Ended by `max_moves` rather than by the rules.
    pub capped: bool,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_rounds: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub x_difficulty: String,
    pub o_difficulty: String,
    pub mode: String,
    pub rounds: Vec<RoundResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: RoundResult) {
        self.total_rounds += 1;
        match result.winner {
            Some(Symbol::X) => self.x_wins += 1,
            Some(Symbol::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
        self.rounds.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.rounds.is_empty() {
            return;
        }
        let total_moves: usize = self.rounds.iter().map(|r| r.moves).sum();
        self.avg_moves = total_moves as f64 / self.rounds.len() as f64;
    }
}

/// Plays bot-vs-bot rounds in parallel. The opening seat alternates per round.
pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let start = Instant::now();
    let results: Vec<RoundResult> = (0..config.num_rounds)
        .into_par_iter()
        .map(|round| play_round(config, round % 2))
        .collect();

    let mut stats = SelfPlayStats::new();
    stats.x_difficulty = format!("{:?}", config.x_difficulty);
    stats.o_difficulty = format!("{:?}", config.o_difficulty);
    stats.mode = config.mode.to_string();
    for result in results {
        stats.add_result(result);
    }
    info!(
        rounds = stats.total_rounds,
        x_wins = stats.x_wins,
        o_wins = stats.o_wins,
        draws = stats.draws,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "self-play finished"
    );

    if config.save_stats {
        save_stats(&stats)?;
    }
    Ok(stats)
}

fn play_round(config: &SelfPlayConfig, starter: usize) -> RoundResult {
    let start = Instant::now();
    let mut session = Session::new(starter);
    session.change_mode(config.mode);
    for (index, difficulty) in [config.x_difficulty, config.o_difficulty].into_iter().enumerate() {
        session.update_player(
            index,
            PlayerUpdate {
                is_bot: Some(true),
                difficulty: Some(difficulty),
                ..Default::default()
            },
        );
    }

    let selectors: [Box<dyn MoveSelector>; 2] = [
        selector_for(config.x_difficulty, config.search),
        selector_for(config.o_difficulty, config.search),
    ];

    let mut moves = 0;
    while let Some(turn) = session.pending_bot_turn() {
        if moves >= config.max_moves {
            break;
        }
        if !session.play_bot_turn_with(turn, selectors[turn.player_index].as_ref()) {
            break;
        }
        moves += 1;
    }

    let outcome = session.state().outcome;
    RoundResult {
        starter: Symbol::from_index(starter),
        winner: outcome.winner(),
        moves,
        capped: outcome == Outcome::Ongoing,
        time_ms: start.elapsed().as_millis(),
    }
}

fn save_stats(stats: &SelfPlayStats) -> anyhow::Result<PathBuf> {
    let stats_dir = "selfplay_stats";
    std::fs::create_dir_all(stats_dir)?;

    let filename = PathBuf::from(format!(
        "{}/stats_{}.json",
        stats_dir,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let file = std::fs::File::create(&filename)?;
    serde_json::to_writer_pretty(file, stats)?;
    info!(path = %filename.display(), "self-play stats saved");
    Ok(filename)
}
