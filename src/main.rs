mod display;
mod ui;

use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tactic_infinity::config::AppConfig;
use tactic_infinity::selfplay::{run_selfplay, SelfPlayConfig};
use tactic_infinity::{Difficulty, GameMode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default();
    init_tracing(&config)?;

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(&config).await;

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

/// The terminal is in raw mode, so logs go to a file.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    loop {
        ui::clear_screen()?;
        print!("=== Tactic Infinity ===\r\n");
        print!("\r\nSelect mode:\r\n");
        print!("1. Play\r\n");
        print!("2. Self-Play (AI vs AI)\r\n");
        print!("q. Quit\r\n");

        let choice = loop {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('1') => break "play",
                        KeyCode::Char('2') => break "selfplay",
                        KeyCode::Char('q') => return Ok(()),
                        _ => {}
                    }
                }
            }
        };

        match choice {
            "play" => ui::play::run_play(config).await?,
            _ => run_selfplay_menu(config).await?,
        }
    }
}

async fn run_selfplay_menu(config: &AppConfig) -> anyhow::Result<()> {
    ui::clear_screen()?;
    print!("=== Self-Play ===\r\n\r\n");

    let Ok(rounds) = ui::read_input_raw("20", "Number of rounds", ANSWER_LEN).await else {
        return Ok(());
    };
    let Ok(x) = ui::read_input_raw("Hard", "X difficulty (Easy/Medium/Hard)", ANSWER_LEN).await else {
        return Ok(());
    };
    let Ok(o) = ui::read_input_raw("Medium", "O difficulty (Easy/Medium/Hard)", ANSWER_LEN).await else {
        return Ok(());
    };
    let Ok(mode) = ui::read_input_raw("classic", "Mode (classic/disappearing)", ANSWER_LEN).await else {
        return Ok(());
    };

    let selfplay_config = SelfPlayConfig {
        num_rounds: rounds.parse().unwrap_or(20),
        x_difficulty: parse_difficulty(&x).unwrap_or(Difficulty::Hard),
        o_difficulty: parse_difficulty(&o).unwrap_or(Difficulty::Medium),
        mode: if mode.eq_ignore_ascii_case("disappearing") {
            GameMode::Disappearing
        } else {
            GameMode::Classic
        },
        search: config.search,
        save_stats: true,
        ..Default::default()
    };

    print!("\r\nRunning {} rounds...\r\n", selfplay_config.num_rounds);
    let stats = tokio::task::spawn_blocking(move || run_selfplay(&selfplay_config)).await??;

    let pct = |n: usize| n as f64 / stats.total_rounds.max(1) as f64 * 100.0;
    print!("\r\n--- Statistics ---\r\n");
    print!("X ({}) Wins: {} ({:.1}%)\r\n", stats.x_difficulty, stats.x_wins, pct(stats.x_wins));
    print!("O ({}) Wins: {} ({:.1}%)\r\n", stats.o_difficulty, stats.o_wins, pct(stats.o_wins));
    print!("Draws: {} ({:.1}%)\r\n", stats.draws, pct(stats.draws));
    print!("Avg Moves: {:.1}\r\n\r\n", stats.avg_moves);
    print!("Press any key to return to menu...\r\n");
    ui::wait_for_key()
}

const ANSWER_LEN: usize = 12;

fn parse_difficulty(s: &str) -> Option<Difficulty> {
    match s.to_ascii_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}
