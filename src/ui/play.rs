use crate::display::{render_session, DisplayState};
use tactic_infinity::config::AppConfig;
use tactic_infinity::game::scheduler::BotScheduler;
use tactic_infinity::game::{PlayerUpdate, Session};
use tactic_infinity::player::selector_for;
use tactic_infinity::storage;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const MAX_NAME_LEN: usize = 16;

/// Interactive session loop. Saves after every change and on exit.
pub async fn run_play(config: &AppConfig) -> anyhow::Result<()> {
    let mut session = storage::load(&config.save_path);
    let mut scheduler = BotScheduler::new(config.thinking_delay());
    let mut dirty = true;
    info!(generation = session.generation(), "session started");

    loop {
        // Delayed bot move
        if let Some(turn) = scheduler.try_recv() {
            let player = session.current_player();
            let selector = selector_for(player.difficulty, config.search);
            if session.play_bot_turn_with(turn, selector.as_ref()) {
                dirty = true;
            }
        }

        match session.pending_bot_turn() {
            Some(turn) => scheduler.schedule(turn),
            None => scheduler.cancel(),
        }

        if dirty {
            if let Err(e) = storage::save(&config.save_path, &session) {
                warn!(error = %e, "failed to save session");
            }
            let state = DisplayState {
                thinking: scheduler.is_pending(),
            };
            render_session(&session, &state)?;
            dirty = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }

        dirty = true;
        match code {
            KeyCode::Char('q') => break,
            KeyCode::Char(c @ '1'..='9') => {
                // A human cannot play on a bot's turn.
                if !session.current_player().is_bot {
                    let cell = c as usize - '1' as usize;
                    dirty = session.submit_move(cell);
                }
            }
            KeyCode::Char('n') => session.start_new_round(),
            KeyCode::Char('r') => session.restart_round(),
            KeyCode::Char('m') => {
                let mode = session.state().mode.toggled();
                session.change_mode(mode);
            }
            KeyCode::Char('b') => toggle_bot(&mut session, 0),
            KeyCode::Char('B') => toggle_bot(&mut session, 1),
            KeyCode::Char('d') => cycle_difficulty(&mut session, 0),
            KeyCode::Char('D') => cycle_difficulty(&mut session, 1),
            KeyCode::Char('e') => rename(&mut session, 0).await?,
            KeyCode::Char('E') => rename(&mut session, 1).await?,
            KeyCode::Char('s') => session.reset_scores(),
            KeyCode::Char('F') => {
                scheduler.cancel();
                storage::remove(&config.save_path)?;
                session.factory_reset();
            }
            _ => dirty = false,
        }
    }

    scheduler.cancel();
    storage::save(&config.save_path, &session)?;
    info!(mode = ?session.state().mode, "session saved");
    Ok(())
}

fn toggle_bot(session: &mut Session, index: usize) {
    let is_bot = !session.players()[index].is_bot;
    session.update_player(
        index,
        PlayerUpdate {
            is_bot: Some(is_bot),
            ..Default::default()
        },
    );
}

fn cycle_difficulty(session: &mut Session, index: usize) {
    let difficulty = session.players()[index].difficulty.next();
    session.update_player(
        index,
        PlayerUpdate {
            difficulty: Some(difficulty),
            ..Default::default()
        },
    );
}

async fn rename(session: &mut Session, index: usize) -> anyhow::Result<()> {
    let current = session.players()[index].name.clone();
    print!("\r\n");
    // Esc keeps the old name.
    let prompt = format!("Name for {}", current);
    if let Ok(name) = super::read_input_raw(&current, &prompt, MAX_NAME_LEN).await {
        session.update_player(
            index,
            PlayerUpdate {
                name: Some(name),
                ..Default::default()
            },
        );
    }
    Ok(())
}
