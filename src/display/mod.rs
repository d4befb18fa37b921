use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{self, stdout, Write};
use tactic_infinity::core::{GameMode, Outcome, Player, Symbol};
use tactic_infinity::game::Session;

#[derive(Debug, Default)]
pub struct DisplayState {
    /// A bot move is scheduled and not yet applied.
    pub thinking: bool,
}

pub fn render_session(session: &Session, state: &DisplayState) -> io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    let game = session.state();
    print!("=== {} TicTacToe ===\r\n", game.mode);
    if game.mode == GameMode::Disappearing {
        print!("{}\r\n", "Max 3 moves per player".dark_grey());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    render_players(session)?;
    print!("\r\n");
    render_board(session)?;
    print!("\r\n");

    let status = status_line(session, state);
    print!("{}\r\n\r\n", status.bold().yellow());

    print!("[1-9]: Play | [n]: New round | [r]: Restart | [m]: Mode | [q]: Quit\r\n");
    print!("[b/B]: Bot P1/P2 | [d/D]: Difficulty P1/P2 | [e/E]: Rename | [s]: Reset scores | [F]: Factory reset\r\n");
    out.flush()
}

fn render_players(session: &Session) -> io::Result<()> {
    let game = session.state();
    for (index, player) in session.players().iter().enumerate() {
        let is_active = !game.outcome.is_over() && game.current_player_index == index;
        let is_winner = game.outcome.winner() == Some(player.symbol);
        let line = format!(
            "{} {} [{}] wins: {} {}",
            if is_active { ">" } else { " " },
            player.name,
            player.symbol,
            player.wins,
            player_kind(player),
        );
        if is_winner {
            print!("{}\r\n", line.green().bold());
        } else {
            print!("{}\r\n", colored(line, player.symbol));
        }
    }
    Ok(())
}

fn render_board(session: &Session) -> io::Result<()> {
    let game = session.state();
    let winning_line = match game.outcome {
        Outcome::Win { line, .. } => Some(line),
        _ => None,
    };
    let vanishing = session.next_vanishing_cell();

    for row in 0..3 {
        print!("   ");
        for col in 0..3 {
            let cell = row * 3 + col;
            let text = match game.board[cell] {
                Some(symbol) => format!(" {} ", symbol),
                None => format!(" {} ", cell + 1),
            };

            let in_line = winning_line.is_some_and(|line| line.contains(&cell));
            match game.board[cell] {
                Some(_) if in_line => print!("{}", text.black().on_green()),
                Some(_) if vanishing == Some(cell) => print!("{}", text.dark_grey().crossed_out()),
                Some(symbol) => print!("{}", colored(text, symbol)),
                None => print!("{}", text.dark_grey()),
            }
            if col < 2 {
                print!("|");
            }
        }
        print!("\r\n");
        if row < 2 {
            print!("   ---+---+---\r\n");
        }
    }
    Ok(())
}

fn status_line(session: &Session, state: &DisplayState) -> String {
    let game = session.state();
    match game.outcome {
        Outcome::Draw => "It's a Draw! [n] to play again".to_string(),
        Outcome::Win { symbol, .. } => {
            format!("{} Wins! [n] to play again", session.player_for(symbol).name)
        }
        Outcome::Ongoing => {
            let player = session.current_player();
            if state.thinking {
                format!("{} is thinking...", player.name)
            } else {
                format!("{}'s turn ({})", player.name, player.symbol)
            }
        }
    }
}

fn player_kind(player: &Player) -> String {
    if player.is_bot {
        format!("(Bot, {:?})", player.difficulty)
    } else {
        "(Human)".to_string()
    }
}

fn colored(text: String, symbol: Symbol) -> crossterm::style::StyledContent<String> {
    match symbol {
        Symbol::X => text.cyan(),
        Symbol::O => text.magenta(),
    }
}
