use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, terminal,
};
use std::io::{self, Write};
use std::time::Duration;

pub mod play;

/// Outcome of feeding one key to a [`LineEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Echo(char),
    Erase,
    Ignored,
    Done(String),
    Cancelled,
}

/// Single-line text entry with a length cap. Blank input falls back to the default.
pub struct LineEditor {
    input: String,
    default: String,
    max_len: usize,
}

impl LineEditor {
    pub fn new(default: &str, max_len: usize) -> Self {
        Self {
            input: String::new(),
            default: default.to_string(),
            max_len,
        }
    }

    pub fn feed(&mut self, code: KeyCode) -> Edit {
        match code {
            KeyCode::Enter => {
                let trimmed = self.input.trim();
                if trimmed.is_empty() {
                    Edit::Done(self.default.clone())
                } else {
                    Edit::Done(trimmed.to_string())
                }
            }
            KeyCode::Char(c) if !c.is_control() && self.input.chars().count() < self.max_len => {
                self.input.push(c);
                Edit::Echo(c)
            }
            KeyCode::Backspace => match self.input.pop() {
                Some(_) => Edit::Erase,
                None => Edit::Ignored,
            },
            KeyCode::Esc => Edit::Cancelled,
            _ => Edit::Ignored,
        }
    }
}

/// Reads a line in raw mode. Esc returns an error and leaves the caller's value alone.
pub async fn read_input_raw(default: &str, prompt: &str, max_len: usize) -> anyhow::Result<String> {
    print!("{}: (Default: {}) \r\n> ", prompt, default);
    io::stdout().flush()?;

    let mut editor = LineEditor::new(default, max_len);
    loop {
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match editor.feed(key.code) {
            Edit::Echo(c) => print!("{}", c),
            Edit::Erase => print!("\u{0008} \u{0008}"),
            Edit::Ignored => continue,
            Edit::Done(line) => {
                print!("\r\n");
                return Ok(line);
            }
            Edit::Cancelled => return Err(anyhow::anyhow!("Canceled")),
        }
        io::stdout().flush()?;
    }
}

pub fn wait_for_key() -> anyhow::Result<()> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}

pub fn clear_screen() -> anyhow::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut LineEditor, text: &str) {
        for c in text.chars() {
            editor.feed(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_blank_line_gives_default() {
        let mut editor = LineEditor::new("Player 1", 16);
        type_str(&mut editor, "   ");
        assert_eq!(editor.feed(KeyCode::Enter), Edit::Done("Player 1".to_string()));
    }

    #[test]
    fn test_input_is_capped_and_trimmed() {
        let mut editor = LineEditor::new("x", 5);
        assert_eq!(editor.feed(KeyCode::Char(' ')), Edit::Echo(' '));
        type_str(&mut editor, "Annabelle");
        assert_eq!(editor.feed(KeyCode::Char('z')), Edit::Ignored);
        assert_eq!(editor.feed(KeyCode::Enter), Edit::Done("Anna".to_string()));
    }

    #[test]
    fn test_backspace_and_escape() {
        let mut editor = LineEditor::new("d", 8);
        assert_eq!(editor.feed(KeyCode::Backspace), Edit::Ignored);
        type_str(&mut editor, "Bob");
        assert_eq!(editor.feed(KeyCode::Backspace), Edit::Erase);
        assert_eq!(editor.feed(KeyCode::Enter), Edit::Done("Bo".to_string()));
        assert_eq!(editor.feed(KeyCode::Esc), Edit::Cancelled);
    }
}
