//! TUI runner — terminal setup, the event loop, and cleanup.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use ratatui::Terminal;

use param_registry_core::EntrySnapshot;

use crate::app::{App, Key};
use crate::render;


/// The tree browser runner. Owns the terminal and the [`App`] state.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    tick_rate: Duration,
}

impl Tui {
    /// Enter raw mode and the alternate screen, ready to browse `entries`.
    pub fn new(entries: Vec<EntrySnapshot>) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app: App::new(entries),
            tick_rate: Duration::from_millis(250),
        })
    }

    /// Run the event loop until quit is requested.
    pub fn run(&mut self) -> Result<(), io::Error> {
        loop {
            let app = &self.app;
            self.terminal.draw(|frame| render::draw(frame, app))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key_event) = event::read()? {
                    // Ctrl-C always quits immediately.
                    if key_event.code == KeyCode::Char('c')
                        && key_event.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    self.app.handle_key(map_key(key_event.code));
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        self.shutdown()
    }

    /// Restore the terminal to its normal state.
    fn shutdown(&mut self) -> Result<(), io::Error> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}


fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Key::Up,
        KeyCode::Down | KeyCode::Char('j') => Key::Down,
        KeyCode::Enter | KeyCode::Char(' ') => Key::Toggle,
        KeyCode::Char('q') | KeyCode::Esc => Key::Quit,
        _ => Key::Other,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping() {
        assert_eq!(map_key(KeyCode::Up), Key::Up);
        assert_eq!(map_key(KeyCode::Char('j')), Key::Down);
        assert_eq!(map_key(KeyCode::Char(' ')), Key::Toggle);
        assert_eq!(map_key(KeyCode::Esc), Key::Quit);
        assert_eq!(map_key(KeyCode::Tab), Key::Other);
    }
}
