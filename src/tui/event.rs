use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    MoveUp,
    MoveDown,
    Select,
    MarkRead,
    MarkSkimmed,
    OpenInBrowser,
    GoSave,
    GoToday,
    GoLibrary,
    RateYes,
    RateNo,
    Input(char),
    Backspace,
    None,
}

impl Action {
    /// Screens with a focused text field swallow printable keys; everything
    /// else uses the global map.
    pub fn from_key(key: KeyEvent, text_entry: bool) -> Self {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') = key.code {
                return Action::Quit;
            }
        }

        if text_entry {
            return match key.code {
                KeyCode::Char(c) => Action::Input(c),
                KeyCode::Backspace => Action::Backspace,
                KeyCode::Enter => Action::Select,
                KeyCode::Esc => Action::Back,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc => Action::Back,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Enter => Action::Select,
            KeyCode::Char('r') => Action::MarkRead,
            KeyCode::Char('s') => Action::MarkSkimmed,
            KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('a') => Action::GoSave,
            KeyCode::Char('t') => Action::GoToday,
            KeyCode::Char('l') => Action::GoLibrary,
            KeyCode::Char('y') => Action::RateYes,
            KeyCode::Char('n') => Action::RateNo,
            _ => Action::None,
        }
    }
}
