use std::time::Instant;

use ratatui::widgets::ListState;

use crate::domain::Item;
use crate::flow::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Read,
    Skimmed,
}

/// All mutable TUI state. The run loop owns one of these and hands it to the
/// renderer each frame.
pub struct TuiApp {
    pub screen: Screen,

    // Save screen
    pub url_input: String,
    pub form_error: Option<String>,

    // Processing screen
    pub active_item: Option<Item>,
    pub processing_error: Option<String>,
    pub preview_at: Option<Instant>,
    pub poll_attempts: u32,

    // List screens (today, library)
    pub items: Vec<Item>,
    pub list_state: ListState,

    // Reading screen
    pub reading_scroll: u16,
    pub completion: Option<CompletionKind>,

    // Reflection screen
    pub rating: Option<bool>,
    pub note: String,

    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            screen: Screen::Save,
            url_input: String::new(),
            form_error: None,
            active_item: None,
            processing_error: None,
            preview_at: None,
            poll_attempts: 0,
            items: Vec::new(),
            list_state: ListState::default(),
            reading_scroll: 0,
            completion: None,
            rating: None,
            note: String::new(),
            status_message: None,
            should_quit: false,
        }
    }

    /// Switch screens and reset the state the new screen starts from.
    pub fn enter(&mut self, screen: Screen) {
        match screen {
            Screen::Save => {
                self.url_input.clear();
                self.form_error = None;
            }
            Screen::Processing => {
                self.processing_error = None;
                self.preview_at = None;
                self.poll_attempts = 0;
            }
            Screen::Reading => {
                self.reading_scroll = 0;
            }
            Screen::Reflection => {
                self.rating = None;
                self.note.clear();
            }
            Screen::TodaysReads | Screen::Library => {
                self.list_state.select(if self.items.is_empty() {
                    None
                } else {
                    Some(0)
                });
            }
            Screen::Preview => {}
        }
        self.status_message = None;
        self.screen = screen;
    }

    /// Whether the current screen owns a text field that should capture
    /// printable keys.
    pub fn text_entry(&self) -> bool {
        match self.screen {
            Screen::Save => true,
            // The note field opens once a rating is picked.
            Screen::Reflection => self.rating.is_some(),
            _ => false,
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    pub fn move_up(&mut self) {
        match self.screen {
            Screen::Reading => self.reading_scroll = self.reading_scroll.saturating_sub(1),
            Screen::TodaysReads | Screen::Library => {
                if let Some(i) = self.list_state.selected() {
                    self.list_state.select(Some(i.saturating_sub(1)));
                }
            }
            _ => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.screen {
            Screen::Reading => self.reading_scroll = self.reading_scroll.saturating_add(1),
            Screen::TodaysReads | Screen::Library => {
                if let Some(i) = self.list_state.selected() {
                    if i + 1 < self.items.len() {
                        self.list_state.select(Some(i + 1));
                    }
                }
            }
            _ => {}
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_resets_screen_state() {
        let mut app = TuiApp::new();
        app.url_input.push_str("https://example.com");
        app.form_error = Some("oops".to_string());

        app.enter(Screen::Library);
        app.enter(Screen::Save);

        assert!(app.url_input.is_empty());
        assert!(app.form_error.is_none());
    }

    #[test]
    fn test_text_entry_per_screen() {
        let mut app = TuiApp::new();
        assert!(app.text_entry());

        app.enter(Screen::Reflection);
        assert!(!app.text_entry());
        app.rating = Some(true);
        assert!(app.text_entry());

        app.enter(Screen::Library);
        assert!(!app.text_entry());
    }

    #[test]
    fn test_list_selection_stays_in_bounds() {
        let mut app = TuiApp::new();
        app.items = Vec::new();
        app.enter(Screen::Library);
        assert_eq!(app.list_state.selected(), None);
        app.move_down();
        assert_eq!(app.list_state.selected(), None);
    }
}
