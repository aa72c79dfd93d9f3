use crossterm::event::{KeyCode, KeyEvent};

use crate::model::PanelKind;

use super::PageEvent;

const PAGE_STEP: usize = 10;

/// Scrollable read-only text, used for inspect output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub return_to: PanelKind,
    lines: Vec<String>,
    scroll: usize,
}

impl DetailView {
    pub fn new(title: impl Into<String>, text: &str, return_to: PanelKind) -> Self {
        Self {
            title: title.into(),
            return_to,
            lines: text.lines().map(str::to_string).collect(),
            scroll: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageEvent {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return PageEvent::Closed,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(PAGE_STEP as isize),
            KeyCode::PageUp => self.scroll_by(-(PAGE_STEP as isize)),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        PageEvent::None
    }
}
