use std::fmt;

use crossterm::event::{KeyCode, KeyEvent};

use crate::model::PanelKind;

use super::PageEvent;

/// Deferred work run when the user picks the confirm button.
pub type ConfirmAction = Box<dyn FnOnce() + Send>;

/// Two-button confirmation: the caller's label, then "Cancel".
pub struct ConfirmDialog {
    pub message: String,
    pub confirm_label: String,
    pub return_to: PanelKind,
    cancel_selected: bool,
    on_confirm: Option<ConfirmAction>,
}

impl ConfirmDialog {
    pub const CANCEL_LABEL: &'static str = "Cancel";

    pub fn new(
        message: impl Into<String>,
        confirm_label: impl Into<String>,
        return_to: PanelKind,
        on_confirm: ConfirmAction,
    ) -> Self {
        Self {
            message: message.into(),
            confirm_label: confirm_label.into(),
            return_to,
            cancel_selected: false,
            on_confirm: Some(on_confirm),
        }
    }

    pub fn cancel_selected(&self) -> bool {
        self.cancel_selected
    }

    /// The confirm action, at most once.
    pub fn take_action(&mut self) -> Option<ConfirmAction> {
        self.on_confirm.take()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageEvent {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab
            | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.cancel_selected = !self.cancel_selected;
                PageEvent::None
            }
            KeyCode::Enter if self.cancel_selected => PageEvent::Cancelled,
            KeyCode::Enter | KeyCode::Char('y') => PageEvent::Confirmed,
            KeyCode::Esc | KeyCode::Char('n') => PageEvent::Cancelled,
            _ => PageEvent::None,
        }
    }
}

impl fmt::Debug for ConfirmDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmDialog")
            .field("message", &self.message)
            .field("confirm_label", &self.confirm_label)
            .field("return_to", &self.return_to)
            .field("cancel_selected", &self.cancel_selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dialog() -> ConfirmDialog {
        ConfirmDialog::new("Remove?", "Done", PanelKind::Images, Box::new(|| {}))
    }

    #[test]
    fn enter_confirms_by_default() {
        assert_eq!(dialog().handle_key(key(KeyCode::Enter)), PageEvent::Confirmed);
    }

    #[test]
    fn moving_to_cancel_then_enter_cancels() {
        let mut d = dialog();
        assert_eq!(d.handle_key(key(KeyCode::Right)), PageEvent::None);
        assert!(d.cancel_selected());
        assert_eq!(d.handle_key(key(KeyCode::Enter)), PageEvent::Cancelled);
    }

    #[test]
    fn esc_cancels() {
        assert_eq!(dialog().handle_key(key(KeyCode::Esc)), PageEvent::Cancelled);
    }

    #[test]
    fn action_is_taken_once() {
        let mut d = dialog();
        assert!(d.take_action().is_some());
        assert!(d.take_action().is_none());
    }
}
