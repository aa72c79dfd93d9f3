use crossterm::event::KeyEvent;
use tracing::debug;

use crate::model::PageName;
use crate::pages::{Page, PageEvent};
use crate::panel::Panel;

use super::App;

impl App {
    /// Route one key. The active overlay gets it first; on main the keymap
    /// decides and unmatched keys fall through to the focused panel.
    /// Returns whether anything changed on screen.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(page) = self.pages.active_page_mut() {
            let event = page.handle_key(key);
            self.handle_page_event(event);
            return true;
        }

        match self.keymap.dispatch(self.panels.current_kind(), &key) {
            Some(action) => {
                debug!(?action, panel = %self.panels.current_kind(), "key dispatched");
                self.perform(action);
                true
            }
            None => self.panels.current_mut().handle_key(key).is_none(),
        }
    }

    fn handle_page_event(&mut self, event: PageEvent) {
        let name = self.pages.active();
        let Some(page) = self.pages.active_page_mut() else {
            return;
        };
        let return_to = page.return_to();

        match event {
            PageEvent::None => {}
            PageEvent::Confirmed => {
                let action = match page {
                    Page::Dialog(dialog) => dialog.take_action(),
                    _ => None,
                };
                if let Some(action) = action {
                    action();
                    if let Some(description) = self.pending.take() {
                        self.set_status(format!("{}...", description));
                    }
                }
                self.pending = None;
                self.pages.dismiss(name, return_to, &mut self.panels);
            }
            PageEvent::Cancelled | PageEvent::Closed => {
                self.pending = None;
                self.pages.dismiss(name, return_to, &mut self.panels);
            }
            PageEvent::Submitted => {
                if name == PageName::Form {
                    self.submit_form();
                }
            }
        }
    }
}
