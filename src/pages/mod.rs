//! Overlay pages layered over the main panel grid.
//!
//! "main" is always underneath. At most one transient overlay (modal, form
//! or detail) sits on top of it, and whichever layer is on top is the only
//! one receiving keys.

mod detail;
mod dialog;
mod form;

use crossterm::event::KeyEvent;
use tracing::{debug, warn};

use crate::model::{PageName, PanelKind};
use crate::panel::PanelSet;

pub use detail::DetailView;
pub use dialog::{ConfirmAction, ConfirmDialog};
pub use form::{Field, FieldKind, Form, FormFocus, FormKind};

/// What a key did to the active overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    None,
    Confirmed,
    Cancelled,
    Submitted,
    Closed,
}

#[derive(Debug)]
pub enum Page {
    Dialog(ConfirmDialog),
    Form(Form),
    Detail(DetailView),
}

impl Page {
    pub fn handle_key(&mut self, key: KeyEvent) -> PageEvent {
        match self {
            Page::Dialog(d) => d.handle_key(key),
            Page::Form(f) => f.handle_key(key),
            Page::Detail(v) => v.handle_key(key),
        }
    }

    /// The panel that gets focus back when this page is dismissed.
    pub fn return_to(&self) -> PanelKind {
        match self {
            Page::Dialog(d) => d.return_to,
            Page::Form(f) => f.return_to,
            Page::Detail(v) => v.return_to,
        }
    }
}

#[derive(Debug)]
pub struct Overlay {
    pub name: PageName,
    pub page: Page,
    /// Requested width and height; `None` fills the screen.
    pub size: Option<(u16, u16)>,
}

#[derive(Debug, Default)]
pub struct PageStack {
    overlay: Option<Overlay>,
}

impl PageStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single interactive page.
    pub fn active(&self) -> PageName {
        self.overlay.as_ref().map(|o| o.name).unwrap_or(PageName::Main)
    }

    pub fn is_main_active(&self) -> bool {
        self.overlay.is_none()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn active_page_mut(&mut self) -> Option<&mut Page> {
        self.overlay.as_mut().map(|o| &mut o.page)
    }

    /// Layer `page` over main under `name` and make it active. A different
    /// overlay already showing is dropped and returned, never kept hidden.
    pub fn show(&mut self, name: PageName, page: Page, size: Option<(u16, u16)>) -> Option<Overlay> {
        if name == PageName::Main {
            warn!("refusing to show an overlay named main");
            return None;
        }
        debug!(page = %name, "show page");
        let displaced = self.overlay.replace(Overlay { name, page, size });
        if let Some(old) = &displaced {
            if old.name != name {
                warn!(displaced = %old.name, page = %name, "overlay replaced another overlay");
            }
        }
        displaced
    }

    /// Remove the overlay called `name`, leaving main as the interactive
    /// surface, and hand focus to `next_focus`.
    pub fn dismiss(&mut self, name: PageName, next_focus: PanelKind, panels: &mut PanelSet) -> Option<Page> {
        let removed = match self.overlay.take() {
            Some(o) if o.name == name => Some(o.page),
            other => {
                debug!(page = %name, "dismiss of a page that is not showing");
                self.overlay = other;
                None
            }
        };
        if removed.is_some() {
            debug!(page = %name, focus = %next_focus, "dismiss page");
        }
        panels.switch_to_kind(next_focus);
        removed
    }
}
