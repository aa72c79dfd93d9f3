//! Resource panels: one focusable list per resource kind.

mod set;

use std::io::{self, Write};

use crossterm::event::{KeyCode, KeyEvent};

use crate::keymap::{self, KeyBinding};
use crate::layout::Rect;
use crate::model::{Container, Image, Network, PanelKind, Resource, ResourceList, Volume};
use crate::view::Presenter;

pub use set::PanelSet;

/// Capabilities every panel provides to the shell.
pub trait Panel {
    fn kind(&self) -> PanelKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn focus(&mut self);
    fn unfocus(&mut self);
    fn is_focused(&self) -> bool;

    /// Bindings scoped to this panel, checked before the global ones.
    fn key_bindings(&self) -> Vec<KeyBinding> {
        keymap::panel_bindings(self.kind())
    }

    /// Keys nothing else claimed. Returns the event back if the panel ignored it.
    fn handle_key(&mut self, key: KeyEvent) -> Option<KeyEvent>;

    /// Swap in a fresh snapshot. Returns false if `list` is for another kind.
    fn refresh_entries(&mut self, list: ResourceList) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(key, label)` of the selected entry.
    fn selected(&self) -> Option<(String, String)>;

    fn entry_labels(&self) -> Vec<String>;

    fn render<W: Write>(&self, out: &mut W, area: Rect) -> io::Result<()>;
}

/// A list of one resource kind with a selection cursor.
#[derive(Clone, Debug)]
pub struct ListPanel<R: Resource> {
    entries: Vec<R>,
    selected: usize,
    focused: bool,
}

pub type ImagesPanel = ListPanel<Image>;
pub type ContainersPanel = ListPanel<Container>;
pub type VolumesPanel = ListPanel<Volume>;
pub type NetworksPanel = ListPanel<Network>;

impl<R: Resource> Default for ListPanel<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
            focused: false,
        }
    }
}

impl<R: Resource> ListPanel<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_entry(&self) -> Option<&R> {
        self.entries.get(self.selected)
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.entries.is_empty() { None } else { Some(self.selected) }
    }

    /// Replace the entries wholesale. The cursor follows the previously
    /// selected key when it survives, otherwise it is clamped.
    pub fn set_entries(&mut self, entries: Vec<R>) {
        let previous = self.selected_entry().map(|e| e.key().to_string());
        self.entries = entries;
        self.selected = previous
            .and_then(|key| self.entries.iter().position(|e| e.key() == key))
            .unwrap_or(self.selected)
            .min(self.entries.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
            return true;
        }
        false
    }

    pub fn select_prev(&mut self) -> bool {
        if self.selected > 0 && !self.entries.is_empty() {
            self.selected -= 1;
            return true;
        }
        false
    }
}

impl<R: Resource> Panel for ListPanel<R> {
    fn kind(&self) -> PanelKind {
        R::KIND
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn unfocus(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<KeyEvent> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
            }
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.entries.len().saturating_sub(1);
            }
            _ => return Some(key),
        }
        None
    }

    fn refresh_entries(&mut self, list: ResourceList) -> bool {
        match R::unwrap(list) {
            Some(entries) => {
                self.set_entries(entries);
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn selected(&self) -> Option<(String, String)> {
        self.selected_entry().map(|e| (e.key().to_string(), e.label()))
    }

    fn entry_labels(&self) -> Vec<String> {
        self.entries.iter().map(Resource::label).collect()
    }

    fn render<W: Write>(&self, out: &mut W, area: Rect) -> io::Result<()> {
        let rows: Vec<Vec<String>> = self.entries.iter().map(Resource::columns).collect();
        Presenter::render_panel(
            out,
            area,
            R::KIND.title(),
            R::HEADERS,
            R::WIDTHS,
            &rows,
            self.selected_index(),
            self.focused,
        )
    }
}

/// The fixed set of panel variants the shell knows about.
#[derive(Clone, Debug)]
pub enum ResourcePanel {
    Images(ImagesPanel),
    Containers(ContainersPanel),
    Volumes(VolumesPanel),
    Networks(NetworksPanel),
}

impl ResourcePanel {
    pub fn new(kind: PanelKind) -> Self {
        match kind {
            PanelKind::Images => ResourcePanel::Images(ListPanel::new()),
            PanelKind::Containers => ResourcePanel::Containers(ListPanel::new()),
            PanelKind::Volumes => ResourcePanel::Volumes(ListPanel::new()),
            PanelKind::Networks => ResourcePanel::Networks(ListPanel::new()),
        }
    }
}

macro_rules! each_panel {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            ResourcePanel::Images($p) => $body,
            ResourcePanel::Containers($p) => $body,
            ResourcePanel::Volumes($p) => $body,
            ResourcePanel::Networks($p) => $body,
        }
    };
}

impl Panel for ResourcePanel {
    fn kind(&self) -> PanelKind {
        each_panel!(self, p => p.kind())
    }

    fn focus(&mut self) {
        each_panel!(self, p => p.focus())
    }

    fn unfocus(&mut self) {
        each_panel!(self, p => p.unfocus())
    }

    fn is_focused(&self) -> bool {
        each_panel!(self, p => p.is_focused())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<KeyEvent> {
        each_panel!(self, p => p.handle_key(key))
    }

    fn refresh_entries(&mut self, list: ResourceList) -> bool {
        each_panel!(self, p => p.refresh_entries(list))
    }

    fn len(&self) -> usize {
        each_panel!(self, p => p.len())
    }

    fn selected(&self) -> Option<(String, String)> {
        each_panel!(self, p => p.selected())
    }

    fn entry_labels(&self) -> Vec<String> {
        each_panel!(self, p => p.entry_labels())
    }

    fn render<W: Write>(&self, out: &mut W, area: Rect) -> io::Result<()> {
        each_panel!(self, p => p.render(out, area))
    }
}
