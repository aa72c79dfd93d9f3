use tracing::warn;

use crate::model::{PanelKind, ResourceList};

use super::{Panel, ResourcePanel};

/// Ordered, cyclic collection of panels. Exactly one panel is focused.
#[derive(Clone, Debug)]
pub struct PanelSet {
    panels: Vec<ResourcePanel>,
    current: usize,
}

impl Default for PanelSet {
    fn default() -> Self {
        let panels = PanelKind::ALL.into_iter().map(ResourcePanel::new).collect();
        Self::focused_on_first(panels)
    }
}

impl PanelSet {
    /// Build a set from the given kinds, in order. Returns None for an empty
    /// list or a repeated kind, since panel names must be unique.
    pub fn new(kinds: &[PanelKind]) -> Option<Self> {
        if kinds.is_empty() {
            return None;
        }
        for (i, kind) in kinds.iter().enumerate() {
            if kinds[..i].contains(kind) {
                return None;
            }
        }
        let panels = kinds.iter().copied().map(ResourcePanel::new).collect();
        Some(Self::focused_on_first(panels))
    }

    fn focused_on_first(panels: Vec<ResourcePanel>) -> Self {
        let mut set = Self { panels, current: 0 };
        set.focus_index(0);
        set
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &ResourcePanel {
        &self.panels[self.current]
    }

    pub fn current_mut(&mut self) -> &mut ResourcePanel {
        &mut self.panels[self.current]
    }

    pub fn current_kind(&self) -> PanelKind {
        self.current().kind()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourcePanel> {
        self.panels.iter()
    }

    pub fn get(&self, kind: PanelKind) -> Option<&ResourcePanel> {
        self.panels.iter().find(|p| p.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: PanelKind) -> Option<&mut ResourcePanel> {
        self.panels.iter_mut().find(|p| p.kind() == kind)
    }

    /// Focus the next panel, wrapping from the last to the first.
    pub fn next(&mut self) {
        let idx = (self.current + 1) % self.panels.len();
        self.focus_index(idx);
    }

    /// Focus the previous panel, wrapping from the first to the last.
    pub fn prev(&mut self) {
        let count = self.panels.len();
        let idx = (self.current + count - 1) % count;
        self.focus_index(idx);
    }

    /// Focus the panel called `name`. Unknown names leave focus untouched.
    pub fn switch_to(&mut self, name: &str) -> bool {
        match self.panels.iter().position(|p| p.name() == name) {
            Some(idx) => {
                self.focus_index(idx);
                true
            }
            None => {
                warn!(panel = name, "switch to unknown panel ignored");
                false
            }
        }
    }

    pub fn switch_to_kind(&mut self, kind: PanelKind) -> bool {
        self.switch_to(kind.name())
    }

    /// Replace the entries of the panel matching the list's kind.
    pub fn refresh(&mut self, list: ResourceList) -> bool {
        match self.get_mut(list.kind()) {
            Some(panel) => panel.refresh_entries(list),
            None => false,
        }
    }

    // Every panel but the target is unfocused on each switch, so the logical
    // focus can never drift from what is rendered.
    fn focus_index(&mut self, idx: usize) {
        for (i, panel) in self.panels.iter_mut().enumerate() {
            if i == idx {
                panel.focus();
            } else {
                panel.unfocus();
            }
        }
        self.current = idx;
    }
}
