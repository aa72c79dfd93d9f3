//! Key binding table and dispatch.
//!
//! Bindings are either global or scoped to one panel. Panel-scoped bindings
//! are checked first, so a panel can shadow a global key. The table is built
//! once at startup and only read afterwards.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::PanelKind;

/// A key as written in the binding table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A non-character key (Tab, Enter, arrows...).
    Code(KeyCode),
    /// A printable character typed without Ctrl or Alt.
    Rune(char),
    /// Ctrl plus a character.
    Ctrl(char),
}

impl Key {
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let ctrl_or_alt = event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match *self {
            Key::Code(code) => event.code == code,
            Key::Rune(c) => event.code == KeyCode::Char(c) && !ctrl_or_alt,
            Key::Ctrl(c) => {
                event.code == KeyCode::Char(c) && event.modifiers.contains(KeyModifiers::CONTROL)
            }
        }
    }
}

/// What a key press asks the shell to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    NextPanel,
    PrevPanel,
    Quit,
    Refresh(PanelKind),
    Inspect(PanelKind),
    Remove(PanelKind),
    CreateContainer,
    PullImage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: Key,
    pub action: Action,
}

impl KeyBinding {
    pub const fn new(key: Key, action: Action) -> Self {
        Self { key, action }
    }
}

/// Navigation and quit keys that apply whatever panel has focus.
pub fn global_bindings() -> Vec<KeyBinding> {
    use Action::*;
    vec![
        KeyBinding::new(Key::Rune('h'), PrevPanel),
        KeyBinding::new(Key::Code(KeyCode::Left), PrevPanel),
        KeyBinding::new(Key::Code(KeyCode::BackTab), PrevPanel),
        KeyBinding::new(Key::Rune('l'), NextPanel),
        KeyBinding::new(Key::Code(KeyCode::Right), NextPanel),
        KeyBinding::new(Key::Code(KeyCode::Tab), NextPanel),
        KeyBinding::new(Key::Rune('q'), Quit),
        KeyBinding::new(Key::Ctrl('c'), Quit),
    ]
}

/// The bindings each panel registers for itself.
pub fn panel_bindings(kind: PanelKind) -> Vec<KeyBinding> {
    let mut bindings = Vec::new();
    if kind == PanelKind::Images {
        bindings.push(KeyBinding::new(Key::Rune('c'), Action::CreateContainer));
        bindings.push(KeyBinding::new(Key::Rune('p'), Action::PullImage));
    }
    bindings.push(KeyBinding::new(Key::Rune('d'), Action::Remove(kind)));
    bindings.push(KeyBinding::new(Key::Code(KeyCode::Enter), Action::Inspect(kind)));
    bindings.push(KeyBinding::new(Key::Rune('r'), Action::Refresh(kind)));
    bindings
}

#[derive(Clone, Debug, Default)]
pub struct Keymap {
    global: Vec<KeyBinding>,
    local: HashMap<PanelKind, Vec<KeyBinding>>,
}

impl Keymap {
    pub fn new(global: Vec<KeyBinding>) -> Self {
        Self {
            global,
            local: HashMap::new(),
        }
    }

    pub fn bind_panel(&mut self, kind: PanelKind, bindings: Vec<KeyBinding>) {
        self.local.entry(kind).or_default().extend(bindings);
    }

    pub fn panel(&self, kind: PanelKind) -> &[KeyBinding] {
        self.local.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve a key for the focused panel: its own bindings first, then the
    /// global ones. `None` means the key should pass through.
    pub fn dispatch(&self, focused: PanelKind, event: &KeyEvent) -> Option<Action> {
        self.panel(focused)
            .iter()
            .chain(self.global.iter())
            .find(|binding| binding.key.matches(event))
            .map(|binding| binding.action)
    }
}
