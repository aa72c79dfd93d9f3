use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{FieldValue, FormValues, PanelKind};

use super::PageEvent;

/// What a submitted form is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    CreateContainer,
    PullImage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Input(String),
    DropDown { options: Vec<String>, selected: usize },
    Checkbox(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub kind: FieldKind,
}

/// Which part of the form has the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFocus {
    Field(usize),
    Submit,
    Cancel,
}

/// A bordered form: labelled fields followed by a submit and a cancel button.
#[derive(Clone, Debug)]
pub struct Form {
    pub title: String,
    pub kind: FormKind,
    pub return_to: PanelKind,
    pub submit_label: String,
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    pub fn new(title: impl Into<String>, kind: FormKind, return_to: PanelKind) -> Self {
        Self {
            title: title.into(),
            kind,
            return_to,
            submit_label: "Save".to_string(),
            fields: Vec::new(),
            focus: 0,
        }
    }

    pub fn input(mut self, label: &str, initial: &str) -> Self {
        self.fields.push(Field {
            label: label.to_string(),
            kind: FieldKind::Input(initial.to_string()),
        });
        self
    }

    pub fn dropdown(mut self, label: &str, options: &[&str]) -> Self {
        self.fields.push(Field {
            label: label.to_string(),
            kind: FieldKind::DropDown {
                options: options.iter().map(|o| o.to_string()).collect(),
                selected: 0,
            },
        });
        self
    }

    pub fn checkbox(mut self, label: &str, checked: bool) -> Self {
        self.fields.push(Field {
            label: label.to_string(),
            kind: FieldKind::Checkbox(checked),
        });
        self
    }

    pub fn submit_label(mut self, label: &str) -> Self {
        self.submit_label = label.to_string();
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn focus(&self) -> FormFocus {
        match self.focus {
            i if i < self.fields.len() => FormFocus::Field(i),
            i if i == self.fields.len() => FormFocus::Submit,
            _ => FormFocus::Cancel,
        }
    }

    /// Rows needed to draw the form, border included.
    pub fn height(&self) -> u16 {
        self.fields.len() as u16 + 5
    }

    /// Entered values keyed by field label.
    pub fn values(&self) -> FormValues {
        let mut values = FormValues::default();
        for field in &self.fields {
            let value = match &field.kind {
                FieldKind::Input(text) => FieldValue::Text(text.clone()),
                FieldKind::DropDown { options, selected } => {
                    FieldValue::Text(options.get(*selected).cloned().unwrap_or_default())
                }
                FieldKind::Checkbox(checked) => FieldValue::Checked(*checked),
            };
            values.insert(field.label.clone(), value);
        }
        values
    }

    fn slots(&self) -> usize {
        self.fields.len() + 2
    }

    fn move_focus(&mut self, forward: bool) {
        let n = self.slots();
        self.focus = if forward { (self.focus + 1) % n } else { (self.focus + n - 1) % n };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageEvent {
        match key.code {
            KeyCode::Esc => return PageEvent::Cancelled,
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                return PageEvent::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                return PageEvent::None;
            }
            _ => {}
        }

        match self.focus() {
            FormFocus::Submit => match key.code {
                KeyCode::Enter => PageEvent::Submitted,
                KeyCode::Right => {
                    self.move_focus(true);
                    PageEvent::None
                }
                _ => PageEvent::None,
            },
            FormFocus::Cancel => match key.code {
                KeyCode::Enter => PageEvent::Cancelled,
                KeyCode::Left => {
                    self.move_focus(false);
                    PageEvent::None
                }
                _ => PageEvent::None,
            },
            FormFocus::Field(i) => {
                if key.code == KeyCode::Enter {
                    self.move_focus(true);
                    return PageEvent::None;
                }
                edit_field(&mut self.fields[i].kind, key);
                PageEvent::None
            }
        }
    }
}

fn edit_field(kind: &mut FieldKind, key: KeyEvent) {
    match kind {
        FieldKind::Input(text) => match key.code {
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                text.push(c);
            }
            _ => {}
        },
        FieldKind::DropDown { options, selected } => {
            let n = options.len().max(1);
            match key.code {
                KeyCode::Right | KeyCode::Char(' ') => *selected = (*selected + 1) % n,
                KeyCode::Left => *selected = (*selected + n - 1) % n,
                _ => {}
            }
        }
        FieldKind::Checkbox(checked) => {
            if key.code == KeyCode::Char(' ') {
                *checked = !*checked;
            }
        }
    }
}
