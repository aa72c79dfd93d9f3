use std::io::{self, Write};

use crate::layout::Rect;
use crate::pages::{FieldKind, Form, FormFocus};
use super::shared::{clear_area, draw_box, fit, write_at, write_selectable};

const LABEL_WIDTH: usize = 12;

pub fn render_form(out: &mut impl Write, area: Rect, form: &Form) -> io::Result<()> {
    clear_area(out, area)?;
    draw_box(out, area, &form.title, true)?;
    let inner = area.inner();
    if inner.width as usize <= LABEL_WIDTH + 2 {
        return Ok(());
    }
    let value_width = inner.width as usize - LABEL_WIDTH - 2;
    let focus = form.focus();

    for (i, field) in form.fields().iter().enumerate() {
        let y = inner.y + 1 + i as u16;
        if y >= inner.bottom() {
            return Ok(());
        }
        let focused = focus == FormFocus::Field(i);
        let value = match &field.kind {
            FieldKind::Input(text) if focused => format!("{}_", text),
            FieldKind::Input(text) => text.clone(),
            FieldKind::DropDown { options, selected } => {
                format!("< {} >", options.get(*selected).map(String::as_str).unwrap_or(""))
            }
            FieldKind::Checkbox(checked) => if *checked { "[x]".to_string() } else { "[ ]".to_string() },
        };
        write_at(out, inner.x + 1, y, &fit(&field.label, LABEL_WIDTH))?;
        write_selectable(out, inner.x + 1 + LABEL_WIDTH as u16, y, &fit(&value, value_width), focused)?;
    }

    let by = inner.y + 2 + form.fields().len() as u16;
    if by < inner.bottom() {
        let submit = format!("[ {} ]", form.submit_label);
        write_selectable(out, inner.x + 1, by, &submit, focus == FormFocus::Submit)?;
        write_selectable(out, inner.x + 4 + submit.chars().count() as u16, by, "[ Cancel ]", focus == FormFocus::Cancel)?;
    }
    Ok(())
}
