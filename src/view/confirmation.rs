use std::io::{self, Write};
use crossterm::{queue, style::{Attribute, ResetColor, SetAttribute}};

use crate::layout::Rect;
use crate::pages::ConfirmDialog;
use super::shared::{clear_area, draw_box, truncate_str, write_at, write_selectable};

pub fn render_confirmation(out: &mut impl Write, area: Rect, dialog: &ConfirmDialog) -> io::Result<()> {
    clear_area(out, area)?;
    draw_box(out, area, "Confirm", true)?;
    let inner = area.inner();
    if inner.height < 2 {
        return Ok(());
    }

    let width = inner.width as usize;
    let message = truncate_str(&dialog.message, width);
    let x = inner.x + (width.saturating_sub(message.chars().count()) / 2) as u16;
    let mid = inner.y + inner.height / 2 - 1;
    queue!(out, SetAttribute(Attribute::Bold))?;
    write_at(out, x, mid, &message)?;
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;

    let confirm = format!("[ {} ]", dialog.confirm_label);
    let cancel = format!("[ {} ]", ConfirmDialog::CANCEL_LABEL);
    let buttons_width = confirm.chars().count() + 3 + cancel.chars().count();
    let bx = inner.x + (width.saturating_sub(buttons_width) / 2) as u16;
    let by = mid + 2;
    if by < inner.bottom() {
        write_selectable(out, bx, by, &confirm, !dialog.cancel_selected())?;
        write_selectable(out, bx + confirm.chars().count() as u16 + 3, by, &cancel, dialog.cancel_selected())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PanelKind;

    #[test]
    fn shows_message_and_both_buttons() {
        let dialog = ConfirmDialog::new(
            "Do you want to remove the image?",
            "Done",
            PanelKind::Images,
            Box::new(|| {}),
        );
        let mut buf = Vec::new();
        render_confirmation(&mut buf, Rect::new(0, 0, 60, 9), &dialog).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Do you want to remove the image?"));
        assert!(text.contains("[ Done ]"));
        assert!(text.contains("[ Cancel ]"));
    }
}
