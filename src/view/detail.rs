use std::io::{self, Write};
use crossterm::{queue, style::{Color, ResetColor, SetForegroundColor}};

use crate::layout::Rect;
use crate::pages::DetailView;
use super::shared::{clear_area, draw_box, truncate_str, write_at};

pub fn render_detail(out: &mut impl Write, area: Rect, view: &DetailView) -> io::Result<()> {
    clear_area(out, area)?;
    draw_box(out, area, &view.title, true)?;
    let inner = area.inner();
    let width = inner.width as usize;

    for (i, line) in view.lines().iter().skip(view.scroll()).take(inner.height as usize).enumerate() {
        write_at(out, inner.x, inner.y + i as u16, &truncate_str(line, width))?;
    }

    let hint = " Esc/q: close | j/k: scroll ";
    if area.width as usize > hint.len() + 4 && area.height > 1 {
        queue!(out, SetForegroundColor(Color::DarkGrey))?;
        write_at(out, area.x + area.width - hint.len() as u16 - 2, area.bottom() - 1, hint)?;
        queue!(out, ResetColor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PanelKind;

    #[test]
    fn shows_lines_from_scroll_offset() {
        let mut view = DetailView::new("detail", "first\nsecond\nthird", PanelKind::Images);
        view.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Down,
            crossterm::event::KeyModifiers::NONE,
        ));
        let mut buf = Vec::new();
        render_detail(&mut buf, Rect::new(0, 0, 40, 6), &view).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(!text.contains("first"));
        assert!(text.contains("second"));
        assert!(text.contains("third"));
    }
}
