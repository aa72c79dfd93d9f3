use std::io::{self, Write};
use crossterm::{queue, style::{Color, ResetColor, SetForegroundColor}};

use crate::layout::Rect;
use super::shared::{columns_line, draw_box, write_at, write_bold, write_selectable};

#[allow(clippy::too_many_arguments)]
pub fn render_panel(
    out: &mut impl Write,
    area: Rect,
    title: &str,
    headers: &[&str],
    widths: &[usize],
    rows: &[Vec<String>],
    selected: Option<usize>,
    focused: bool,
) -> io::Result<()> {
    draw_box(out, area, &format!("{} ({})", title, rows.len()), focused)?;

    let inner = area.inner();
    if inner.height == 0 || inner.width == 0 {
        return Ok(());
    }
    let width = inner.width as usize;

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_bold(out, inner.x, inner.y, &columns_line(&header, widths, width))?;

    if rows.is_empty() {
        queue!(out, SetForegroundColor(Color::DarkGrey))?;
        if inner.height > 1 {
            write_at(out, inner.x, inner.y + 1, "(none)")?;
        }
        return queue!(out, ResetColor);
    }

    // Keep the cursor row on screen.
    let visible = inner.height.saturating_sub(1) as usize;
    let offset = match selected {
        Some(sel) if visible > 0 && sel >= visible => sel + 1 - visible,
        _ => 0,
    };

    for (line, (idx, row)) in rows.iter().enumerate().skip(offset).take(visible).enumerate() {
        let y = inner.y + 1 + line as u16;
        let highlighted = focused && selected == Some(idx);
        write_selectable(out, inner.x, y, &columns_line(row, widths, width), highlighted)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![format!("row-{}", i)]).collect()
    }

    fn render(rows: &[Vec<String>], selected: Option<usize>, height: u16) -> String {
        let mut buf = Vec::new();
        render_panel(&mut buf, Rect::new(0, 0, 40, height), "Images", &["ID"], &[10], rows, selected, true)
            .unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn title_shows_count() {
        assert!(render(&rows(3), Some(0), 8).contains("Images (3)"));
    }

    #[test]
    fn empty_panel_says_none() {
        assert!(render(&[], None, 5).contains("(none)"));
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        // 6 rows high: border(2) + header(1) leaves 3 entry lines.
        let text = render(&rows(10), Some(7), 6);
        assert!(text.contains("row-7"));
        assert!(text.contains("row-5"));
        assert!(!text.contains("row-4"));
        assert!(!text.contains("row-8"));
    }
}
