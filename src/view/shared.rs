use std::io::{self, Write};
use crossterm::{cursor::MoveTo, queue, style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor}};

use crate::layout::Rect;

/// Truncate a string to at most `max_len` characters (not bytes), appending "..."
/// if truncated. Safe for multi-byte UTF-8.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(keep).collect();
        format!("{}...", truncated)
    }
}

/// Truncate or pad `s` to exactly `width` characters.
pub fn fit(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate_str(s, width), width = width)
}

/// Lay out columns with fixed widths, one space between them, clipped to `total`.
pub fn columns_line(cols: &[String], widths: &[usize], total: usize) -> String {
    let mut line = String::new();
    for (i, col) in cols.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(10);
        line.push_str(&fit(col, width));
        line.push(' ');
    }
    fit(&line, total)
}

pub fn write_at(out: &mut impl Write, x: u16, y: u16, text: &str) -> io::Result<()> {
    queue!(out, MoveTo(x, y), Print(text))
}

pub fn write_selectable(out: &mut impl Write, x: u16, y: u16, text: &str, selected: bool) -> io::Result<()> {
    if selected {
        queue!(out, SetBackgroundColor(Color::DarkGrey), SetForegroundColor(Color::White))?;
    }
    write_at(out, x, y, text)?;
    if selected {
        queue!(out, ResetColor)?;
    }
    Ok(())
}

pub fn write_bold(out: &mut impl Write, x: u16, y: u16, text: &str) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Bold))?;
    write_at(out, x, y, text)?;
    queue!(out, SetAttribute(Attribute::Reset))
}

/// Blank every cell of `area`.
pub fn clear_area(out: &mut impl Write, area: Rect) -> io::Result<()> {
    let blank = " ".repeat(area.width as usize);
    for y in area.y..area.bottom() {
        write_at(out, area.x, y, &blank)?;
    }
    Ok(())
}

/// Draw a single-line border around `area` with `title` set into the top edge.
pub fn draw_box(out: &mut impl Write, area: Rect, title: &str, highlighted: bool) -> io::Result<()> {
    if area.width < 2 || area.height < 2 {
        return Ok(());
    }
    let inner = area.width as usize - 2;
    let color = if highlighted { Color::Green } else { Color::DarkGrey };
    queue!(out, SetForegroundColor(color))?;

    let mut title = truncate_str(&format!(" {} ", title), inner);
    if title.chars().count() > inner {
        title.clear();
    }
    let top = format!("┌{}{}┐", title, "─".repeat(inner.saturating_sub(title.chars().count())));
    write_at(out, area.x, area.y, &top)?;
    for y in area.y + 1..area.bottom() - 1 {
        write_at(out, area.x, y, "│")?;
        write_at(out, area.x + area.width - 1, y, "│")?;
    }
    let bottom = format!("└{}┘", "─".repeat(inner));
    write_at(out, area.x, area.bottom() - 1, &bottom)?;

    queue!(out, ResetColor)
}
