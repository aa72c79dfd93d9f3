use std::io::{self, Write};
use crossterm::{queue, style::{Color, ResetColor, SetForegroundColor}};

use super::shared::{fit, write_at};

/// One line of feedback for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

pub fn render_status_bar(
    out: &mut impl Write,
    y: u16,
    width: u16,
    status: Option<&StatusLine>,
    tasks_running: usize,
    help: &str,
) -> io::Result<()> {
    let width = width as usize;
    let right = if tasks_running > 0 {
        format!(" {} running | {} ", tasks_running, help)
    } else {
        format!(" {} ", help)
    };
    let left_width = width.saturating_sub(right.chars().count());

    match status {
        Some(s) => {
            let color = if s.is_error { Color::Red } else { Color::Yellow };
            queue!(out, SetForegroundColor(color))?;
            write_at(out, 0, y, &fit(&format!(" {}", s.text), left_width))?;
        }
        None => write_at(out, 0, y, &fit("", left_width))?,
    }
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    write_at(out, left_width as u16, y, &fit(&right, width - left_width))?;
    queue!(out, ResetColor)
}
