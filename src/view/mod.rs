mod confirmation;
mod detail;
mod form;
mod panel;
mod shared;
mod status_bar;

use std::io::{self, Write};
use crossterm::{cursor, queue, style::{Color, SetForegroundColor, ResetColor}, terminal};

use crate::layout::Rect;
use crate::pages::{ConfirmDialog, DetailView, Form};

pub use shared::{fit, truncate_str};
pub use status_bar::StatusLine;

pub struct Presenter;

/// Minimum terminal dimensions for usable rendering.
pub const MIN_COLS: u16 = 60;
pub const MIN_ROWS: u16 = 20;

impl Presenter {
    /// Check if the terminal is large enough. If not, render a "too small"
    /// message and return `true` (meaning "skip normal rendering").
    pub fn render_size_guard(out: &mut impl Write, cols: u16, rows: u16) -> io::Result<bool> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small ({}x{}). Resize to at least {}x{}.",
                cols, rows, MIN_COLS, MIN_ROWS
            );
            let y = rows / 2;
            let x = cols.saturating_sub(msg.len() as u16) / 2;
            queue!(out, cursor::MoveTo(x, y), SetForegroundColor(Color::Yellow))?;
            write!(out, "{}", msg)?;
            queue!(out, ResetColor)?;
            return Ok(true);
        }
        Ok(false)
    }

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
        panel::render_panel(out, area, title, headers, widths, rows, selected, focused)
    }

    pub fn render_dialog(out: &mut impl Write, area: Rect, dialog: &ConfirmDialog) -> io::Result<()> {
        confirmation::render_confirmation(out, area, dialog)
    }

    pub fn render_form(out: &mut impl Write, area: Rect, form: &Form) -> io::Result<()> {
        form::render_form(out, area, form)
    }

    pub fn render_detail(out: &mut impl Write, area: Rect, view: &DetailView) -> io::Result<()> {
        detail::render_detail(out, area, view)
    }

    pub fn render_status(
        out: &mut impl Write,
        y: u16,
        width: u16,
        status: Option<&StatusLine>,
        tasks_running: usize,
        help: &str,
    ) -> io::Result<()> {
        status_bar::render_status_bar(out, y, width, status, tasks_running, help)
    }
}
