use std::io::{self, Write};

use crossterm::{queue, cursor::MoveTo, terminal::Clear, terminal::ClearType};

use crate::layout::{centered, vertical_grid, Rect};
use crate::pages::Page;
use crate::panel::Panel;
use crate::view::Presenter;

use super::App;

const HELP: &str = "tab/h/l: panels | j/k: move | enter: inspect | d: remove | r: refresh | q: quit";

/// Draw the panel grid, the status line and the active overlay on top.
pub fn render(app: &App, out: &mut impl Write, cols: u16, rows: u16) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let grid = Rect::new(0, 0, cols, rows.saturating_sub(1));
    for (panel, area) in app.panels.iter().zip(vertical_grid(grid, app.panels.len())) {
        panel.render(out, area)?;
    }
    Presenter::render_status(out, grid.bottom(), cols, app.status(), app.tasks_in_flight(), HELP)?;

    if let Some(overlay) = app.pages.overlay() {
        let screen = Rect::new(0, 0, cols, rows);
        let area = match overlay.size {
            Some((w, h)) => centered(screen, w, h),
            None => screen,
        };
        match &overlay.page {
            Page::Dialog(dialog) => Presenter::render_dialog(out, area, dialog)?,
            Page::Form(form) => Presenter::render_form(out, area, form)?,
            Page::Detail(view) => Presenter::render_detail(out, area, view)?,
        }
    }

    Ok(())
}
