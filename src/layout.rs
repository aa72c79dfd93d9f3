/// A rectangular screen area in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// The area inside a one-cell border.
    pub fn inner(self) -> Rect {
        Rect {
            x: self.x.saturating_add(1),
            y: self.y.saturating_add(1),
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }

    pub fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }
}

/// Split `area` into `rows` stacked slices of equal height. Leftover lines
/// go to the last row so the grid always fills the area.
pub fn vertical_grid(area: Rect, rows: usize) -> Vec<Rect> {
    if rows == 0 {
        return Vec::new();
    }
    let each = area.height / rows as u16;
    (0..rows)
        .map(|i| {
            let y = area.y + each * i as u16;
            let height = if i + 1 == rows { area.bottom() - y } else { each };
            Rect::new(area.x, y, area.width, height)
        })
        .collect()
}

/// A `width` x `height` box centered in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fills_area() {
        let rows = vertical_grid(Rect::new(0, 0, 80, 22), 4);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], Rect::new(0, 0, 80, 5));
        assert_eq!(rows[3], Rect::new(0, 15, 80, 7));
    }

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(0, 0, 60, 20);
        assert_eq!(centered(area, 80, 29), area);
        assert_eq!(centered(area, 20, 10), Rect::new(20, 5, 20, 10));
    }

    #[test]
    fn inner_shrinks_by_border() {
        assert_eq!(Rect::new(2, 3, 10, 5).inner(), Rect::new(3, 4, 8, 3));
        assert_eq!(Rect::new(0, 0, 1, 1).inner().width, 0);
    }
}
