//! Screen layout for the browse view and popup placement helpers

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The three fixed panes of a browse screen: balances on top, the entry
/// table in the middle, one status line at the bottom
pub struct BrowseLayout {
    pub info: Rect,
    pub table: Rect,
    pub status: Rect,
}

impl BrowseLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            info: chunks[0],
            table: chunks[1],
            status: chunks[2],
        }
    }

    /// Entry rows that fit in the table pane once borders and the header
    /// row are taken out; never less than one
    pub fn viewport_rows(&self) -> usize {
        (self.table.height as usize).saturating_sub(4).max(1)
    }
}

/// A rectangle centered in `r`, sized as percentages of it
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A fixed-size rectangle centered in `r`, clamped to fit
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rows_has_a_floor() {
        let layout = BrowseLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.viewport_rows(), 24 - 4 - 1 - 4);

        let tiny = BrowseLayout::new(Rect::new(0, 0, 80, 6));
        assert_eq!(tiny.viewport_rows(), 1);
    }

    #[test]
    fn test_centered_rect_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect_fixed(60, 20, area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);

        let small = centered_rect_fixed(20, 6, area);
        assert_eq!(small.x, 10);
        assert_eq!(small.y, 2);
    }
}
