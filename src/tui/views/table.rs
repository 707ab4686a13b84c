//! The entry table shared by every browse level
//!
//! Only the rows inside the focus window are handed to ratatui;
//! [`BrowserState`] owns all scrolling, so the table widget never
//! second-guesses it. A proportional scrollbar tracks the window on the
//! right edge, skipped entirely when the list is empty.

use ratatui::{
    layout::{Constraint, Margin, Rect},
    style::{Color, Modifier, Style},
    widgets::{
        Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
        TableState,
    },
    Frame,
};

use crate::browse::BrowserState;
use crate::models::Record;

/// Render one browse level as a table: a selection mark column, then the
/// cells produced by `cells` for each visible entry
pub fn render_entry_table<T, F>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    headers: &[&'static str],
    widths: &[Constraint],
    entries: &[T],
    state: &BrowserState,
    cells: F,
) where
    T: Record,
    F: Fn(&T) -> Vec<Cell<'static>>,
{
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut header_cells = vec![Cell::from(" ")];
    header_cells.extend(
        headers
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    );
    let header = Row::new(header_cells)
        .style(Style::default().fg(Color::Yellow))
        .height(1);

    let visible = state.visible_range(entries.len());
    let rows: Vec<Row> = entries[visible.clone()]
        .iter()
        .map(|entry| {
            let mark = if state.is_selected(entry.id()) {
                Cell::from("▪").style(Style::default().fg(Color::Cyan))
            } else {
                Cell::from(" ")
            };
            let mut row_cells = vec![mark];
            row_cells.extend(cells(entry));
            Row::new(row_cells)
        })
        .collect();

    let mut all_widths = vec![Constraint::Length(1)];
    all_widths.extend_from_slice(widths);

    let table = Table::new(rows, all_widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default();
    table_state.select(
        state
            .highlight_index(entries)
            .filter(|i| visible.contains(i))
            .map(|i| i - visible.start),
    );

    frame.render_stateful_widget(table, area, &mut table_state);

    if !entries.is_empty() {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        let mut scrollbar_state = ScrollbarState::new(entries.len()).position(state.focus());
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                horizontal: 0,
                vertical: 1,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Red for negative amounts, green otherwise
pub fn amount_cell(text: String, negative: bool) -> Cell<'static> {
    let style = if negative {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    Cell::from(text).style(style)
}

/// Truncate with a trailing ellipsis so long text never wraps a cell
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a very long description", 10), "a very lo…");
        assert_eq!(truncate_text("exactly-10", 10), "exactly-10");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("héllo wörld", 11), "héllo wörld");
        assert_eq!(truncate_text("héllo wörld", 6), "héllo…");
    }
}
