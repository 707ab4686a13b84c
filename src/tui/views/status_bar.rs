//! The one-line status bar under the entry table

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the status bar has to say this frame
pub struct StatusLine<'a> {
    /// True when this level and everything under it matches disk
    pub synced: bool,
    pub entry_count: usize,
    pub selected: usize,
    /// Clipboard population: count and singular kind name
    pub clipboard: Option<(usize, &'static str)>,
    /// Transient feedback from the last command
    pub message: Option<&'a str>,
}

pub fn render(frame: &mut Frame, area: Rect, status: &StatusLine) {
    let mut spans = vec![];

    if status.synced {
        spans.push(Span::styled(
            " Saved",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            " Unsaved",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("Entries: {}", status.entry_count),
        Style::default().fg(Color::White),
    ));

    if status.selected > 0 {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("Selected: {}", status.selected),
            Style::default().fg(Color::Cyan),
        ));
    }

    if let Some((count, kind)) = status.clipboard {
        let plural = if count == 1 { "" } else { "s" };
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("Clipboard: {} {}{}", count, kind, plural),
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(message) = status.message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message, Style::default().fg(Color::Yellow)));
    }

    let hints = " ?:Help  q:Back ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
