//! Help overlay listing every key binding
//!
//! Blocks until any key is pressed.

use anyhow::Result;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::event::{Event, EventHandler};
use crate::tui::keys::KEY_HELP;
use crate::tui::layout::centered_rect;
use crate::tui::terminal::Tui;

pub fn run_help(
    terminal: &mut Tui,
    events: &EventHandler,
    background: &mut dyn FnMut(&mut Frame),
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            background(frame);
            render(frame);
        })?;
        if let Event::Key(_) = events.next()? {
            return Ok(());
        }
    }
}

fn render(frame: &mut Frame) {
    let area = centered_rect(60, 80, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![Line::from("")];
    for section in KEY_HELP {
        lines.push(Line::from(vec![Span::styled(
            format!(" {}", section.title),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        )]));
        for (key, description) in section.entries {
            lines.push(key_line(key, description));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:>14}", key),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::raw(description.to_string()),
    ])
}
