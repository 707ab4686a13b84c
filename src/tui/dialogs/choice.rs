//! Blocking modal presenting a row of options
//!
//! Runs its own event loop over the caller's screen and returns the index
//! of the chosen option, or `None` when the dialog is dismissed. Used for
//! removal confirmations and the unsaved-changes prompt on exit.

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::event::{Event, EventHandler};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::terminal::Tui;

pub fn run_choice(
    terminal: &mut Tui,
    events: &EventHandler,
    background: &mut dyn FnMut(&mut Frame),
    title: &str,
    message: &str,
    options: &[&str],
) -> Result<Option<usize>> {
    if options.is_empty() {
        return Ok(None);
    }
    let mut selected = 0usize;
    loop {
        terminal.draw(|frame| {
            background(frame);
            render(frame, title, message, options, selected);
        })?;

        if let Event::Key(key) = events.next()? {
            match key.code {
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                    selected = selected.checked_sub(1).unwrap_or(options.len() - 1);
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                    selected = (selected + 1) % options.len();
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    let n = (c as u8 - b'0') as usize;
                    if (1..=options.len()).contains(&n) {
                        return Ok(Some(n - 1));
                    }
                }
                KeyCode::Enter => return Ok(Some(selected)),
                KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
                _ => {}
            }
        }
    }
}

fn render(frame: &mut Frame, title: &str, message: &str, options: &[&str], selected: usize) {
    let options_width: usize = options.iter().map(|o| o.chars().count() + 6).sum();
    let width = message
        .chars()
        .count()
        .max(options_width)
        .max(title.chars().count() + 4) as u16
        + 4;
    let area = centered_rect_fixed(width.max(40), 7, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut option_spans = vec![Span::raw(" ")];
    for (i, option) in options.iter().enumerate() {
        if i == selected {
            option_spans.push(Span::styled(
                format!("[ {} ]", option),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            option_spans.push(Span::styled(
                format!("[ {} ]", option),
                Style::default().fg(Color::White),
            ));
        }
        option_spans.push(Span::raw("  "));
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(option_spans),
        Line::from(Span::styled(
            " ←/→ choose   Enter confirm   Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
