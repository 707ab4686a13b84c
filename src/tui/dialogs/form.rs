//! Record form dialog
//!
//! One text input per field, driven by the record's schema. Submitted
//! values are checked twice: each raw string against its field kind, then
//! the whole row against a caller-supplied rule (name collisions and the
//! like). The dialog stays open with the error on screen until everything
//! passes or the user gives up.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{FieldDef, FieldKind, FieldValue};
use crate::tui::event::{Event, EventHandler};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::terminal::Tui;
use crate::tui::widgets::TextInput;

/// Row-level validation applied after every field parses on its own
pub type RowCheck<'a> = &'a mut dyn FnMut(&[String]) -> std::result::Result<(), String>;

pub fn run_form(
    terminal: &mut Tui,
    events: &EventHandler,
    background: &mut dyn FnMut(&mut Frame),
    title: &str,
    defs: &'static [FieldDef],
    initial: Vec<String>,
    check_row: RowCheck,
) -> Result<Option<Vec<String>>> {
    let mut inputs: Vec<TextInput> = defs
        .iter()
        .zip(initial)
        .map(|(def, value)| {
            TextInput::new()
                .label(field_label(def))
                .placeholder(placeholder_for(def.kind))
                .content(value)
        })
        .collect();
    let mut focus = 0usize;
    let mut error: Option<String> = None;

    loop {
        terminal.draw(|frame| {
            background(frame);
            render(frame, title, defs, &inputs, focus, error.as_deref());
        })?;

        let Event::Key(key) = events.next()? else {
            continue;
        };
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Tab | KeyCode::Down => {
                focus = (focus + 1) % inputs.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                focus = focus.checked_sub(1).unwrap_or(inputs.len() - 1);
            }
            KeyCode::Enter => {
                let values: Vec<String> = inputs
                    .iter()
                    .map(|input| input.value().trim().to_string())
                    .collect();
                match first_bad_field(defs, &values) {
                    Some((index, message)) => {
                        focus = index;
                        error = Some(message);
                    }
                    None => match check_row(&values) {
                        Ok(()) => return Ok(Some(values)),
                        Err(message) => error = Some(message),
                    },
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                inputs[focus].insert(c);
                error = None;
            }
            KeyCode::Backspace => inputs[focus].backspace(),
            KeyCode::Delete => inputs[focus].delete(),
            KeyCode::Left => inputs[focus].move_left(),
            KeyCode::Right => inputs[focus].move_right(),
            KeyCode::Home => inputs[focus].move_start(),
            KeyCode::End => inputs[focus].move_end(),
            _ => {}
        }
    }
}

/// The schema names fields in snake case; show them with spaces
fn field_label(def: &FieldDef) -> String {
    def.name.replace('_', " ")
}

fn placeholder_for(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Date => "YYYY-MM-DD",
        FieldKind::Amount => "0.00",
        FieldKind::Text => "",
    }
}

/// Parse every value against its field kind; the first failure wins
fn first_bad_field(defs: &[FieldDef], values: &[String]) -> Option<(usize, String)> {
    for (index, (def, value)) in defs.iter().zip(values).enumerate() {
        if let Err(e) = FieldValue::parse(def, value) {
            return Some((index, format!("{}: {}", field_label(def), e)));
        }
    }
    None
}

fn render(
    frame: &mut Frame,
    title: &str,
    defs: &'static [FieldDef],
    inputs: &[TextInput],
    focus: usize,
    error: Option<&str>,
) {
    let height = defs.len() as u16 + 4;
    let area = centered_rect_fixed(56, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1); inputs.len()];
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, input) in inputs.iter().enumerate() {
        frame.render_widget(input.clone().focused(i == focus), chunks[i]);
    }

    let status = match error {
        Some(message) => Span::styled(message.to_string(), Style::default().fg(Color::Red)),
        None => Span::styled(
            "Enter save   Esc cancel   Tab next field",
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(status), chunks[inputs.len() + 1]);
}
