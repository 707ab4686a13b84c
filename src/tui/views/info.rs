//! The balance panel above the entry table
//!
//! Each level summarizes itself in two lines. Statement figures follow one
//! verdict: the month is sound when the balance diff is not negative and
//! the reconciliation error is zero, and both figures take that color.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{format_date, Account, Money, Statement, Wallet};

/// Render the info block with a title and up to two content lines
pub fn render_info(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn signed_amount(amount: Money, symbol: &str) -> Span<'static> {
    let style = if amount.is_negative() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    Span::styled(amount.format_with_symbol(symbol), style)
}

pub fn wallet_info_lines(wallet: &Wallet, symbol: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            label("Balance: "),
            signed_amount(wallet.balance(), symbol),
        ]),
        Line::from(vec![
            label("Accounts: "),
            Span::raw(wallet.accounts().len().to_string()),
        ]),
    ]
}

pub fn account_info_lines(account: &Account, symbol: &str) -> Vec<Line<'static>> {
    let latest = account
        .statements()
        .items()
        .last()
        .map(|s| format_date(s.date))
        .unwrap_or_else(|| "none".to_string());
    vec![
        Line::from(vec![
            label("Balance: "),
            signed_amount(account.balance(), symbol),
        ]),
        Line::from(vec![
            label("Statements: "),
            Span::raw(account.statements().len().to_string()),
            label("   Latest: "),
            Span::raw(latest),
        ]),
    ]
}

pub fn statement_info_lines(statement: &Statement, symbol: &str) -> Vec<Line<'static>> {
    let diff = statement.balance_diff();
    let error = statement.balance_error();
    let sound = !diff.is_negative() && error.is_zero();
    let verdict = if sound {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };

    vec![
        Line::from(vec![
            label("Start: "),
            Span::raw(statement.bal_start.format_with_symbol(symbol)),
            label("   End: "),
            Span::raw(statement.bal_end.format_with_symbol(symbol)),
            label("   Diff: "),
            Span::styled(diff.format_with_symbol(symbol), verdict),
        ]),
        Line::from(vec![
            label("Entered: "),
            signed_amount(statement.running_sum(), symbol),
            label("   Error: "),
            Span::styled(error.format_with_symbol(symbol), verdict),
            label("   Operations: "),
            Span::raw(statement.operations().len().to_string()),
        ]),
    ]
}
