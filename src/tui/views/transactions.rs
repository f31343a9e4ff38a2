//! Transaction list view
//!
//! Shows the active month's transactions with income and expense totals

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{Money, TransactionKind};
use crate::tui::app::App;
use crate::tui::layout::ListLayout;

use super::truncate_string;

/// Render the transaction view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = ListLayout::new(area, 5);
    render_table(frame, app, layout.table);
    render_summary(frame, app, layout.summary);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Transaksi {} ", app.month))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let transactions = app.month_transactions();

    if transactions.is_empty() {
        let text = Paragraph::new("Belum ada transaksi. Tekan 'a' untuk menambah.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(6),  // ID
        Constraint::Length(11), // Date
        Constraint::Length(12), // Kind
        Constraint::Length(20), // Category
        Constraint::Length(16), // Amount
        Constraint::Min(10),    // Note
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("ID").style(bold),
        Cell::from("Tanggal").style(bold),
        Cell::from("Jenis").style(bold),
        Cell::from("Pos").style(bold),
        Cell::from("Nominal").style(bold),
        Cell::from("Deskripsi").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let symbol = app.settings.currency_symbol.as_str();
    let rows: Vec<Row> = transactions
        .iter()
        .map(|txn| {
            let amount_style = match txn.kind {
                TransactionKind::Income => Style::default().fg(Color::Green),
                TransactionKind::Expense => Style::default().fg(Color::Red),
            };

            Row::new(vec![
                Cell::from(txn.id.to_string()),
                Cell::from(txn.date_string()),
                Cell::from(txn.kind.label()).style(amount_style),
                Cell::from(truncate_string(&txn.category, 20)),
                Cell::from(txn.amount.format_with_symbol(symbol)).style(amount_style),
                Cell::from(truncate_string(&txn.note, 30)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.transaction_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let ledger = app.ledger();
    let income = ledger.total_income(app.month).unwrap_or_default();
    let expense = ledger.total_expense(app.month).unwrap_or_default();
    let balance = income - expense;
    let symbol = app.settings.currency_symbol.as_str();

    let balance_color = if balance.is_negative() {
        Color::Red
    } else {
        Color::Green
    };

    let lines = vec![
        amount_line("Total Pemasukan  ", income, symbol, Color::Green),
        amount_line("Total Pengeluaran", expense, symbol, Color::Red),
        amount_line("Saldo            ", balance, symbol, balance_color),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn amount_line(label: &'static str, amount: Money, symbol: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::White)),
        Span::styled(
            amount.format_with_symbol(symbol),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}
