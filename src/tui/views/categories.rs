//! Budget category view
//!
//! Shows the active month's categories with budget, realized spend and
//! remaining amount

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::CategoryStatus;
use crate::services::BudgetService;
use crate::tui::app::App;
use crate::tui::layout::ListLayout;

use super::truncate_string;

/// Render the category view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = ListLayout::new(area, 4);
    render_table(frame, app, layout.table);
    render_summary(frame, app, layout.summary);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Pos Anggaran {} ", app.month))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let categories = app.month_categories();

    if categories.is_empty() {
        let text = Paragraph::new("Belum ada pos anggaran. Tekan 'a' untuk menambah.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(4),  // Number
        Constraint::Length(20), // Name
        Constraint::Length(15), // Budget
        Constraint::Length(15), // Realized
        Constraint::Length(15), // Remaining
        Constraint::Length(5),  // Count
        Constraint::Min(10),    // Status
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("No").style(bold),
        Cell::from("Nama Pos").style(bold),
        Cell::from("Anggaran").style(bold),
        Cell::from("Realisasi").style(bold),
        Cell::from("Sisa").style(bold),
        Cell::from("Trx").style(bold),
        Cell::from("Status").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let symbol = app.settings.currency_symbol.as_str();
    let rows: Vec<Row> = categories
        .iter()
        .map(|category| {
            let status_style = match category.status {
                CategoryStatus::Safe => Style::default().fg(Color::Green),
                CategoryStatus::Unsafe => Style::default().fg(Color::Red),
            };

            Row::new(vec![
                Cell::from(category.number.to_string()),
                Cell::from(truncate_string(&category.name, 20)),
                Cell::from(category.budget.format_with_symbol(symbol)),
                Cell::from(category.realized.format_with_symbol(symbol)),
                Cell::from(category.remaining.format_with_symbol(symbol)).style(status_style),
                Cell::from(category.transaction_count.to_string()),
                Cell::from(category.status.label()).style(status_style),
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
    state.select(Some(app.category_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary = BudgetService::new(app.storage)
        .month_summary(app.month)
        .unwrap_or_default();
    let symbol = app.settings.currency_symbol.as_str();

    let remaining_color = if summary.total_remaining.is_negative() {
        Color::Red
    } else {
        Color::Green
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(" Anggaran: "),
            Span::styled(
                summary.total_budget.format_with_symbol(symbol),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Realisasi: "),
            Span::styled(
                summary.total_realized.format_with_symbol(symbol),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Sisa: "),
            Span::styled(
                summary.total_remaining.format_with_symbol(symbol),
                Style::default()
                    .fg(remaining_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                " {} pos, {} melebihi anggaran",
                summary.category_count, summary.unsafe_count
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
