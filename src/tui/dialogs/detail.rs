//! Read-only detail dialogs for a transaction or a category

use ratatui::{
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::display::{format_category_details, format_transaction_details};
use crate::models::TransactionId;
use crate::tui::app::App;
use crate::tui::layout::centered_rect;

fn render_text(frame: &mut Frame, title: &str, text: String) {
    let area = centered_rect(60, 50, frame.area());

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

    let mut lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Tekan tombol apa saja untuk menutup",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the details of one transaction
pub fn render_transaction(frame: &mut Frame, app: &App, id: TransactionId) {
    let text = match app.ledger().get(id) {
        Ok(txn) => format_transaction_details(&txn, &app.settings.currency_symbol),
        Err(e) => e.user_message(),
    };
    render_text(frame, "Detail Transaksi", text);
}

/// Render the details of one category of the active month
pub fn render_category(frame: &mut Frame, app: &App, number: u32) {
    let text = match app.categories().get(app.month, number) {
        Ok(category) => format_category_details(&category, &app.settings.currency_symbol),
        Err(e) => e.user_message(),
    };
    render_text(frame, "Detail Pos Anggaran", text);
}
