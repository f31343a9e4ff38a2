//! Monthly analysis view

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::money::{format_percent, format_rupiah_decimal};
use crate::models::{FinancialCondition, MonthlyAnalysis};
use crate::tui::app::App;

/// Render the stored analysis of the active month
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Analisis Keuangan {} ", app.month))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let service = app.analysis();
    let stored = service.load_or_default(app.month).unwrap_or_default();
    let stale = service
        .compute(app.month)
        .map(|fresh| !fresh.same_totals(&stored))
        .unwrap_or(false);

    let mut lines = analysis_lines(app, &stored);
    if stale {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Transaksi berubah sejak analisis terakhir. Tekan 'r' untuk menghitung ulang.",
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn analysis_lines(app: &App, analysis: &MonthlyAnalysis) -> Vec<Line<'static>> {
    let symbol = app.settings.currency_symbol.as_str();
    let condition_color = match analysis.condition {
        FinancialCondition::Deficit => Color::Red,
        FinancialCondition::Balanced => Color::Yellow,
        FinancialCondition::Surplus => Color::Green,
    };

    vec![
        Line::from(""),
        row(
            "Total Pemasukan",
            format!(
                "{} ({} transaksi)",
                analysis.total_income.format_with_symbol(symbol),
                analysis.income_count
            ),
        ),
        row(
            "Total Pengeluaran",
            format!(
                "{} ({} transaksi)",
                analysis.total_expense.format_with_symbol(symbol),
                analysis.expense_count
            ),
        ),
        row(
            "Rata-rata Pengeluaran",
            format_rupiah_decimal(analysis.average_expense),
        ),
        row("Saldo", analysis.balance.format_with_symbol(symbol)),
        row("Persentase Sisa", format_percent(analysis.remaining_percent)),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {:<22}: ", "Kondisi"), Style::default().fg(Color::White)),
            Span::styled(
                analysis.condition.label(),
                Style::default()
                    .fg(condition_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!(" {:<22}: ", "Kesimpulan"), Style::default().fg(Color::White)),
            Span::styled(
                analysis.conclusion.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}", analysis.conclusion.description()),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<22}: ", label), Style::default().fg(Color::White)),
        Span::raw(value),
    ])
}
