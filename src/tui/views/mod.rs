//! TUI Views module
//!
//! Contains the main menu, the transaction, category and analysis views,
//! the header and the status bar.

pub mod analysis;
pub mod categories;
pub mod menu;
pub mod status_bar;
pub mod transactions;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;

pub const APP_TITLE: &str = "APLIKASI KEUANGAN MAHASISWA";

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);

    match app.active_view {
        ActiveView::Menu => menu::render(frame, app, layout.main),
        ActiveView::Transactions => transactions::render(frame, app, layout.main),
        ActiveView::Categories => categories::render(frame, app, layout.main),
        ActiveView::Analysis => analysis::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let line = Line::from(vec![
        Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled("Bulan: ", Style::default().fg(Color::White)),
        Span::styled(
            app.month.name(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Confirm(action) => dialogs::confirm::render(frame, &action.message()),
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            dialogs::transaction::render(frame, app);
        }
        ActiveDialog::AddCategory | ActiveDialog::EditCategory(_) => {
            dialogs::category::render(frame, app);
        }
        ActiveDialog::TransactionDetail(id) => dialogs::detail::render_transaction(frame, app, *id),
        ActiveDialog::CategoryDetail(number) => {
            dialogs::detail::render_category(frame, app, *number);
        }
        ActiveDialog::MonthPicker => dialogs::month_picker::render(frame, app),
        ActiveDialog::None => {}
    }
}

/// Cut a string to `max_len` characters, marking the cut with an ellipsis
pub(crate) fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Makan", 10), "Makan");
        assert_eq!(truncate_string("Transportasi", 6), "Trans…");
    }
}
