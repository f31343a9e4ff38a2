//! Confirmation dialog
//!
//! Simple yes/no confirmation

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::KantongResult;
use crate::tui::app::{ActiveDialog, App, ConfirmAction};
use crate::tui::layout::centered_rect_fixed;

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, message: &str) {
    let area = centered_rect_fixed(60, 8, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Konfirmasi ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Ya  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" Tidak  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Batal"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Handle key input for the confirm dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ActiveDialog::Confirm(action) = app.active_dialog.clone() else {
        return false;
    };

    let result = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.close_dialog();
            accept(app, action)
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.close_dialog();
            decline(app, action)
        }
        KeyCode::Esc => {
            app.close_dialog();
            Ok(())
        }
        _ => return true,
    };

    if let Err(e) = result {
        app.set_status(e.user_message());
    }
    true
}

fn accept(app: &mut App, action: ConfirmAction) -> KantongResult<()> {
    match action {
        ConfirmAction::DeleteTransaction(id) => {
            let txn = app.ledger().delete(id)?;
            app.clamp_selection();
            app.set_status(format!("Transaksi {} berhasil dihapus", txn.id));
        }
        ConfirmAction::DeleteCategory { number, .. } => {
            let category = app.categories().delete(app.month, number)?;
            app.clamp_selection();
            app.set_status(format!("Pos '{}' berhasil dihapus", category.name));
        }
        ConfirmAction::CopyPreviousCategories { target, .. } => {
            app.finish_month_preparation(target, true)?;
        }
        ConfirmAction::Quit => app.quit(),
    }
    Ok(())
}

fn decline(app: &mut App, action: ConfirmAction) -> KantongResult<()> {
    match action {
        ConfirmAction::CopyPreviousCategories { target, .. } => {
            app.finish_month_preparation(target, false)
        }
        ConfirmAction::Quit => Ok(()),
        _ => {
            app.set_status("Dibatalkan");
            Ok(())
        }
    }
}
