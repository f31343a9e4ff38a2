//! Month picker dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::models::Month;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the month picker
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(30, 16, frame.area());

    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = Month::all()
        .map(|month| {
            let marker = if month == app.month { " *" } else { "" };
            ListItem::new(format!("{:>2}. {}{}", month.number(), month.name(), marker))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Pilih Bulan ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.month_picker_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Handle key input for the month picker
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.month_picker_index = app.month_picker_index.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.month_picker_index < 11 {
                app.month_picker_index += 1;
            }
        }
        KeyCode::Enter => {
            let picked = u8::try_from(app.month_picker_index + 1)
                .ok()
                .and_then(Month::new);
            app.close_dialog();
            if let Some(month) = picked {
                app.set_month(month);
                let view = app.active_view;
                if let Err(e) = app.enter_view(view) {
                    app.set_status(e.user_message());
                }
            }
        }
        _ => return false,
    }
    true
}
