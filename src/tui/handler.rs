//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state. Dialogs get keys first. Service errors end up in the
//! status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, ConfirmAction, MenuItem};
use super::dialogs;
use super::event::Event;
use crate::error::KantongResult;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => {}
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return;
    }

    app.clear_status();

    // Global keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.open_dialog(ActiveDialog::Confirm(ConfirmAction::Quit));
            return;
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return;
        }
        KeyCode::Char('m') => {
            app.open_dialog(ActiveDialog::MonthPicker);
            return;
        }
        _ => {}
    }

    let result = match app.active_view {
        ActiveView::Menu => handle_menu_key(app, key),
        ActiveView::Transactions => handle_transactions_key(app, key),
        ActiveView::Categories => handle_categories_key(app, key),
        ActiveView::Analysis => handle_analysis_key(app, key),
    };

    if let Err(e) = result {
        app.set_status(e.user_message());
    }
}

/// Handle keys when a dialog is active
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            dialogs::transaction::handle_key(app, key);
        }
        ActiveDialog::AddCategory | ActiveDialog::EditCategory(_) => {
            dialogs::category::handle_key(app, key);
        }
        ActiveDialog::Confirm(_) => {
            dialogs::confirm::handle_key(app, key);
        }
        ActiveDialog::MonthPicker => {
            dialogs::month_picker::handle_key(app, key);
        }
        // Any key closes read-only dialogs
        ActiveDialog::Help
        | ActiveDialog::TransactionDetail(_)
        | ActiveDialog::CategoryDetail(_) => app.close_dialog(),
        ActiveDialog::None => {}
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) -> KantongResult<()> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(MenuItem::ALL.len()),
        KeyCode::Enter => {
            if let Some(item) = MenuItem::ALL.get(app.menu_index).copied() {
                return activate_menu_item(app, item);
            }
        }
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            app.menu_index = index;
            return activate_menu_item(app, MenuItem::ALL[index]);
        }
        _ => {}
    }
    Ok(())
}

fn activate_menu_item(app: &mut App, item: MenuItem) -> KantongResult<()> {
    match item {
        MenuItem::Transactions => app.enter_view(ActiveView::Transactions)?,
        MenuItem::Categories => app.enter_view(ActiveView::Categories)?,
        MenuItem::Analysis => app.enter_view(ActiveView::Analysis)?,
        MenuItem::ChangeMonth => app.open_dialog(ActiveDialog::MonthPicker),
        MenuItem::Help => app.open_dialog(ActiveDialog::Help),
        MenuItem::Quit => app.open_dialog(ActiveDialog::Confirm(ConfirmAction::Quit)),
    }
    Ok(())
}

fn handle_transactions_key(app: &mut App, key: KeyEvent) -> KantongResult<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => app.switch_view(ActiveView::Menu),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => {
            let count = app.month_transactions().len();
            app.move_down(count);
        }
        KeyCode::Char('a') => {
            if app.categories().names(app.month)?.is_empty() {
                app.set_status(
                    "Belum ada pos anggaran bulan ini. Tambahkan dulu di menu Pos Anggaran.",
                );
            } else {
                app.open_dialog(ActiveDialog::AddTransaction);
            }
        }
        KeyCode::Char('e') => match app.selected_transaction() {
            Some(txn) => app.open_dialog(ActiveDialog::EditTransaction(txn.id)),
            None => app.set_status("Belum ada transaksi"),
        },
        KeyCode::Char('d') => match app.selected_transaction() {
            Some(txn) => app.open_dialog(ActiveDialog::Confirm(
                ConfirmAction::DeleteTransaction(txn.id),
            )),
            None => app.set_status("Belum ada transaksi"),
        },
        KeyCode::Enter => {
            if let Some(txn) = app.selected_transaction() {
                app.open_dialog(ActiveDialog::TransactionDetail(txn.id));
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_categories_key(app: &mut App, key: KeyEvent) -> KantongResult<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => app.switch_view(ActiveView::Menu),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => {
            let count = app.month_categories().len();
            app.move_down(count);
        }
        KeyCode::Char('a') => app.open_dialog(ActiveDialog::AddCategory),
        KeyCode::Char('e') => match app.selected_category() {
            Some(category) => app.open_dialog(ActiveDialog::EditCategory(category.number)),
            None => app.set_status("Belum ada pos anggaran"),
        },
        KeyCode::Char('d') => match app.selected_category() {
            Some(category) if category.transaction_count > 0 => {
                app.set_status(format!(
                    "Pos '{}' masih dipakai {} transaksi dan tidak dapat dihapus",
                    category.name, category.transaction_count
                ));
            }
            Some(category) => app.open_dialog(ActiveDialog::Confirm(
                ConfirmAction::DeleteCategory {
                    number: category.number,
                    name: category.name,
                },
            )),
            None => app.set_status("Belum ada pos anggaran"),
        },
        KeyCode::Char('r') => {
            app.categories().refresh(app.month)?;
            app.set_status("Realisasi pos anggaran diperbarui");
        }
        KeyCode::Enter => {
            if let Some(category) = app.selected_category() {
                app.open_dialog(ActiveDialog::CategoryDetail(category.number));
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_analysis_key(app: &mut App, key: KeyEvent) -> KantongResult<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => app.switch_view(ActiveView::Menu),
        KeyCode::Char('r') => {
            app.analysis().refresh(app.month)?;
            app.set_status("Analisis berhasil diperbarui");
        }
        _ => {}
    }
    Ok(())
}
