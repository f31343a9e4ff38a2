//! Transaction entry/edit dialog
//!
//! Modal dialog for adding or editing transactions. Saving asks for a final
//! yes/no before anything is written.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::error::{KantongError, KantongResult};
use crate::models::{Money, Month, Transaction, TransactionKind};
use crate::services::validation::{self, MAX_NOTE_LENGTH};
use crate::services::{NewTransaction, TransactionPatch};
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect;
use crate::tui::widgets::input::TextInput;

const INVALID_DATE: &str = "Format tanggal tidak valid! Gunakan format dd-mm-YYYY";
const INVALID_AMOUNT: &str = "Nominal tidak valid! Harus berupa angka lebih dari 0";

/// Which field is currently focused in the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Date,
    Kind,
    Category,
    Amount,
    Note,
}

/// State for the transaction form dialog
#[derive(Debug, Clone, Default)]
pub struct TransactionFormState {
    pub focused_field: TransactionField,
    pub date_input: TextInput,
    pub kind: TransactionKind,
    /// Category names of the month, fixed when the form opens
    pub categories: Vec<String>,
    pub category_index: usize,
    pub amount_input: TextInput,
    pub note_input: TextInput,
    /// Transaction being edited, if any
    pub original: Option<Transaction>,
    /// Waiting for the save confirmation
    pub pending_save: bool,
    pub error_message: Option<String>,
}

impl TransactionFormState {
    /// Empty form for recording a transaction in `month`
    pub fn new_for_month(month: Month, categories: Vec<String>) -> Self {
        let mut form = Self {
            date_input: TextInput::new()
                .label("Tanggal")
                .placeholder(format!("dd-{}-yyyy", month.code()))
                .max_length(10),
            categories,
            amount_input: TextInput::new().label("Nominal").placeholder("contoh: 25000"),
            note_input: TextInput::new()
                .label("Deskripsi")
                .placeholder("opsional")
                .max_length(MAX_NOTE_LENGTH),
            ..Self::default()
        };
        form.update_focus();
        form
    }

    /// Form for editing; blank inputs keep the current values
    pub fn for_edit(txn: Transaction) -> Self {
        let mut form = Self {
            date_input: TextInput::new()
                .label("Tanggal")
                .placeholder(txn.date_string())
                .max_length(10),
            kind: txn.kind,
            amount_input: TextInput::new()
                .label("Nominal")
                .placeholder(txn.amount.rupiah().to_string()),
            note_input: TextInput::new()
                .label("Deskripsi")
                .placeholder(if txn.note.is_empty() {
                    "-".to_string()
                } else {
                    txn.note.clone()
                })
                .max_length(MAX_NOTE_LENGTH),
            original: Some(txn),
            ..Self::default()
        };
        form.update_focus();
        form
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    /// Fields reachable with Tab, in order
    ///
    /// Editing only covers date, amount and note.
    pub fn fields(&self) -> &'static [TransactionField] {
        if self.is_edit() {
            &[
                TransactionField::Date,
                TransactionField::Amount,
                TransactionField::Note,
            ]
        } else {
            &[
                TransactionField::Date,
                TransactionField::Kind,
                TransactionField::Category,
                TransactionField::Amount,
                TransactionField::Note,
            ]
        }
    }

    /// Move to next field
    pub fn next_field(&mut self) {
        let fields = self.fields();
        let pos = fields
            .iter()
            .position(|f| *f == self.focused_field)
            .unwrap_or(0);
        self.focused_field = fields[(pos + 1) % fields.len()];
        self.update_focus();
    }

    /// Move to previous field
    pub fn prev_field(&mut self) {
        let fields = self.fields();
        let pos = fields
            .iter()
            .position(|f| *f == self.focused_field)
            .unwrap_or(0);
        self.focused_field = fields[(pos + fields.len() - 1) % fields.len()];
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.date_input.focused = self.focused_field == TransactionField::Date;
        self.amount_input.focused = self.focused_field == TransactionField::Amount;
        self.note_input.focused = self.focused_field == TransactionField::Note;
    }

    /// The focused text input; kind and category are not typed
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransactionField::Date => Some(&mut self.date_input),
            TransactionField::Amount => Some(&mut self.amount_input),
            TransactionField::Note => Some(&mut self.note_input),
            TransactionField::Kind | TransactionField::Category => None,
        }
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.categories.get(self.category_index).map(String::as_str)
    }

    /// Validate the inputs into a new transaction dated inside `month`
    pub fn build_new(&self, month: Month) -> KantongResult<NewTransaction> {
        let date = self.date_input.value().trim();
        let parsed = validation::parse_date(date)
            .map_err(|_| KantongError::Validation(INVALID_DATE.into()))?;
        validation::ensure_in_month(parsed, month)?;

        let category = validation::category_reference(self.selected_category().unwrap_or(""))?;
        let amount = parse_amount(self.amount_input.value())?;
        let note = validation::note(self.note_input.value())?;

        Ok(NewTransaction {
            date: date.to_string(),
            kind: self.kind,
            category,
            amount,
            note,
        })
    }

    /// Collect the changed fields of the transaction being edited
    ///
    /// A new date must stay in the transaction's month.
    pub fn build_patch(&self) -> KantongResult<TransactionPatch> {
        let original = self
            .original
            .as_ref()
            .ok_or_else(|| KantongError::Validation("Tidak ada transaksi yang diedit".into()))?;
        let mut patch = TransactionPatch::default();

        if !self.date_input.is_blank() {
            let date = self.date_input.value().trim();
            let parsed = validation::parse_date(date)
                .map_err(|_| KantongError::Validation(INVALID_DATE.into()))?;
            validation::ensure_in_month(parsed, original.month())?;
            if parsed != original.date {
                patch.date = Some(date.to_string());
            }
        }

        if !self.amount_input.is_blank() {
            let amount = parse_amount(self.amount_input.value())?;
            if amount != original.amount {
                patch.amount = Some(amount);
            }
        }

        if !self.note_input.is_blank() {
            let note = validation::note(self.note_input.value())?;
            if note != original.note {
                patch.note = Some(note);
            }
        }

        Ok(patch)
    }

    /// Clear any error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
        self.pending_save = false;
    }
}

fn parse_amount(input: &str) -> KantongResult<Money> {
    match Money::parse(input) {
        Ok(amount) if amount.is_positive() => Ok(amount),
        _ => Err(KantongError::Validation(INVALID_AMOUNT.into())),
    }
}

/// Render the transaction dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.transaction_form;
    let area = centered_rect(70, 70, frame.area());

    frame.render_widget(Clear, area);

    let title = if form.is_edit() {
        " Edit Transaksi "
    } else {
        " Tambah Transaksi "
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(1), // Date
            Constraint::Length(1), // Kind
            Constraint::Length(1), // Category label
            Constraint::Length(6), // Category list
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Note
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    let heading = match &form.original {
        Some(txn) => Line::from(vec![
            Span::styled("Data saat ini: ", Style::default().fg(Color::DarkGray)),
            Span::raw(txn.to_string()),
        ]),
        None => Line::from(vec![
            Span::styled("Bulan: ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.month.name()),
        ]),
    };
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    frame.render_widget(&form.date_input, chunks[1]);

    if form.is_edit() {
        let hint = Line::from(Span::styled(
            "Kosongkan isian yang tidak diubah",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(hint), chunks[2]);
    } else {
        render_kind_field(frame, form, chunks[2]);
        render_category_list(frame, form, chunks[3], chunks[4]);
    }

    frame.render_widget(&form.amount_input, chunks[5]);
    frame.render_widget(&form.note_input, chunks[6]);

    if let Some(ref error) = form.error_message {
        let error_line = Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(error_line), chunks[8]);
    }

    let hints = if form.pending_save {
        let question = if form.is_edit() {
            "Simpan perubahan? "
        } else {
            "Simpan transaksi? "
        };
        Line::from(vec![
            Span::styled(question, Style::default().fg(Color::Yellow)),
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Ya  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" Tidak"),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::raw(" Berikutnya  "),
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Simpan  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Batal"),
        ])
    };
    frame.render_widget(Paragraph::new(hints), chunks[9]);
}

fn render_kind_field(frame: &mut Frame, form: &TransactionFormState, area: Rect) {
    let focused = form.focused_field == TransactionField::Kind;
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let value_style = match form.kind {
        TransactionKind::Income => Style::default().fg(Color::Green),
        TransactionKind::Expense => Style::default().fg(Color::Red),
    };

    let mut spans = vec![
        Span::styled("Jenis: ", label_style),
        Span::styled(form.kind.label(), value_style),
    ];
    if focused {
        spans.push(Span::styled(
            "  (Spasi untuk mengganti)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_category_list(
    frame: &mut Frame,
    form: &TransactionFormState,
    label_area: Rect,
    list_area: Rect,
) {
    let focused = form.focused_field == TransactionField::Category;
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let selected = form.selected_category().unwrap_or("-");
    let label = Line::from(vec![
        Span::styled("Pos Anggaran: ", label_style),
        Span::styled(selected, Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(label), label_area);

    if !focused {
        return;
    }

    let items: Vec<ListItem> = form
        .categories
        .iter()
        .enumerate()
        .map(|(i, name)| ListItem::new(format!("{}. {}", i + 1, name)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::LEFT))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(form.category_index));
    frame.render_stateful_widget(list, list_area, &mut state);
}

/// Handle key input for the transaction dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if app.transaction_form.pending_save {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => save_transaction(app),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.close_dialog();
                app.set_status("Dibatalkan");
            }
            _ => {}
        }
        return true;
    }

    let form = &mut app.transaction_form;

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return true;
        }

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                form.prev_field();
            } else {
                form.next_field();
            }
            return true;
        }

        KeyCode::BackTab => {
            form.prev_field();
            return true;
        }

        KeyCode::Enter => {
            request_save(app);
            return true;
        }

        KeyCode::Up if form.focused_field == TransactionField::Category => {
            form.category_index = form.category_index.saturating_sub(1);
            return true;
        }

        KeyCode::Down if form.focused_field == TransactionField::Category => {
            if form.category_index + 1 < form.categories.len() {
                form.category_index += 1;
            }
            return true;
        }

        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
            if form.focused_field == TransactionField::Kind =>
        {
            form.kind = form.kind.toggle();
            return true;
        }

        KeyCode::Backspace => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.backspace();
            }
            return true;
        }

        KeyCode::Delete => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.delete();
            }
            return true;
        }

        KeyCode::Left => {
            if let Some(input) = form.focused_input() {
                input.move_left();
            }
            return true;
        }

        KeyCode::Right => {
            if let Some(input) = form.focused_input() {
                input.move_right();
            }
            return true;
        }

        KeyCode::Home => {
            if let Some(input) = form.focused_input() {
                input.move_start();
            }
            return true;
        }

        KeyCode::End => {
            if let Some(input) = form.focused_input() {
                input.move_end();
            }
            return true;
        }

        KeyCode::Char(c) => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.insert(c);
            }
            return true;
        }

        _ => {}
    }

    false
}

/// Validate the form and ask for confirmation
fn request_save(app: &mut App) {
    let checked = if app.transaction_form.is_edit() {
        app.transaction_form.build_patch().map(|patch| patch.is_empty())
    } else {
        app.transaction_form.build_new(app.month).map(|_| false)
    };

    match checked {
        Ok(true) => {
            app.close_dialog();
            app.set_status("Tidak ada perubahan");
        }
        Ok(false) => {
            app.transaction_form.clear_error();
            app.transaction_form.pending_save = true;
        }
        Err(e) => app.transaction_form.set_error(e.user_message()),
    }
}

/// Save the transaction after confirmation
fn save_transaction(app: &mut App) {
    let result = match &app.active_dialog {
        ActiveDialog::EditTransaction(id) => {
            let id = *id;
            app.transaction_form
                .build_patch()
                .and_then(|patch| app.ledger().edit(id, patch))
                .map(|txn| format!("Transaksi {} berhasil diperbarui", txn.id))
        }
        _ => app
            .transaction_form
            .build_new(app.month)
            .and_then(|input| app.ledger().add(input))
            .map(|txn| format!("Transaksi {} berhasil ditambahkan", txn.id)),
    };

    match result {
        Ok(message) => {
            app.close_dialog();
            app.set_status(message);
        }
        Err(e) => app.transaction_form.set_error(e.user_message()),
    }
}
