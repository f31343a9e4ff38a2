//! Budget category dialog
//!
//! Modal dialog for adding or editing a month's budget category.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::error::{KantongError, KantongResult};
use crate::models::{Category, Money, MAX_CATEGORY_NAME_LENGTH};
use crate::services::validation;
use crate::services::CategoryPatch;
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

const INVALID_BUDGET: &str = "Nominal anggaran tidak valid! Harus berupa angka lebih dari 0";

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryField {
    #[default]
    Name,
    Budget,
}

/// State for the category form dialog
#[derive(Debug, Clone, Default)]
pub struct CategoryFormState {
    pub name_input: TextInput,
    pub budget_input: TextInput,
    pub focused_field: CategoryField,
    /// Category being edited, if any
    pub original: Option<Category>,
    /// Waiting for the save confirmation
    pub pending_save: bool,
    pub error_message: Option<String>,
}

impl CategoryFormState {
    pub fn new() -> Self {
        let mut form = Self {
            name_input: TextInput::new()
                .label("Nama Pos")
                .placeholder("contoh: Makan")
                .max_length(MAX_CATEGORY_NAME_LENGTH),
            budget_input: TextInput::new()
                .label("Anggaran")
                .placeholder("contoh: 500000"),
            ..Self::default()
        };
        form.set_focus(CategoryField::Name);
        form
    }

    /// Form for editing; blank inputs keep the current values
    pub fn for_edit(category: Category) -> Self {
        let mut form = Self {
            name_input: TextInput::new()
                .label("Nama Pos")
                .placeholder(category.name.clone())
                .max_length(MAX_CATEGORY_NAME_LENGTH),
            budget_input: TextInput::new()
                .label("Anggaran")
                .placeholder(category.budget.rupiah().to_string()),
            original: Some(category),
            ..Self::default()
        };
        form.set_focus(CategoryField::Name);
        form
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn set_focus(&mut self, field: CategoryField) {
        self.focused_field = field;
        self.name_input.focused = field == CategoryField::Name;
        self.budget_input.focused = field == CategoryField::Budget;
    }

    pub fn toggle_field(&mut self) {
        self.set_focus(match self.focused_field {
            CategoryField::Name => CategoryField::Budget,
            CategoryField::Budget => CategoryField::Name,
        });
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            CategoryField::Name => &mut self.name_input,
            CategoryField::Budget => &mut self.budget_input,
        }
    }

    /// Validate the inputs of a new category
    pub fn build_new(&self) -> KantongResult<(String, Money)> {
        let name = validation::category_name(self.name_input.value())?;
        let budget = parse_budget(self.budget_input.value())?;
        Ok((name, budget))
    }

    /// Collect the changed fields of the category being edited
    pub fn build_patch(&self) -> KantongResult<CategoryPatch> {
        let original = self
            .original
            .as_ref()
            .ok_or_else(|| KantongError::Validation("Tidak ada pos yang diedit".into()))?;
        let mut patch = CategoryPatch::default();

        if !self.name_input.is_blank() {
            let name = validation::category_name(self.name_input.value())?;
            if name != original.name {
                patch.name = Some(name);
            }
        }

        if !self.budget_input.is_blank() {
            let budget = parse_budget(self.budget_input.value())?;
            if budget != original.budget {
                patch.budget = Some(budget);
            }
        }

        Ok(patch)
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
        self.pending_save = false;
    }
}

fn parse_budget(input: &str) -> KantongResult<Money> {
    match Money::parse(input) {
        Ok(budget) if budget.is_positive() => Ok(budget),
        _ => Err(KantongError::Validation(INVALID_BUDGET.into())),
    }
}

/// Render the category dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.category_form;
    let area = centered_rect_fixed(60, 11, frame.area());

    frame.render_widget(Clear, area);

    let title = if form.is_edit() {
        " Edit Pos Anggaran "
    } else {
        " Tambah Pos Anggaran "
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
            Constraint::Length(1), // Name
            Constraint::Length(1), // Budget
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    let heading = match &form.original {
        Some(category) => Line::from(vec![
            Span::styled("Data saat ini: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!(
                "{} | {}",
                category.name,
                category.budget.format_with_symbol(&app.settings.currency_symbol)
            )),
        ]),
        None => Line::from(vec![
            Span::styled("Bulan: ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.month.name()),
        ]),
    };
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    frame.render_widget(&form.name_input, chunks[1]);
    frame.render_widget(&form.budget_input, chunks[2]);

    if let Some(ref error) = form.error_message {
        let error_line = Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(error_line), chunks[4]);
    }

    let hints = if form.pending_save {
        let question = if form.is_edit() {
            "Simpan perubahan? "
        } else {
            "Simpan pos anggaran? "
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
            Span::raw(" Pindah  "),
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Simpan  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Batal"),
        ])
    };
    frame.render_widget(Paragraph::new(hints), chunks[5]);
}

/// Handle key input for the category dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if app.category_form.pending_save {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => save_category(app),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.close_dialog();
                app.set_status("Dibatalkan");
            }
            _ => {}
        }
        return true;
    }

    let form = &mut app.category_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
        KeyCode::Enter => request_save(app),
        KeyCode::Backspace => {
            form.clear_error();
            form.focused_input().backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.focused_input().delete();
        }
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Home => form.focused_input().move_start(),
        KeyCode::End => form.focused_input().move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.clear_error();
            form.focused_input().insert(c);
        }
        _ => return false,
    }

    true
}

fn request_save(app: &mut App) {
    let checked = if app.category_form.is_edit() {
        app.category_form.build_patch().map(|patch| patch.is_empty())
    } else {
        app.category_form.build_new().map(|_| false)
    };

    match checked {
        Ok(true) => {
            app.close_dialog();
            app.set_status("Tidak ada perubahan");
        }
        Ok(false) => {
            app.category_form.clear_error();
            app.category_form.pending_save = true;
        }
        Err(e) => app.category_form.set_error(e.user_message()),
    }
}

fn save_category(app: &mut App) {
    let month = app.month;
    let result = match &app.active_dialog {
        ActiveDialog::EditCategory(number) => {
            let number = *number;
            app.category_form
                .build_patch()
                .and_then(|patch| app.categories().edit(month, number, patch))
                .map(|category| format!("Pos '{}' berhasil diperbarui", category.name))
        }
        _ => app
            .category_form
            .build_new()
            .and_then(|(name, budget)| app.categories().add(month, &name, budget))
            .map(|category| format!("Pos '{}' berhasil ditambahkan", category.name)),
    };

    match result {
        Ok(message) => {
            app.close_dialog();
            app.set_status(message);
        }
        Err(e) => app.category_form.set_error(e.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Category {
        let mut category = Category::new("Makan", Money::from_rupiah(500_000));
        category.number = 1;
        category
    }

    #[test]
    fn test_build_new() {
        let mut form = CategoryFormState::new();
        form.name_input = form.name_input.clone().content("  Transport ");
        form.budget_input = form.budget_input.clone().content("Rp 200.000");

        let (name, budget) = form.build_new().unwrap();
        assert_eq!(name, "Transport");
        assert_eq!(budget, Money::from_rupiah(200_000));
    }

    #[test]
    fn test_build_new_rejects_zero_budget() {
        let mut form = CategoryFormState::new();
        form.name_input = form.name_input.clone().content("Kos");
        form.budget_input = form.budget_input.clone().content("0");
        assert_eq!(form.build_new().unwrap_err().user_message(), INVALID_BUDGET);
    }

    #[test]
    fn test_build_patch() {
        let mut form = CategoryFormState::for_edit(sample());
        assert!(form.build_patch().unwrap().is_empty());

        form.budget_input = form.budget_input.clone().content("750000");
        let patch = form.build_patch().unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.budget, Some(Money::from_rupiah(750_000)));
    }

    #[test]
    fn test_toggle_field() {
        let mut form = CategoryFormState::new();
        assert!(form.name_input.focused);
        form.toggle_field();
        assert_eq!(form.focused_field, CategoryField::Budget);
        assert!(form.budget_input.focused);
        assert!(!form.name_input.focused);
    }
}
