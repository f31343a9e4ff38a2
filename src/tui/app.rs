//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! The month being worked on is explicit state here and is passed to every
//! service call.

use crate::config::paths::KantongPaths;
use crate::config::settings::Settings;
use crate::error::KantongResult;
use crate::models::{Category, Month, Transaction, TransactionId};
use crate::services::{AnalysisService, CategoryService, LedgerService, MonthPreparation};
use crate::storage::Storage;

use super::dialogs::category::CategoryFormState;
use super::dialogs::transaction::TransactionFormState;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Menu,
    Transactions,
    Categories,
    Analysis,
}

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Transactions,
    Categories,
    Analysis,
    ChangeMonth,
    Help,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 6] = [
        MenuItem::Transactions,
        MenuItem::Categories,
        MenuItem::Analysis,
        MenuItem::ChangeMonth,
        MenuItem::Help,
        MenuItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Transactions => "Transaksi",
            Self::Categories => "Pos Anggaran",
            Self::Analysis => "Analisis Keuangan",
            Self::ChangeMonth => "Ganti Bulan",
            Self::Help => "Bantuan",
            Self::Quit => "Keluar",
        }
    }
}

/// An action waiting for a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTransaction(TransactionId),
    DeleteCategory { number: u32, name: String },
    /// Offered when a month without categories is opened
    CopyPreviousCategories { target: ActiveView, from: Month },
    Quit,
}

impl ConfirmAction {
    /// Question shown in the confirm dialog
    pub fn message(&self) -> String {
        match self {
            Self::DeleteTransaction(id) => format!("Hapus transaksi {}?", id),
            Self::DeleteCategory { name, .. } => format!("Hapus pos '{}'?", name),
            Self::CopyPreviousCategories { from, .. } => format!(
                "Bulan ini belum memiliki pos anggaran. Salin pos dari bulan {}?",
                from
            ),
            Self::Quit => "Keluar dari aplikasi?".to_string(),
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddTransaction,
    EditTransaction(TransactionId),
    TransactionDetail(TransactionId),
    AddCategory,
    EditCategory(u32),
    CategoryDetail(u32),
    MonthPicker,
    Help,
    Confirm(ConfirmAction),
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Paths configuration
    pub paths: &'a KantongPaths,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Month every view works on
    pub month: Month,

    /// Currently active view
    pub active_view: ActiveView,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Highlighted main menu entry
    pub menu_index: usize,

    /// Highlighted row in the transaction list
    pub transaction_index: usize,

    /// Highlighted row in the category list
    pub category_index: usize,

    /// Highlighted month in the month picker
    pub month_picker_index: usize,

    /// Status message to display
    pub status_message: Option<String>,

    /// Transaction form state
    pub transaction_form: TransactionFormState,

    /// Category form state
    pub category_form: CategoryFormState,
}

impl<'a> App<'a> {
    /// Create a new App instance on the current calendar month
    pub fn new(storage: &'a Storage, settings: &'a Settings, paths: &'a KantongPaths) -> Self {
        Self {
            storage,
            settings,
            paths,
            should_quit: false,
            month: Month::current(),
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            menu_index: 0,
            transaction_index: 0,
            category_index: 0,
            month_picker_index: 0,
            status_message: None,
            transaction_form: TransactionFormState::default(),
            category_form: CategoryFormState::default(),
        }
    }

    /// Start on a given month instead of the current one
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = month;
        self
    }

    /// Ledger service with the configured limit
    pub fn ledger(&self) -> LedgerService<'a> {
        LedgerService::new(self.storage).with_limit(self.settings.max_transactions)
    }

    /// Category service with the configured limit
    pub fn categories(&self) -> CategoryService<'a> {
        CategoryService::new(self.storage).with_limit(self.settings.max_categories)
    }

    pub fn analysis(&self) -> AnalysisService<'a> {
        AnalysisService::new(self.storage)
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;

        match view {
            ActiveView::Menu => {}
            ActiveView::Transactions => self.transaction_index = 0,
            ActiveView::Categories => self.category_index = 0,
            ActiveView::Analysis => {}
        }
    }

    /// Open a view, preparing the month's files first
    ///
    /// A month without a category file either gets the previous month's
    /// categories (after asking) or an empty file.
    pub fn enter_view(&mut self, view: ActiveView) -> KantongResult<()> {
        match view {
            ActiveView::Transactions | ActiveView::Categories => {
                if !self.storage.categories.exists(self.month) {
                    let previous = self.month.prev();
                    let can_copy = self.settings.copy_previous_categories
                        && !self.storage.categories.load(previous)?.is_empty();

                    if can_copy {
                        self.open_dialog(ActiveDialog::Confirm(
                            ConfirmAction::CopyPreviousCategories {
                                target: view,
                                from: previous,
                            },
                        ));
                        return Ok(());
                    }

                    self.categories().prepare_month(self.month, false)?;
                }
            }
            ActiveView::Analysis => {
                self.analysis().init_month(self.month)?;
            }
            ActiveView::Menu => {}
        }

        self.switch_view(view);
        Ok(())
    }

    /// Answer the copy-previous-month question and open the target view
    pub fn finish_month_preparation(&mut self, target: ActiveView, copy: bool) -> KantongResult<()> {
        match self.categories().prepare_month(self.month, copy)? {
            MonthPreparation::Copied { from, count } => {
                self.set_status(format!("{} pos anggaran disalin dari bulan {}", count, from));
            }
            MonthPreparation::Empty | MonthPreparation::Existing => {}
        }
        self.switch_view(target);
        Ok(())
    }

    /// Change the month every view works on
    pub fn set_month(&mut self, month: Month) {
        self.month = month;
        self.transaction_index = 0;
        self.category_index = 0;
        self.set_status(format!("Bulan aktif: {}", month));
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddTransaction => {
                let names = self.categories().names(self.month).unwrap_or_default();
                self.transaction_form = TransactionFormState::new_for_month(self.month, names);
            }
            ActiveDialog::EditTransaction(id) => {
                if let Ok(txn) = self.ledger().get(*id) {
                    self.transaction_form = TransactionFormState::for_edit(txn);
                }
            }
            ActiveDialog::AddCategory => {
                self.category_form = CategoryFormState::new();
            }
            ActiveDialog::EditCategory(number) => {
                if let Ok(category) = self.categories().get(self.month, *number) {
                    self.category_form = CategoryFormState::for_edit(category);
                }
            }
            ActiveDialog::MonthPicker => {
                self.month_picker_index = usize::from(self.month.number()) - 1;
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// The active month's transactions in file order
    pub fn month_transactions(&self) -> Vec<Transaction> {
        self.ledger().list(Some(self.month)).unwrap_or_default()
    }

    /// The active month's categories with fresh derived fields
    pub fn month_categories(&self) -> Vec<Category> {
        self.categories().list(self.month).unwrap_or_default()
    }

    /// The highlighted transaction
    pub fn selected_transaction(&self) -> Option<Transaction> {
        self.month_transactions()
            .into_iter()
            .nth(self.transaction_index)
    }

    /// The highlighted category
    pub fn selected_category(&self) -> Option<Category> {
        self.month_categories().into_iter().nth(self.category_index)
    }

    /// Move selection up in the current view
    pub fn move_up(&mut self) {
        let index = match self.active_view {
            ActiveView::Menu => &mut self.menu_index,
            ActiveView::Transactions => &mut self.transaction_index,
            ActiveView::Categories => &mut self.category_index,
            ActiveView::Analysis => return,
        };
        *index = index.saturating_sub(1);
    }

    /// Move selection down in the current view
    pub fn move_down(&mut self, max: usize) {
        let index = match self.active_view {
            ActiveView::Menu => &mut self.menu_index,
            ActiveView::Transactions => &mut self.transaction_index,
            ActiveView::Categories => &mut self.category_index,
            ActiveView::Analysis => return,
        };
        if *index < max.saturating_sub(1) {
            *index += 1;
        }
    }

    /// Keep list selections inside their lists after a deletion
    pub fn clamp_selection(&mut self) {
        let transactions = self.month_transactions().len();
        let categories = self.month_categories().len();
        self.transaction_index = self.transaction_index.min(transactions.saturating_sub(1));
        self.category_index = self.category_index.min(categories.saturating_sub(1));
    }
}
