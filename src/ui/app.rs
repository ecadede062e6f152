use crate::aggregate::{self, CategoryTotal, LimitUsage};
use crate::amount;
use crate::models::{Category, Expense};
use crate::store::{ExpenseStore, StateRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "ADD"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    RemoveExpense { id: String, title: String },
    ClearAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Title,
    Amount,
    Category,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Category,
            Self::Amount => Self::Title,
            Self::Category => Self::Amount,
        }
    }
}

/// Add-expense form. The amount buffer is re-sanitized on every keystroke, so
/// it only ever holds a normalized decimal candidate.
#[derive(Debug, Clone)]
pub(crate) struct ExpenseForm {
    pub(crate) title: String,
    pub(crate) amount: String,
    pub(crate) category: Category,
    pub(crate) field: FormField,
}

impl ExpenseForm {
    pub(crate) fn new() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: Category::default(),
            field: FormField::Title,
        }
    }

    pub(crate) fn push_char(&mut self, c: char) {
        match self.field {
            FormField::Title => self.title.push(c),
            FormField::Amount => {
                self.amount.push(c);
                self.amount = amount::sanitize(&self.amount);
            }
            FormField::Category => {}
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.field {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Category => {}
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub(crate) fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    pub(crate) fn cycle_category(&mut self, forward: bool) {
        self.category = if forward {
            self.category.next()
        } else {
            self.category.prev()
        };
    }

    /// Clear the inputs after a successful submit. The category sticks, since
    /// consecutive entries tend to share one.
    pub(crate) fn reset(&mut self) {
        self.title.clear();
        self.amount.clear();
        self.field = FormField::Title;
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Snapshot of the store, refreshed after every mutation
    pub(crate) expenses: Vec<Expense>,
    pub(crate) monthly_limit: rust_decimal::Decimal,
    pub(crate) category_totals: Vec<CategoryTotal>,
    pub(crate) usage: LimitUsage,

    // Expenses list
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    pub(crate) form: ExpenseForm,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            expenses: Vec::new(),
            monthly_limit: rust_decimal::Decimal::ZERO,
            category_totals: Vec::new(),
            usage: aggregate::limit_usage(&[], rust_decimal::Decimal::ZERO),

            expense_index: 0,
            expense_scroll: 0,

            form: ExpenseForm::new(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Pull the latest state and recompute everything derived from it.
    pub(crate) fn refresh<R: StateRepository>(&mut self, store: &ExpenseStore<R>) {
        let state = store.state();
        self.expenses = state.expenses.clone();
        self.monthly_limit = state.monthly_limit;
        self.category_totals = aggregate::aggregate_by_category(&self.expenses);
        self.usage = aggregate::limit_usage(&self.expenses, self.monthly_limit);

        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn open_form(&mut self) {
        self.form.reset();
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn ask_confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.pending_action = Some(action);
        self.confirm_message = message.into();
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
