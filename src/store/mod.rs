//! The single source of truth for expenses and the monthly limit.
//!
//! Every mutation builds the next [`AppState`], persists it through a
//! [`StateRepository`] and only then swaps it in, so the in-memory state and the
//! stored snapshot never disagree.

mod repository;

pub(crate) use repository::DbRepository;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amount;
use crate::models::{Category, Expense};

/// Limit used when none is stored or the stored one is unusable.
pub(crate) const DEFAULT_MONTHLY_LIMIT: Decimal = Decimal::from_parts(300, 0, 0, false, 0);

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("failed to encode state: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppState {
    /// Newest first.
    pub(crate) expenses: Vec<Expense>,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) monthly_limit: Decimal,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
        }
    }
}

/// Where the state lives between runs.
pub(crate) trait StateRepository {
    /// Read the persisted state. Never fails: anything missing or unreadable
    /// degrades to [`AppState::default`].
    fn load(&mut self) -> AppState;

    /// Replace the persisted state with `state`.
    fn save(&mut self, state: &AppState) -> Result<(), StoreError>;
}

pub(crate) type Store = ExpenseStore<DbRepository>;

pub(crate) struct ExpenseStore<R: StateRepository> {
    repo: R,
    state: AppState,
}

impl<R: StateRepository> ExpenseStore<R> {
    pub(crate) fn open(mut repo: R) -> Self {
        let state = repo.load();
        tracing::info!(
            expenses = state.expenses.len(),
            monthly_limit = %state.monthly_limit,
            "state loaded"
        );
        Self { repo, state }
    }

    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.state.expenses
    }

    pub(crate) fn monthly_limit(&self) -> Decimal {
        self.state.monthly_limit
    }

    fn commit(&mut self, next: AppState) -> Result<(), StoreError> {
        self.repo.save(&next)?;
        self.state = next;
        Ok(())
    }

    /// Record a new expense at the front of the list.
    ///
    /// `amount_input` must already be a normalized decimal string (see
    /// [`amount::sanitize`]). Returns `Ok(None)` and leaves everything untouched
    /// when the title is blank or the amount isn't a positive number.
    pub(crate) fn add_expense(
        &mut self,
        title: &str,
        amount_input: &str,
        category: Category,
    ) -> Result<Option<Expense>, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            tracing::debug!("add ignored: empty title");
            return Ok(None);
        }
        let Some(amount) = amount::validate(amount_input) else {
            tracing::debug!(input = amount_input, "add ignored: invalid amount");
            return Ok(None);
        };

        let mut expense = Expense::new(title.to_string(), amount, category);
        while self.state.expenses.iter().any(|e| e.id == expense.id) {
            expense.id = uuid::Uuid::new_v4().to_string();
        }

        let mut next = self.state.clone();
        next.expenses.insert(0, expense.clone());
        self.commit(next)?;

        tracing::info!(id = %expense.id, amount = %expense.amount, category = %expense.category, "expense added");
        Ok(Some(expense))
    }

    /// Remove by id. Unknown ids are a no-op and skip the write.
    pub(crate) fn remove_expense(&mut self, id: &str) -> Result<Option<Expense>, StoreError> {
        let Some(pos) = self.state.expenses.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let mut next = self.state.clone();
        let removed = next.expenses.remove(pos);
        self.commit(next)?;

        tracing::info!(id = %removed.id, "expense removed");
        Ok(Some(removed))
    }

    /// Question put to the user before [`Self::clear_all`].
    pub(crate) fn clear_prompt(&self) -> String {
        format!("Delete all {} expenses?", self.state.expenses.len())
    }

    /// Remove every expense once `confirm` agrees. Returns how many were removed;
    /// a declined prompt removes nothing and writes nothing.
    pub(crate) fn clear_all(
        &mut self,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<usize, StoreError> {
        let count = self.state.expenses.len();
        if !confirm(&self.clear_prompt()) {
            tracing::debug!("clear declined");
            return Ok(0);
        }

        let next = AppState {
            expenses: Vec::new(),
            monthly_limit: self.state.monthly_limit,
        };
        self.commit(next)?;

        tracing::info!(count, "all expenses cleared");
        Ok(count)
    }

    /// Negative values are clamped to zero and huge ones to [`amount::MAX_AMOUNT`];
    /// the stored value is rounded to cents. Callers turn unparsable text into
    /// zero with [`amount::coerce_limit`].
    pub(crate) fn set_monthly_limit(&mut self, value: Decimal) -> Result<Decimal, StoreError> {
        let limit = amount::clamp_limit(value);

        let mut next = self.state.clone();
        next.monthly_limit = limit;
        self.commit(next)?;

        tracing::info!(monthly_limit = %limit, "monthly limit set");
        Ok(limit)
    }
}
