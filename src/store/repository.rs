use rust_decimal::Decimal;
use serde::Deserialize;

use super::{AppState, StateRepository, StoreError, DEFAULT_MONTHLY_LIMIT};
use crate::amount;
use crate::db::Database;
use crate::models::Expense;

/// Key holding the current state layout.
pub(crate) const STATE_KEY: &str = "expense-tracker:v2";
/// Older layout: a bare JSON array of expenses with no limit.
pub(crate) const LEGACY_STATE_KEY: &str = "expense-tracker:v1";

/// On-disk shape as read back. Looser than [`AppState`] so a missing or null
/// limit can be repaired instead of discarding the expenses with it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    expenses: Vec<Expense>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    monthly_limit: Option<Decimal>,
}

pub(crate) fn decode_state(raw: &str) -> Result<AppState, serde_json::Error> {
    let stored: StoredState = serde_json::from_str(raw)?;

    let monthly_limit = match stored.monthly_limit {
        Some(limit) if limit >= Decimal::ZERO => {
            if limit > amount::MAX_AMOUNT {
                tracing::warn!(stored = %limit, "monthly limit too large, clamping");
            }
            amount::clamp_limit(limit)
        }
        other => {
            tracing::warn!(stored = ?other, "monthly limit missing or invalid, using default");
            DEFAULT_MONTHLY_LIMIT
        }
    };

    let total = stored.expenses.len();
    let expenses: Vec<Expense> = stored
        .expenses
        .into_iter()
        .filter(|e| is_usable(e))
        .collect();
    if expenses.len() != total {
        tracing::warn!(
            dropped = total - expenses.len(),
            "dropped stored expenses with empty title or out-of-range amount"
        );
    }

    Ok(AppState {
        expenses,
        monthly_limit,
    })
}

fn is_usable(expense: &Expense) -> bool {
    !expense.title.trim().is_empty() && amount::in_range(expense.amount)
}

pub(crate) fn encode_state(state: &AppState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// [`StateRepository`] over the SQLite key-value table.
pub(crate) struct DbRepository {
    db: Database,
}

impl DbRepository {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    /// Adopt expenses stored under the legacy key, rewrite them under the
    /// current key and drop the old entry. `None` when there is nothing usable.
    fn migrate_legacy(&mut self) -> Option<AppState> {
        let raw = match self.db.get_value(LEGACY_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read legacy state");
                return None;
            }
        };

        let mut expenses: Vec<Expense> = match serde_json::from_str(&raw) {
            Ok(expenses) => expenses,
            Err(e) => {
                tracing::warn!(error = %e, "legacy state unreadable, ignoring");
                return None;
            }
        };
        expenses.retain(is_usable);
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let state = AppState {
            expenses,
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
        };
        if let Err(e) = self.save(&state) {
            tracing::warn!(error = %e, "failed to write migrated state");
            return Some(state);
        }
        if let Err(e) = self.db.delete_value(LEGACY_STATE_KEY) {
            tracing::warn!(error = %e, "failed to remove legacy state");
        }

        tracing::info!(expenses = state.expenses.len(), "migrated legacy state");
        Some(state)
    }

    #[cfg(test)]
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }
}

impl StateRepository for DbRepository {
    fn load(&mut self) -> AppState {
        match self.db.get_value(STATE_KEY) {
            Ok(Some(raw)) => decode_state(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored state is malformed, using defaults");
                AppState::default()
            }),
            Ok(None) => self.migrate_legacy().unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored state, using defaults");
                AppState::default()
            }
        }
    }

    fn save(&mut self, state: &AppState) -> Result<(), StoreError> {
        let raw = encode_state(state)?;
        self.db.set_value(STATE_KEY, &raw)?;
        tracing::debug!(bytes = raw.len(), "state saved");
        Ok(())
    }
}
