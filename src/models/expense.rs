use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

/// A single recorded spending entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Build an expense with a fresh v4 id. Callers are expected to pass an
    /// already validated title and amount.
    pub fn new(title: String, amount: Decimal, category: Category) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            amount,
            category,
            created_at: Utc::now(),
        }
    }
}
