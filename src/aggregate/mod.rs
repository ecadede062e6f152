mod chart;

pub(crate) use chart::{to_chart_series, ChartSeries};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Category, Expense};

/// Percentage of the monthly limit at which the progress bar turns to warning.
pub(crate) const WARNING_PERCENT: f64 = 80.0;
/// Percentage at which the limit counts as reached.
pub(crate) const OVER_PERCENT: f64 = 100.0;

/// Sum of expense amounts for one category. Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: Category,
    pub(crate) total: Decimal,
}

/// Group by category and sum, largest total first. Categories with equal
/// totals stay in the order they were first seen. Sums saturate at `Decimal::MAX`.
pub(crate) fn aggregate_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => entry.total = entry.total.saturating_add(expense.amount),
            None => totals.push(CategoryTotal {
                category: expense.category,
                total: expense.amount,
            }),
        }
    }
    // sort_by is stable
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

pub(crate) fn total_spent(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UsageTier {
    Ok,
    Warning,
    Over,
}

impl UsageTier {
    pub(crate) fn from_percent(percent: f64) -> Self {
        if percent >= OVER_PERCENT {
            Self::Over
        } else if percent >= WARNING_PERCENT {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Over => "over limit",
        }
    }
}

impl std::fmt::Display for UsageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending measured against the monthly limit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LimitUsage {
    pub(crate) spent: Decimal,
    pub(crate) limit: Decimal,
    /// Unclamped; may exceed 100.
    pub(crate) percent: f64,
    pub(crate) tier: UsageTier,
}

impl LimitUsage {
    /// Fraction of the limit for a progress bar, clamped to `0.0..=1.0`.
    pub(crate) fn ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }

    pub(crate) fn remaining(&self) -> Decimal {
        self.limit.saturating_sub(self.spent)
    }
}

/// A zero limit yields 0% rather than dividing by zero.
pub(crate) fn limit_usage(expenses: &[Expense], limit: Decimal) -> LimitUsage {
    let spent = total_spent(expenses);
    let percent = if limit > Decimal::ZERO {
        percent_of(spent, limit)
    } else {
        0.0
    };
    LimitUsage {
        spent,
        limit,
        percent,
        tier: UsageTier::from_percent(percent),
    }
}

/// `spent / limit` in percent. Falls back to float math when the decimal
/// result does not fit.
fn percent_of(spent: Decimal, limit: Decimal) -> f64 {
    spent
        .checked_div(limit)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|p| p.to_f64())
        .unwrap_or_else(|| {
            let spent = spent.to_f64().unwrap_or(f64::MAX);
            let limit = limit.to_f64().unwrap_or(f64::MAX);
            spent / limit * 100.0
        })
}

#[cfg(test)]
mod tests;
