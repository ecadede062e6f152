use anyhow::{Context, Result};
use std::path::Path;

use crate::amount;
use crate::models::Expense;

const HEADER: [&str; 5] = ["id", "created_at", "title", "category", "amount"];

/// Write expenses as CSV, newest first. Returns the number of rows written.
pub(crate) fn export_csv(expenses: &[Expense], path: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    writer.write_record(HEADER)?;
    for expense in expenses {
        let created_at = expense.created_at.to_rfc3339();
        let amount = amount::format_plain(expense.amount);
        writer.write_record([
            expense.id.as_str(),
            created_at.as_str(),
            expense.title.as_str(),
            expense.category.as_str(),
            amount.as_str(),
        ])?;
    }
    writer.flush()?;
    tracing::info!(rows = expenses.len(), path = %path.display(), "expenses exported");
    Ok(expenses.len())
}

/// `~/expense-tracker-export-YYYY-MM-DD.csv`
pub(crate) fn default_export_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    let today = chrono::Local::now().format("%Y-%m-%d");
    format!("{home}/expense-tracker-export-{today}.csv")
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Category;

    #[test]
    fn test_export_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let expenses = vec![
            Expense::new("Coffee, large".into(), dec!(3.5), Category::Other),
            Expense::new("Rent".into(), dec!(650), Category::Rent),
        ];

        let count = export_csv(&expenses, &path).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "Coffee, large");
        assert_eq!(&rows[0][3], "Other");
        assert_eq!(&rows[0][4], "3.50");
        assert_eq!(&rows[1][4], "650.00");
    }

    #[test]
    fn test_export_empty_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        assert_eq!(export_csv(&[], &path).unwrap(), 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "id,created_at,title,category,amount");
    }

    #[test]
    fn test_shellexpand_passthrough() {
        assert_eq!(shellexpand("/tmp/x.csv"), "/tmp/x.csv");
        assert_eq!(shellexpand("rel/x.csv"), "rel/x.csv");
    }
}
