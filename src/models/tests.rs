#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("groceries"), Some(Category::Groceries));
    assert_eq!(Category::parse("TRANSPORT"), Some(Category::Transport));
    assert_eq!(Category::parse("  Rent "), Some(Category::Rent));
    assert_eq!(Category::parse("entertainment"), Some(Category::Entertainment));
    assert_eq!(Category::parse("other"), Some(Category::Other));
    assert_eq!(Category::parse("Food"), None);
    assert_eq!(Category::parse(""), None);
}

#[test]
fn test_category_all() {
    let all = Category::all();
    assert_eq!(all.len(), 7);
    assert_eq!(all[0], Category::Groceries);
    assert_eq!(all[6], Category::Other);
}

#[test]
fn test_category_roundtrip() {
    for c in Category::all() {
        let s = c.as_str();
        assert_eq!(Category::parse(s), Some(*c), "Roundtrip failed for {s}");
    }
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::Utilities), "Utilities");
}

#[test]
fn test_category_next_prev_wrap() {
    assert_eq!(Category::Groceries.next(), Category::Transport);
    assert_eq!(Category::Other.next(), Category::Groceries);
    assert_eq!(Category::Groceries.prev(), Category::Other);
    assert_eq!(Category::Transport.prev(), Category::Groceries);
    for c in Category::all() {
        assert_eq!(c.next().prev(), *c);
    }
}

#[test]
fn test_category_serializes_by_name() {
    let json = serde_json::to_string(&Category::Entertainment).unwrap();
    assert_eq!(json, "\"Entertainment\"");
    let back: Category = serde_json::from_str("\"Shopping\"").unwrap();
    assert_eq!(back, Category::Shopping);
    assert!(serde_json::from_str::<Category>("\"Food\"").is_err());
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_new() {
    let e = Expense::new("Coffee".into(), dec!(3.50), Category::Other);
    assert_eq!(e.title, "Coffee");
    assert_eq!(e.amount, dec!(3.5));
    assert_eq!(e.category, Category::Other);
    assert!(uuid::Uuid::parse_str(&e.id).is_ok());
}

#[test]
fn test_expense_ids_differ() {
    let a = Expense::new("A".into(), dec!(1), Category::Other);
    let b = Expense::new("B".into(), dec!(1), Category::Other);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_expense_json_layout() {
    let e = Expense::new("Bus".into(), dec!(2.80), Category::Transport);
    let value = serde_json::to_value(&e).unwrap();
    assert_eq!(value["title"], "Bus");
    assert_eq!(value["amount"], serde_json::json!(2.8));
    assert_eq!(value["category"], "Transport");
    assert!(value["createdAt"].is_string());
    assert!(value.get("created_at").is_none());
}
