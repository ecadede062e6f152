#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::ui::theme::CHART_PALETTE;

fn make_expense(amount: Decimal, category: Category) -> Expense {
    Expense::new("Test".into(), amount, category)
}

// ── aggregate_by_category ─────────────────────────────────────

#[test]
fn test_aggregate_empty() {
    assert!(aggregate_by_category(&[]).is_empty());
}

#[test]
fn test_aggregate_groups_and_sorts_descending() {
    let expenses = vec![
        make_expense(dec!(10.00), Category::Groceries),
        make_expense(dec!(600.00), Category::Rent),
        make_expense(dec!(25.50), Category::Groceries),
        make_expense(dec!(4.20), Category::Transport),
    ];
    let totals = aggregate_by_category(&expenses);
    assert_eq!(
        totals,
        vec![
            CategoryTotal {
                category: Category::Rent,
                total: dec!(600.00)
            },
            CategoryTotal {
                category: Category::Groceries,
                total: dec!(35.50)
            },
            CategoryTotal {
                category: Category::Transport,
                total: dec!(4.20)
            },
        ]
    );
}

#[test]
fn test_aggregate_ties_keep_encounter_order() {
    let expenses = vec![
        make_expense(dec!(5), Category::Shopping),
        make_expense(dec!(5), Category::Utilities),
        make_expense(dec!(2), Category::Other),
        make_expense(dec!(3), Category::Other),
    ];
    let order: Vec<Category> = aggregate_by_category(&expenses)
        .iter()
        .map(|t| t.category)
        .collect();
    assert_eq!(
        order,
        vec![Category::Shopping, Category::Utilities, Category::Other]
    );
}

#[test]
fn test_aggregate_properties() {
    let expenses = vec![
        make_expense(dec!(1.10), Category::Groceries),
        make_expense(dec!(2.20), Category::Transport),
        make_expense(dec!(3.30), Category::Groceries),
        make_expense(dec!(99.99), Category::Entertainment),
        make_expense(dec!(0.01), Category::Transport),
        make_expense(dec!(12.00), Category::Rent),
    ];
    let totals = aggregate_by_category(&expenses);

    // One entry per distinct category
    assert_eq!(totals.len(), 4);

    // Sum is preserved
    let sum: Decimal = totals.iter().map(|t| t.total).sum();
    assert_eq!(sum, total_spent(&expenses));

    // Non-increasing order
    for pair in totals.windows(2) {
        assert!(pair[0].total >= pair[1].total);
    }
}

#[test]
fn test_aggregate_does_not_mutate_input() {
    let expenses = vec![
        make_expense(dec!(1), Category::Other),
        make_expense(dec!(2), Category::Rent),
    ];
    let before = expenses.clone();
    let _ = aggregate_by_category(&expenses);
    assert_eq!(expenses, before);
}

// ── limit_usage ───────────────────────────────────────────────

#[test]
fn test_limit_usage_warning_tier() {
    let expenses = vec![
        make_expense(dec!(50), Category::Groceries),
        make_expense(dec!(35), Category::Transport),
    ];
    let usage = limit_usage(&expenses, dec!(100));
    assert_eq!(usage.spent, dec!(85));
    assert!((usage.percent - 85.0).abs() < f64::EPSILON);
    assert_eq!(usage.tier, UsageTier::Warning);
    assert_eq!(usage.remaining(), dec!(15));
}

#[test]
fn test_limit_usage_tiers() {
    assert_eq!(UsageTier::from_percent(0.0), UsageTier::Ok);
    assert_eq!(UsageTier::from_percent(79.99), UsageTier::Ok);
    assert_eq!(UsageTier::from_percent(80.0), UsageTier::Warning);
    assert_eq!(UsageTier::from_percent(99.99), UsageTier::Warning);
    assert_eq!(UsageTier::from_percent(100.0), UsageTier::Over);
    assert_eq!(UsageTier::from_percent(250.0), UsageTier::Over);
}

#[test]
fn test_limit_usage_over_limit_ratio_clamped() {
    let expenses = vec![make_expense(dec!(450), Category::Rent)];
    let usage = limit_usage(&expenses, dec!(300));
    assert!((usage.percent - 150.0).abs() < 1e-9);
    assert_eq!(usage.tier, UsageTier::Over);
    assert!((usage.ratio() - 1.0).abs() < f64::EPSILON);
    assert_eq!(usage.remaining(), dec!(-150));
}

#[test]
fn test_limit_usage_zero_limit() {
    let expenses = vec![make_expense(dec!(10), Category::Other)];
    let usage = limit_usage(&expenses, Decimal::ZERO);
    assert_eq!(usage.percent, 0.0);
    assert_eq!(usage.tier, UsageTier::Ok);
}

#[test]
fn test_limit_usage_empty() {
    let usage = limit_usage(&[], dec!(300));
    assert_eq!(usage.spent, Decimal::ZERO);
    assert_eq!(usage.percent, 0.0);
    assert_eq!(usage.ratio(), 0.0);
}

// ── to_chart_series ───────────────────────────────────────────

#[test]
fn test_chart_series_empty() {
    let series = to_chart_series(&[]);
    assert!(series.is_empty());
    assert!(series.values.is_empty() && series.colors.is_empty());
}

#[test]
fn test_chart_series_labels_values() {
    let totals = vec![
        CategoryTotal {
            category: Category::Rent,
            total: dec!(600),
        },
        CategoryTotal {
            category: Category::Groceries,
            total: dec!(35.555),
        },
    ];
    let series = to_chart_series(&totals);
    assert_eq!(series.labels, vec!["Rent", "Groceries"]);
    assert_eq!(series.values, vec![dec!(600.00), dec!(35.56)]);
    assert_eq!(series.values_in_cents(), vec![60000, 3556]);
}

#[test]
fn test_chart_series_colors_cycle() {
    let totals: Vec<CategoryTotal> = (0..CHART_PALETTE.len() + 2)
        .map(|i| CategoryTotal {
            category: Category::all()[i % Category::all().len()],
            total: Decimal::from(100 - i as i64),
        })
        .collect();
    let series = to_chart_series(&totals);
    assert_eq!(series.colors.len(), totals.len());
    assert_eq!(series.colors[0], CHART_PALETTE[0]);
    assert_eq!(series.colors[CHART_PALETTE.len()], CHART_PALETTE[0]);
    assert_eq!(series.colors[CHART_PALETTE.len() + 1], CHART_PALETTE[1]);
}

// ── Upper edge of the amount domain ───────────────────────────

#[test]
fn test_aggregate_saturates_instead_of_overflowing() {
    let huge = dec!(50000000000000000000000000000);
    let expenses = vec![
        make_expense(huge, Category::Other),
        make_expense(huge, Category::Other),
        make_expense(dec!(1), Category::Rent),
    ];

    let totals = aggregate_by_category(&expenses);
    assert_eq!(totals[0].category, Category::Other);
    assert_eq!(totals[0].total, Decimal::MAX);
    assert_eq!(total_spent(&expenses), Decimal::MAX);
}

#[test]
fn test_limit_usage_with_huge_spending() {
    let huge = dec!(50000000000000000000000000000);
    let expenses = vec![
        make_expense(huge, Category::Other),
        make_expense(huge, Category::Other),
    ];

    let usage = limit_usage(&expenses, dec!(300));
    assert_eq!(usage.tier, UsageTier::Over);
    assert!(usage.percent.is_finite());
    assert_eq!(usage.ratio(), 1.0);

    // The decimal quotient overflows here; the float fallback still answers
    let usage = limit_usage(&expenses, dec!(0.01));
    assert_eq!(usage.tier, UsageTier::Over);
    assert!(usage.percent.is_finite());
    assert!(usage.remaining() < Decimal::ZERO);
}

#[test]
fn test_chart_cents_cap_at_u64_max() {
    let totals = vec![CategoryTotal {
        category: Category::Other,
        total: dec!(1000000000000000000000000000),
    }];
    let series = to_chart_series(&totals);
    assert_eq!(series.values_in_cents(), vec![u64::MAX]);
}

#[test]
fn test_bar_heights_scale_down_large_values() {
    let totals = vec![
        CategoryTotal {
            category: Category::Rent,
            total: dec!(1000000000000000000000000000),
        },
        CategoryTotal {
            category: Category::Other,
            total: dec!(0.01),
        },
    ];
    let heights = to_chart_series(&totals).bar_heights();
    assert!(heights[0] <= super::chart::MAX_BAR_HEIGHT);
    assert_eq!(heights[1], 1);
}

#[test]
fn test_bar_heights_unscaled_for_normal_values() {
    let totals = vec![CategoryTotal {
        category: Category::Rent,
        total: dec!(650),
    }];
    let series = to_chart_series(&totals);
    assert_eq!(series.bar_heights(), series.values_in_cents());
}
