use ratatui::style::Color;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::CategoryTotal;
use crate::amount;
use crate::ui::theme::CHART_PALETTE;

/// Tallest bar handed to the chart widget, which multiplies heights by the
/// cell count internally.
pub(crate) const MAX_BAR_HEIGHT: u64 = 1_000_000_000_000;

/// Display-ready form of the category breakdown: parallel label/value/colour lists.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChartSeries {
    pub(crate) labels: Vec<String>,
    pub(crate) values: Vec<Decimal>,
    pub(crate) colors: Vec<Color>,
}

impl ChartSeries {
    pub(crate) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Bar heights in whole cents, so sub-euro totals still get a visible bar.
    /// Values too large for a `u64` of cents are capped at `u64::MAX`.
    pub(crate) fn values_in_cents(&self) -> Vec<u64> {
        self.values
            .iter()
            .map(|v| {
                v.saturating_mul(Decimal::ONE_HUNDRED)
                    .to_u64()
                    .unwrap_or(u64::MAX)
            })
            .collect()
    }

    /// Cents, scaled down proportionally once the largest exceeds
    /// [`MAX_BAR_HEIGHT`]. Every category keeps a visible bar.
    pub(crate) fn bar_heights(&self) -> Vec<u64> {
        let cents = self.values_in_cents();
        let max = cents.iter().copied().max().unwrap_or(0);
        if max <= MAX_BAR_HEIGHT {
            return cents;
        }
        let divisor = max / MAX_BAR_HEIGHT + 1;
        cents.into_iter().map(|c| (c / divisor).max(1)).collect()
    }
}

pub(crate) fn to_chart_series(totals: &[CategoryTotal]) -> ChartSeries {
    let labels = totals.iter().map(|t| t.category.to_string()).collect();
    let values = totals.iter().map(|t| amount::round(t.total)).collect();
    let colors = (0..totals.len())
        .map(|i| CHART_PALETTE[i % CHART_PALETTE.len()])
        .collect();
    ChartSeries {
        labels,
        values,
        colors,
    }
}
