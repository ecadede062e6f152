use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::aggregate::{self, ChartSeries};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_eur, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Length(3), // Limit progress
            Constraint::Min(8),    // Category chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_limit_progress(f, chunks[1], app);
    render_category_chart(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let remaining = app.usage.remaining();
    let count = app.expenses.len();

    render_card(
        f,
        cards[0],
        "Spent",
        format_eur(app.usage.spent),
        theme::tier_color(app.usage.tier),
        Some(format!("{count} expenses")),
    );
    render_card(
        f,
        cards[1],
        "Monthly Limit",
        format_eur(app.monthly_limit),
        theme::ACCENT,
        None,
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        format_eur(remaining),
        if remaining >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::block_title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_limit_progress(f: &mut Frame, area: Rect, app: &App) {
    let color = theme::tier_color(app.usage.tier);
    let label = format!(" {:.0}% used ({})", app.usage.percent, app.usage.tier);
    // Leave room for the borders, brackets and label
    let width = (area.width as usize).saturating_sub(label.chars().count() + 6).max(10);

    let line = Line::from(vec![
        Span::styled(progress_bar(app.usage.ratio(), width), Style::default().fg(color)),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Monthly Limit ", theme::block_title_style())),
    );
    f.render_widget(widget, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Spending by Category ",
            theme::block_title_style(),
        ));

    let series = aggregate::to_chart_series(&app.category_totals);
    if series.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press n or use :add to record one",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bar_list = bars(&series);
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bar_list))
        .bar_width(13)
        .bar_gap(2)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

/// One bar per series entry. Heights follow the cents; the text shows the euro amount.
fn bars(series: &ChartSeries) -> Vec<Bar<'static>> {
    series
        .bar_heights()
        .into_iter()
        .zip(series.values.iter())
        .zip(series.labels.iter().zip(series.colors.iter()))
        .map(|((cents, value), (label, color))| {
            Bar::default()
                .value(cents)
                .text_value(format_eur(*value))
                .label(Line::from(truncate(label, 13)))
                .style(Style::default().fg(*color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(*color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use ratatui::{backend::TestBackend, Terminal};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Category, Expense};

    fn render_to_string(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, f.area(), app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with(expenses: Vec<Expense>, limit: Decimal) -> App {
        let mut app = App::new();
        app.monthly_limit = limit;
        app.category_totals = aggregate::aggregate_by_category(&expenses);
        app.usage = aggregate::limit_usage(&expenses, limit);
        app.expenses = expenses;
        app
    }

    #[test]
    fn test_empty_shows_placeholder_instead_of_chart() {
        let app = app_with(Vec::new(), dec!(300));
        let screen = render_to_string(&app);
        assert!(screen.contains("No expenses yet"));
        assert!(screen.contains("0% used"));
    }

    #[test]
    fn test_chart_lists_categories() {
        let app = app_with(
            vec![
                Expense::new("Veg".into(), dec!(50), Category::Groceries),
                Expense::new("Train".into(), dec!(35), Category::Transport),
            ],
            dec!(100),
        );
        let screen = render_to_string(&app);
        assert!(!screen.contains("No expenses yet"));
        assert!(screen.contains("Groceries"));
        assert!(screen.contains("Transport"));
        assert!(screen.contains("85% used (warning)"));
        assert!(screen.contains("85,00 €"));
    }
}
