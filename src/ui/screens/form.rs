use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::app::{ExpenseForm, FormField};
use crate::ui::theme;

const POPUP_WIDTH: u16 = 52;
const POPUP_HEIGHT: u16 = 10;
/// Width of the padded field label, including the surrounding spaces.
const LABEL_WIDTH: u16 = 12;

/// Centered add-expense popup drawn over the current screen.
pub(crate) fn render(f: &mut Frame, area: Rect, form: &ExpenseForm) {
    let width = POPUP_WIDTH.min(area.width.saturating_sub(4));
    let height = POPUP_HEIGHT.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    let lines = vec![
        Line::from(""),
        field_line("Title", &form.title, form.field == FormField::Title),
        field_line(
            "Amount €",
            &form.amount,
            form.field == FormField::Amount,
        ),
        field_line(
            "Category",
            &format!("‹ {} ›", form.category),
            form.field == FormField::Category,
        ),
        Line::from(""),
        Line::from(Span::styled(
            " Tab next field · ←/→ category · Enter save · Esc cancel",
            theme::dim_style(),
        )),
    ];

    f.render_widget(Clear, popup);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG))
            .title(Span::styled(
                " New Expense ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(widget, popup);

    // Cursor at the end of the active text field
    let (row, text) = match form.field {
        FormField::Title => (2, &form.title),
        FormField::Amount => (3, &form.amount),
        FormField::Category => return,
    };
    let col = popup.x + 1 + LABEL_WIDTH + text.chars().count() as u16;
    if col < popup.x + popup.width.saturating_sub(1) {
        f.set_cursor_position((col, popup.y + row));
    }
}

fn field_line(label: &str, value: &str, active: bool) -> Line<'static> {
    let label_style = if active {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    };
    Line::from(vec![
        Span::styled(format!(" {label:<10} "), label_style),
        Span::styled(value.to_string(), theme::normal_style()),
    ])
}
