use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::store::Store;
use crate::ui::app::{App, FormField, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{format_eur, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut Store) -> Result<()> {
    let mut app = App::new();
    app.refresh(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            dispatch_key(key, app, store);
        }
    }
    Ok(())
}

/// Run a key through [`handle_key`]. Failures land in the status bar and the
/// session keeps going.
pub(crate) fn dispatch_key(key: event::KeyEvent, app: &mut App, store: &mut Store) {
    if let Err(e) = handle_key(key, app, store) {
        tracing::warn!(error = %e, "action failed");
        app.set_status(format!("Error: {e}"));
    }
}

pub(crate) fn handle_key(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, store),
        InputMode::Command => handle_command_input(key, app, store),
        InputMode::Form => handle_form_input(key, app, store),
        InputMode::Confirm => handle_confirm_input(key, app, store),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, store, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Expenses),
        KeyCode::Tab | KeyCode::BackTab => {
            // Only two screens, so forward and backward land on the same one
            let next = match app.screen {
                Screen::Dashboard => Screen::Expenses,
                Screen::Expenses => Screen::Dashboard,
            };
            switch_screen(app, store, next);
        }
        KeyCode::Char('n') => app.open_form(),
        KeyCode::Char('D') => commands::handle_command("delete", app, store)?,
        KeyCode::Char('X') => commands::handle_command("clear", app, store)?,
        KeyCode::Char('g') => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            app.visible_rows,
        ),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => submit_form(app, store)?,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Add cancelled");
        }
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
        KeyCode::Left if app.form.field == FormField::Category => app.form.cycle_category(false),
        KeyCode::Right if app.form.field == FormField::Category => app.form.cycle_category(true),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
    Ok(())
}

/// Invalid input leaves the form open with everything the user typed.
fn submit_form(app: &mut App, store: &mut Store) -> Result<()> {
    let form = &app.form;
    let Some(expense) = store.add_expense(&form.title, &form.amount, form.category)? else {
        return Ok(());
    };

    app.form.reset();
    app.input_mode = InputMode::Normal;
    app.refresh(store);
    scroll_to_top(&mut app.expense_index, &mut app.expense_scroll);
    app.set_status(format!(
        "Added: {} {} ({})",
        expense.title,
        format_eur(expense.amount),
        expense.category
    ));
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();

    match app.pending_action.take() {
        Some(PendingAction::RemoveExpense { id, title }) if confirmed => {
            store.remove_expense(&id)?;
            app.refresh(store);
            app.set_status(format!("Deleted: {title}"));
        }
        Some(PendingAction::ClearAll) => {
            // The keypress is the answer to the store's prompt
            let removed = store.clear_all(|_| confirmed)?;
            app.refresh(store);
            if confirmed {
                scroll_to_top(&mut app.expense_index, &mut app.expense_scroll);
                app.set_status(format!("Cleared {removed} expenses"));
            } else {
                app.set_status("Cancelled");
            }
        }
        _ => app.set_status("Cancelled"),
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, store: &Store, screen: Screen) {
    app.screen = screen;
    app.refresh(store);
}

fn handle_move_down(app: &mut App) {
    if app.screen == Screen::Expenses {
        let page = app.visible_rows.max(1);
        scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            page,
        );
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_up(&mut app.expense_index, &mut app.expense_scroll);
    }
}
