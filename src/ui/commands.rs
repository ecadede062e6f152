use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, PendingAction, Screen};
use super::util::format_eur;
use crate::amount;
use crate::export;
use crate::models::Category;
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (form, or :add Coffee 3,50 Other)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense", cmd_add, r);
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!("del", "Delete selected expense", cmd_delete, r);
    register_command!("clear", "Delete all expenses (asks first)", cmd_clear, r);
    register_command!(
        "limit",
        "Set monthly limit (e.g. :limit 300)",
        cmd_limit,
        r
    );
    register_command!("l", "Set monthly limit", cmd_limit, r);
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `<title words...> <amount> [category]` from the end. The title keeps
/// its inner spacing; the amount is sanitized like form input.
pub(crate) fn parse_quick_add(args: &str) -> Option<(String, String, Category)> {
    let mut words: Vec<&str> = args.split_whitespace().collect();

    let category = match words.last().and_then(|w| Category::parse(w)) {
        Some(c) if words.len() >= 3 => {
            words.pop();
            c
        }
        _ => Category::Other,
    };

    let amount_raw = words.pop()?;
    if words.is_empty() {
        return None;
    }
    Some((words.join(" "), amount::sanitize(amount_raw), category))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(store);
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(store);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_form();
        return Ok(());
    }

    let Some((title, amount_input, category)) = parse_quick_add(args) else {
        app.set_status("Usage: :add <title> <amount> [category]");
        return Ok(());
    };

    match store.add_expense(&title, &amount_input, category)? {
        Some(expense) => {
            app.refresh(store);
            app.expense_index = 0;
            app.expense_scroll = 0;
            app.set_status(format!(
                "Added: {} {} ({})",
                expense.title,
                format_eur(expense.amount),
                expense.category
            ));
        }
        None => app.set_status("Nothing added: title and a positive amount are required"),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    let Some(expense) = app.selected_expense() else {
        app.set_status("No expense selected");
        return Ok(());
    };
    let (id, title) = (expense.id.clone(), expense.title.clone());
    let message = format!("Delete '{title}'?");
    app.ask_confirm(PendingAction::RemoveExpense { id, title }, message);
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if app.expenses.is_empty() {
        app.set_status("No expenses to clear");
        return Ok(());
    }
    let message = store.clear_prompt();
    app.ask_confirm(PendingAction::ClearAll, message);
    Ok(())
}

fn cmd_limit(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "Monthly limit: {}. Usage: :limit <amount>",
            format_eur(store.monthly_limit())
        ));
        return Ok(());
    }

    let limit = store.set_monthly_limit(amount::coerce_limit(args))?;
    app.refresh(store);
    app.set_status(format!("Monthly limit set to {}", format_eur(limit)));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        export::default_export_path()
    } else {
        export::shellexpand(args)
    };

    let count = export::export_csv(store.expenses(), Path::new(&path))?;
    if count == 0 {
        app.set_status(format!("No expenses; wrote empty file {path}"));
    } else {
        app.set_status(format!("Exported {count} expenses to {path}"));
    }
    Ok(())
}
