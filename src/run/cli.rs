use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::aggregate::{aggregate_by_category, limit_usage};
use crate::amount;
use crate::export::{default_export_path, export_csv, shellexpand};
use crate::models::Expense;
use crate::store::Store;
use crate::ui::commands::parse_quick_add;
use crate::ui::util::{format_eur, format_timestamp, truncate};

pub(crate) fn as_cli(args: &[String], store: &mut Store) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], store),
        "list" | "ls" => cli_list(store),
        "remove" | "rm" => cli_remove(&args[2..], store),
        "clear" => cli_clear(&args[2..], store),
        "limit" => cli_limit(&args[2..], store),
        "summary" | "s" => cli_summary(store),
        "export" => cli_export(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expense-tracker {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("expense-tracker: local-only expense tracker with a monthly limit");
    println!();
    println!("Usage: expense-tracker [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  add <title> <amount> [category] Record an expense (e.g. add Coffee 3,50 Other)");
    println!("  list                            List expenses, newest first");
    println!("  remove <id>                     Remove an expense (a unique id prefix is enough)");
    println!("  clear [--yes]                   Delete all expenses after confirmation");
    println!("  limit [value]                   Show or set the monthly limit");
    println!("  summary                         Total, limit usage and category breakdown");
    println!("  export [path]                   Export all expenses to CSV");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn cli_add(args: &[String], store: &mut Store) -> Result<()> {
    let Some((title, amount_input, category)) = parse_quick_add(&args.join(" ")) else {
        println!("Usage: expense-tracker add <title> <amount> [category]");
        return Ok(());
    };

    match store.add_expense(&title, &amount_input, category)? {
        Some(expense) => println!(
            "Added {} {} ({}) [{}]",
            expense.title,
            format_eur(expense.amount),
            expense.category.as_str(),
            short_id(&expense.id)
        ),
        None => println!(
            "Nothing added: title must not be empty and amount must be above zero and at most {}",
            format_eur(amount::MAX_AMOUNT)
        ),
    }
    Ok(())
}

fn cli_list(store: &Store) -> Result<()> {
    let expenses = store.expenses();
    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<10} {:<18} {:<28} {:<14} {:>12}",
        "ID", "Date", "Title", "Category", "Amount"
    );
    println!("{}", "─".repeat(86));
    for expense in expenses {
        println!(
            "{:<10} {:<18} {:<28} {:<14} {:>12}",
            short_id(&expense.id),
            format_timestamp(&expense.created_at),
            truncate(&expense.title, 28),
            expense.category.as_str(),
            format_eur(expense.amount),
        );
    }
    Ok(())
}

fn cli_remove(args: &[String], store: &mut Store) -> Result<()> {
    let Some(needle) = args.first() else {
        anyhow::bail!("Usage: expense-tracker remove <id>");
    };

    let id = resolve_id(store.expenses(), needle)?;
    if let Some(removed) = store.remove_expense(&id)? {
        println!("Removed {} {}", removed.title, format_eur(removed.amount));
    }
    Ok(())
}

/// Match a full id, or a prefix that picks out exactly one expense.
pub(crate) fn resolve_id(expenses: &[Expense], needle: &str) -> Result<String> {
    if let Some(exact) = expenses.iter().find(|e| e.id == needle) {
        return Ok(exact.id.clone());
    }
    let matches: Vec<&Expense> = expenses
        .iter()
        .filter(|e| !needle.is_empty() && e.id.starts_with(needle))
        .collect();
    match matches.as_slice() {
        [one] => Ok(one.id.clone()),
        [] => anyhow::bail!("No expense with id '{needle}'"),
        _ => anyhow::bail!("Id prefix '{needle}' matches {} expenses", matches.len()),
    }
}

fn cli_clear(args: &[String], store: &mut Store) -> Result<()> {
    if store.expenses().is_empty() {
        println!("No expenses to clear");
        return Ok(());
    }

    let assume_yes = args.iter().any(|a| a == "--yes" || a == "-y");
    let removed = store.clear_all(|prompt| assume_yes || ask_stdin(prompt))?;
    if removed == 0 {
        println!("Cancelled");
    } else {
        println!("Cleared {removed} expenses");
    }
    Ok(())
}

fn ask_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(_) => false,
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn cli_limit(args: &[String], store: &mut Store) -> Result<()> {
    if let Some(raw) = args.first() {
        let limit = store.set_monthly_limit(amount::coerce_limit(raw))?;
        println!("Monthly limit set to {}", format_eur(limit));
    } else {
        println!("Monthly limit: {}", format_eur(store.monthly_limit()));
    }
    Ok(())
}

fn cli_summary(store: &Store) -> Result<()> {
    let expenses = store.expenses();
    let usage = limit_usage(expenses, store.monthly_limit());
    let totals = aggregate_by_category(expenses);

    println!("Expense Tracker");
    println!("{}", "─".repeat(40));
    println!("  Spent:      {}", format_eur(usage.spent));
    println!("  Limit:      {}", format_eur(usage.limit));
    println!("  Remaining:  {}", format_eur(usage.remaining()));
    println!("  Used:       {:.0}% ({})", usage.percent, usage.tier);
    println!("  Expenses:   {}", expenses.len());

    if !totals.is_empty() {
        println!();
        println!("By Category:");
        for entry in &totals {
            println!("  {:<24} {:>12}", entry.category.as_str(), format_eur(entry.total));
        }
    }
    Ok(())
}

fn cli_export(args: &[String], store: &Store) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(default_export_path);

    if store.expenses().is_empty() {
        println!("No expenses to export");
        return Ok(());
    }
    let count = export_csv(store.expenses(), Path::new(&output_path))?;
    println!("Exported {count} expenses to {output_path}");
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
