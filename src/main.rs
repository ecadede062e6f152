mod aggregate;
mod amount;
mod config;
mod db;
mod export;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;

use crate::config::Config;
use crate::store::{DbRepository, Store};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;
    logging::init(&config)?;

    let db = db::Database::open(&config.db_path())?;
    let mut store = Store::open(DbRepository::new(db));

    match args.len() {
        1 => run::as_tui(&mut store),
        2.. => run::as_cli(&args, &mut store),
        _ => {
            eprintln!("Usage: expense-tracker [command]");
            Ok(())
        }
    }
}
