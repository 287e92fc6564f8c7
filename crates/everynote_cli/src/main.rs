//! EveryNote CLI smoke entry point.
//!
//! # Responsibility
//! - Prove core linkage and the startup/shutdown lifecycle end to end:
//!   logging init, adapter open, load, read accessors, flush.

use std::process::ExitCode;
use std::sync::Arc;

use everynote_core::{
    core_version, default_log_level, init_logging, NoteStore, SqliteKeyValueStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Why: a broken log directory must not block the smoke run; report and
    // continue without file logging.
    if let Err(err) = init_logging(default_log_level(), &default_log_dir()) {
        eprintln!("logging unavailable: {err}");
    }

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "everynote.sqlite3".to_string());

    let adapter = match SqliteKeyValueStore::open(&db_path) {
        Ok(adapter) => Arc::new(adapter),
        Err(err) => {
            eprintln!("failed to open store at {db_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = NoteStore::new(adapter);
    store.load().await;

    println!("everynote core {}", core_version());
    println!(
        "store at {db_path}: {} categories, {} notes",
        store.categories().len(),
        store.notes().len()
    );
    for category in store.categories() {
        println!("  - {category}");
    }

    store.close().await;
    ExitCode::SUCCESS
}

fn default_log_dir() -> String {
    std::env::temp_dir()
        .join("everynote-logs")
        .to_string_lossy()
        .into_owned()
}
