//! Schema migrations for the key-value database.
//!
//! # Responsibility
//! - Hold every schema revision as versioned SQL.
//! - Bring an opened database up to the newest revision in one transaction.
//!
//! # Invariants
//! - Registry entries stay sorted by `version`, oldest first.
//! - `PRAGMA user_version` equals the newest applied revision after success.

use log::info;
use rusqlite::Connection;

use crate::db::{DbError, DbResult};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Newest schema revision this build knows how to produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// Pending revisions apply inside a single transaction, so a failure leaves
/// the stamped version and the schema exactly as they were. A database
/// stamped by a newer build is rejected rather than guessed at.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = stamped_version(conn)?;
    let supported = latest_version();

    if found > supported {
        return Err(DbError::NewerSchema { found, supported });
    }
    if found == supported {
        return Ok(());
    }

    let pending: Vec<Migration> = MIGRATIONS
        .iter()
        .copied()
        .filter(|migration| migration.version > found)
        .collect();

    let tx = conn.transaction()?;
    for migration in &pending {
        tx.execute_batch(migration.sql)?;
    }
    tx.execute_batch(&format!("PRAGMA user_version = {supported};"))?;
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={found} to={supported} applied={}",
        pending.len()
    );
    Ok(())
}

fn stamped_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
