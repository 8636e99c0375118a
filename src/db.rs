// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{BillfoldError, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.billfold", "Billfold", "billfold"));

/// Re-runnable DDL. Columns referencing other tables are plain TEXT on
/// purpose: references are weak, deletes never cascade.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS transactions(
    id TEXT PRIMARY KEY,
    amount TEXT NOT NULL,
    category TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    date TEXT NOT NULL,
    kind TEXT NOT NULL CHECK(kind IN ('income','expense'))
);
CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_kind ON transactions(kind);
CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);

CREATE TABLE IF NOT EXISTS categories(
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    icon TEXT NOT NULL DEFAULT '',
    color TEXT NOT NULL DEFAULT '',
    kind TEXT NOT NULL CHECK(kind IN ('income','expense'))
);
CREATE INDEX IF NOT EXISTS idx_categories_kind ON categories(kind);

CREATE TABLE IF NOT EXISTS budgets(
    id TEXT PRIMARY KEY,
    category_id TEXT NOT NULL,
    name TEXT NOT NULL,
    limit_amount TEXT NOT NULL, -- 'limit' is an SQL keyword
    spent TEXT NOT NULL DEFAULT '0',
    period TEXT NOT NULL CHECK(period IN ('weekly','monthly','yearly')),
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_budgets_category ON budgets(category_id);
"#;

pub fn db_path() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var("BILLFOLD_DB") {
        return Ok(PathBuf::from(custom));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(BillfoldError::NoDataDir)?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("billfold.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn = Connection::open(&path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_tables() {
        let conn = open_in_memory().unwrap();
        let tables: Vec<String> = conn
            .prepare(
                "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            )
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["transactions", "categories", "budgets"] {
            assert!(
                tables.contains(&expected.to_string()),
                "missing table: {expected}"
            );
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }

    #[test]
    fn kind_check_rejects_garbage() {
        let conn = open_in_memory().unwrap();
        let res = conn.execute(
            "INSERT INTO transactions(id, amount, category, description, date, kind)
             VALUES ('x', '1', '1', '', '2025-01-01T00:00:00Z', 'transfer')",
            [],
        );
        assert!(res.is_err());
    }
}
