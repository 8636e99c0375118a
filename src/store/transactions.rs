// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::conv_err;
use crate::error::Result;
use crate::ident;
use crate::models::{Kind, Transaction, TransactionDraft, TransactionPatch};
use crate::utils::{fmt_ts, parse_ts};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

/// Stateless view over the transactions table. Construct one whenever
/// a connection is at hand; it holds nothing.
pub struct TransactionStore<'c> {
    conn: &'c Connection,
}

impl<'c> TransactionStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Newest first, id as tie-breaker.
    pub fn all(&self) -> Result<Vec<Transaction>> {
        self.select(
            "SELECT id, amount, category, description, date, kind
             FROM transactions ORDER BY date DESC, id DESC",
            [],
        )
    }

    pub fn get(&self, id: &str) -> Result<Option<Transaction>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, amount, category, description, date, kind
                 FROM transactions WHERE id=?1",
                params![id],
                map_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn by_kind(&self, kind: Kind) -> Result<Vec<Transaction>> {
        self.select(
            "SELECT id, amount, category, description, date, kind
             FROM transactions WHERE kind=?1 ORDER BY date DESC, id DESC",
            params![kind.as_str()],
        )
    }

    pub fn by_category(&self, category_id: &str) -> Result<Vec<Transaction>> {
        self.select(
            "SELECT id, amount, category, description, date, kind
             FROM transactions WHERE category=?1 ORDER BY date DESC, id DESC",
            params![category_id],
        )
    }

    /// Both boundaries inclusive.
    pub fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Transaction>> {
        self.select(
            "SELECT id, amount, category, description, date, kind
             FROM transactions WHERE date BETWEEN ?1 AND ?2 ORDER BY date, id",
            params![fmt_ts(&start), fmt_ts(&end)],
        )
    }

    pub fn add(&self, draft: &TransactionDraft) -> Result<String> {
        let id = ident::generate();
        self.conn.execute(
            "INSERT INTO transactions(id, amount, category, description, date, kind)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                draft.amount.to_string(),
                draft.category,
                draft.description,
                fmt_ts(&draft.date),
                draft.kind.as_str()
            ],
        )?;
        Ok(id)
    }

    /// Insert with a caller-provided id (seeding, import).
    pub fn put(&self, tx: &Transaction) -> Result<()> {
        self.conn.execute(
            "INSERT INTO transactions(id, amount, category, description, date, kind)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tx.id,
                tx.amount.to_string(),
                tx.category,
                tx.description,
                fmt_ts(&tx.date),
                tx.kind.as_str()
            ],
        )?;
        Ok(())
    }

    /// Unmentioned fields stay as they are; an unknown id is a no-op.
    pub fn update(&self, id: &str, patch: &TransactionPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut sets: Vec<&str> = Vec::new();
        let mut params_vec: Vec<String> = Vec::new();
        if let Some(amount) = patch.amount {
            sets.push("amount=?");
            params_vec.push(amount.to_string());
        }
        if let Some(category) = &patch.category {
            sets.push("category=?");
            params_vec.push(category.clone());
        }
        if let Some(description) = &patch.description {
            sets.push("description=?");
            params_vec.push(description.clone());
        }
        if let Some(date) = patch.date {
            sets.push("date=?");
            params_vec.push(fmt_ts(&date));
        }
        if let Some(kind) = patch.kind {
            sets.push("kind=?");
            params_vec.push(kind.as_str().to_string());
        }
        let sql = format!("UPDATE transactions SET {} WHERE id=?", sets.join(", "));
        params_vec.push(id.to_string());
        let n = self
            .conn
            .execute(&sql, rusqlite::params_from_iter(params_vec.iter()))?;
        if n == 0 {
            debug!("Transaction update for id '{}' matched no row", id);
        }
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            debug!("Transaction delete for id '{}' matched no row", id);
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM transactions", [])?;
        Ok(())
    }

    fn select(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn map_row(row: &Row) -> rusqlite::Result<Transaction> {
    let amount: String = row.get(1)?;
    let date: String = row.get(4)?;
    let kind: String = row.get(5)?;
    Ok(Transaction {
        id: row.get(0)?,
        amount: amount.parse().map_err(|e| conv_err(1, e))?,
        category: row.get(2)?,
        description: row.get(3)?,
        date: parse_ts(&date).map_err(|e| conv_err(4, e))?,
        kind: kind.parse().map_err(|e| conv_err(5, e))?,
    })
}
