// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::conv_err;
use crate::error::Result;
use crate::ident;
use crate::models::{Budget, BudgetDraft, BudgetPatch};
use crate::utils::{fmt_ts, parse_ts};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::debug;

pub struct BudgetStore<'c> {
    conn: &'c Connection,
}

impl<'c> BudgetStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn all(&self) -> Result<Vec<Budget>> {
        self.select(
            "SELECT id, category_id, name, limit_amount, spent, period, start_date, end_date
             FROM budgets ORDER BY id",
            [],
        )
    }

    pub fn get(&self, id: &str) -> Result<Option<Budget>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, category_id, name, limit_amount, spent, period, start_date, end_date
                 FROM budgets WHERE id=?1",
                params![id],
                map_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn by_category(&self, category_id: &str) -> Result<Vec<Budget>> {
        self.select(
            "SELECT id, category_id, name, limit_amount, spent, period, start_date, end_date
             FROM budgets WHERE category_id=?1 ORDER BY id",
            params![category_id],
        )
    }

    pub fn add(&self, draft: &BudgetDraft) -> Result<String> {
        let id = ident::generate();
        self.conn.execute(
            "INSERT INTO budgets(id, category_id, name, limit_amount, spent, period, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id,
                draft.category_id,
                draft.name,
                draft.limit.to_string(),
                draft.spent.to_string(),
                draft.period.as_str(),
                fmt_ts(&draft.start_date),
                fmt_ts(&draft.end_date)
            ],
        )?;
        Ok(id)
    }

    pub fn put(&self, budget: &Budget) -> Result<()> {
        self.conn.execute(
            "INSERT INTO budgets(id, category_id, name, limit_amount, spent, period, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                budget.id,
                budget.category_id,
                budget.name,
                budget.limit.to_string(),
                budget.spent.to_string(),
                budget.period.as_str(),
                fmt_ts(&budget.start_date),
                fmt_ts(&budget.end_date)
            ],
        )?;
        Ok(())
    }

    pub fn update(&self, id: &str, patch: &BudgetPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut sets: Vec<&str> = Vec::new();
        let mut params_vec: Vec<String> = Vec::new();
        if let Some(category_id) = &patch.category_id {
            sets.push("category_id=?");
            params_vec.push(category_id.clone());
        }
        if let Some(name) = &patch.name {
            sets.push("name=?");
            params_vec.push(name.clone());
        }
        if let Some(limit) = patch.limit {
            sets.push("limit_amount=?");
            params_vec.push(limit.to_string());
        }
        if let Some(spent) = patch.spent {
            sets.push("spent=?");
            params_vec.push(spent.to_string());
        }
        if let Some(period) = patch.period {
            sets.push("period=?");
            params_vec.push(period.as_str().to_string());
        }
        if let Some(start_date) = patch.start_date {
            sets.push("start_date=?");
            params_vec.push(fmt_ts(&start_date));
        }
        if let Some(end_date) = patch.end_date {
            sets.push("end_date=?");
            params_vec.push(fmt_ts(&end_date));
        }
        let sql = format!("UPDATE budgets SET {} WHERE id=?", sets.join(", "));
        params_vec.push(id.to_string());
        let n = self
            .conn
            .execute(&sql, rusqlite::params_from_iter(params_vec.iter()))?;
        if n == 0 {
            debug!("Budget update for id '{}' matched no row", id);
        }
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM budgets WHERE id=?1", params![id])?;
        if n == 0 {
            debug!("Budget delete for id '{}' matched no row", id);
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM budgets", [])?;
        Ok(())
    }

    /// Adds `amount` to the running `spent` of every budget watching
    /// `category_id`. This is the only place that moves `spent` with a
    /// transaction; edits and deletes of transactions leave it alone,
    /// so the total can drift from history (`doctor` reports this).
    pub fn apply_expense(&self, category_id: &str, amount: Decimal) -> Result<()> {
        for budget in self.by_category(category_id)? {
            self.conn.execute(
                "UPDATE budgets SET spent=?1 WHERE id=?2",
                params![(budget.spent + amount).to_string(), budget.id],
            )?;
        }
        Ok(())
    }

    fn select(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn map_row(row: &Row) -> rusqlite::Result<Budget> {
    let limit: String = row.get(3)?;
    let spent: String = row.get(4)?;
    let period: String = row.get(5)?;
    let start_date: String = row.get(6)?;
    let end_date: String = row.get(7)?;
    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        name: row.get(2)?,
        limit: limit.parse().map_err(|e| conv_err(3, e))?,
        spent: spent.parse().map_err(|e| conv_err(4, e))?,
        period: period.parse().map_err(|e| conv_err(5, e))?,
        start_date: parse_ts(&start_date).map_err(|e| conv_err(6, e))?,
        end_date: parse_ts(&end_date).map_err(|e| conv_err(7, e))?,
    })
}
