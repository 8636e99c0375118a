// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::conv_err;
use crate::error::Result;
use crate::ident;
use crate::models::{Category, CategoryDraft, CategoryPatch, Kind};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

pub struct CategoryStore<'c> {
    conn: &'c Connection,
}

impl<'c> CategoryStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn all(&self) -> Result<Vec<Category>> {
        self.select(
            "SELECT id, name, icon, color, kind FROM categories ORDER BY id",
            [],
        )
    }

    pub fn get(&self, id: &str) -> Result<Option<Category>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, icon, color, kind FROM categories WHERE id=?1",
                params![id],
                map_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn by_kind(&self, kind: Kind) -> Result<Vec<Category>> {
        self.select(
            "SELECT id, name, icon, color, kind FROM categories WHERE kind=?1 ORDER BY id",
            params![kind.as_str()],
        )
    }

    /// Gate for first-run seeding.
    pub fn count(&self) -> Result<i64> {
        let n = self
            .conn
            .query_row("SELECT count(*) FROM categories", [], |r| r.get(0))?;
        Ok(n)
    }

    pub fn add(&self, draft: &CategoryDraft) -> Result<String> {
        let id = ident::generate();
        self.conn.execute(
            "INSERT INTO categories(id, name, icon, color, kind) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, draft.name, draft.icon, draft.color, draft.kind.as_str()],
        )?;
        Ok(id)
    }

    pub fn put(&self, category: &Category) -> Result<()> {
        self.conn.execute(
            "INSERT INTO categories(id, name, icon, color, kind) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                category.id,
                category.name,
                category.icon,
                category.color,
                category.kind.as_str()
            ],
        )?;
        Ok(())
    }

    pub fn update(&self, id: &str, patch: &CategoryPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut sets: Vec<&str> = Vec::new();
        let mut params_vec: Vec<String> = Vec::new();
        if let Some(name) = &patch.name {
            sets.push("name=?");
            params_vec.push(name.clone());
        }
        if let Some(icon) = &patch.icon {
            sets.push("icon=?");
            params_vec.push(icon.clone());
        }
        if let Some(color) = &patch.color {
            sets.push("color=?");
            params_vec.push(color.clone());
        }
        if let Some(kind) = patch.kind {
            sets.push("kind=?");
            params_vec.push(kind.as_str().to_string());
        }
        let sql = format!("UPDATE categories SET {} WHERE id=?", sets.join(", "));
        params_vec.push(id.to_string());
        let n = self
            .conn
            .execute(&sql, rusqlite::params_from_iter(params_vec.iter()))?;
        if n == 0 {
            debug!("Category update for id '{}' matched no row", id);
        }
        Ok(())
    }

    /// Deleting never cascades; transactions and budgets keep their
    /// now-dangling reference.
    pub fn delete(&self, id: &str) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM categories WHERE id=?1", params![id])?;
        if n == 0 {
            debug!("Category delete for id '{}' matched no row", id);
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM categories", [])?;
        Ok(())
    }

    fn select(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn map_row(row: &Row) -> rusqlite::Result<Category> {
    let kind: String = row.get(4)?;
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
        kind: kind.parse().map_err(|e| conv_err(4, e))?,
    })
}
