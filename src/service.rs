// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{Analytics, Snapshot};
use crate::db;
use crate::error::Result;
use crate::models::{
    Backup, Budget, BudgetDraft, BudgetPatch, Category, CategoryDraft, CategoryPatch, Kind,
    Transaction, TransactionDraft, TransactionPatch,
};
use crate::seed;
use crate::store::{BudgetStore, CategoryStore, TransactionStore};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    Seeding,
    Ready,
}

/// The one interface everything above the storage layer talks to.
/// Methods take `&mut self` because any call may trigger first-run
/// seeding.
pub trait DataAccess {
    fn transactions(&mut self) -> Result<Vec<Transaction>>;
    fn transaction(&mut self, id: &str) -> Result<Option<Transaction>>;
    fn transactions_by_kind(&mut self, kind: Kind) -> Result<Vec<Transaction>>;
    fn transactions_by_category(&mut self, category_id: &str) -> Result<Vec<Transaction>>;
    fn transactions_in_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>>;
    fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<String>;
    fn update_transaction(&mut self, id: &str, patch: &TransactionPatch) -> Result<()>;
    fn delete_transaction(&mut self, id: &str) -> Result<()>;

    fn categories(&mut self) -> Result<Vec<Category>>;
    fn category(&mut self, id: &str) -> Result<Option<Category>>;
    fn categories_by_kind(&mut self, kind: Kind) -> Result<Vec<Category>>;
    fn add_category(&mut self, draft: &CategoryDraft) -> Result<String>;
    fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> Result<()>;
    fn delete_category(&mut self, id: &str) -> Result<()>;

    fn budgets(&mut self) -> Result<Vec<Budget>>;
    fn budget(&mut self, id: &str) -> Result<Option<Budget>>;
    fn budgets_by_category(&mut self, category_id: &str) -> Result<Vec<Budget>>;
    fn add_budget(&mut self, draft: &BudgetDraft) -> Result<String>;
    fn update_budget(&mut self, id: &str, patch: &BudgetPatch) -> Result<()>;
    fn delete_budget(&mut self, id: &str) -> Result<()>;

    fn export_data(&mut self) -> Result<Backup>;
    fn import_data(&mut self, backup: &Backup) -> Result<()>;
    fn clear_all_data(&mut self) -> Result<()>;
}

pub struct Ledger {
    conn: Connection,
    state: InitState,
    analytics: Analytics,
}

impl Ledger {
    pub fn open() -> Result<Self> {
        Ok(Self::new(db::open_or_init()?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(db::open_in_memory()?))
    }

    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            state: InitState::Uninitialized,
            analytics: Analytics::new(),
        }
    }

    pub fn with_analytics_ttl(mut self, ttl: Duration) -> Self {
        self.analytics = Analytics::with_ttl(ttl);
        self
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    /// Raw handle for maintenance paths and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Lazy first-run seeding. A failure is logged and swallowed: the
    /// stores stay empty and reads simply see zero rows. Calls made
    /// while seeding is already underway do not re-trigger it.
    fn ensure_ready(&mut self) -> Result<()> {
        if self.state != InitState::Uninitialized {
            return Ok(());
        }
        self.state = InitState::Seeding;
        if let Err(err) = seed::ensure_seeded(&mut self.conn) {
            warn!("Seeding failed, continuing with empty stores: {}", err);
        }
        self.state = InitState::Ready;
        Ok(())
    }

    /// Cached analytics read (30 s TTL unless overridden).
    pub fn analytics(&mut self) -> Result<Snapshot> {
        self.ensure_ready()?;
        self.analytics.snapshot(&self.conn)
    }

    /// Forced recompute, bypassing the cache.
    pub fn refresh_analytics(&mut self) -> Result<Snapshot> {
        self.ensure_ready()?;
        self.analytics.refresh(&self.conn)
    }

    fn wipe_tables(&self) -> Result<()> {
        TransactionStore::new(&self.conn).clear()?;
        CategoryStore::new(&self.conn).clear()?;
        BudgetStore::new(&self.conn).clear()?;
        Ok(())
    }
}

impl DataAccess for Ledger {
    fn transactions(&mut self) -> Result<Vec<Transaction>> {
        self.ensure_ready()?;
        TransactionStore::new(&self.conn).all()
    }

    fn transaction(&mut self, id: &str) -> Result<Option<Transaction>> {
        self.ensure_ready()?;
        TransactionStore::new(&self.conn).get(id)
    }

    fn transactions_by_kind(&mut self, kind: Kind) -> Result<Vec<Transaction>> {
        self.ensure_ready()?;
        TransactionStore::new(&self.conn).by_kind(kind)
    }

    fn transactions_by_category(&mut self, category_id: &str) -> Result<Vec<Transaction>> {
        self.ensure_ready()?;
        TransactionStore::new(&self.conn).by_category(category_id)
    }

    fn transactions_in_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        self.ensure_ready()?;
        TransactionStore::new(&self.conn).in_range(start, end)
    }

    fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<String> {
        self.ensure_ready()?;
        let id = TransactionStore::new(&self.conn).add(draft)?;
        if draft.kind == Kind::Expense {
            // Second, independent statement: if it fails, the row just
            // inserted stays and the budget is under-counted.
            BudgetStore::new(&self.conn).apply_expense(&draft.category, draft.amount.abs())?;
        }
        Ok(id)
    }

    fn update_transaction(&mut self, id: &str, patch: &TransactionPatch) -> Result<()> {
        self.ensure_ready()?;
        TransactionStore::new(&self.conn).update(id, patch)
    }

    fn delete_transaction(&mut self, id: &str) -> Result<()> {
        self.ensure_ready()?;
        TransactionStore::new(&self.conn).delete(id)
    }

    fn categories(&mut self) -> Result<Vec<Category>> {
        self.ensure_ready()?;
        CategoryStore::new(&self.conn).all()
    }

    fn category(&mut self, id: &str) -> Result<Option<Category>> {
        self.ensure_ready()?;
        CategoryStore::new(&self.conn).get(id)
    }

    fn categories_by_kind(&mut self, kind: Kind) -> Result<Vec<Category>> {
        self.ensure_ready()?;
        CategoryStore::new(&self.conn).by_kind(kind)
    }

    fn add_category(&mut self, draft: &CategoryDraft) -> Result<String> {
        self.ensure_ready()?;
        CategoryStore::new(&self.conn).add(draft)
    }

    fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> Result<()> {
        self.ensure_ready()?;
        CategoryStore::new(&self.conn).update(id, patch)
    }

    fn delete_category(&mut self, id: &str) -> Result<()> {
        self.ensure_ready()?;
        CategoryStore::new(&self.conn).delete(id)
    }

    fn budgets(&mut self) -> Result<Vec<Budget>> {
        self.ensure_ready()?;
        BudgetStore::new(&self.conn).all()
    }

    fn budget(&mut self, id: &str) -> Result<Option<Budget>> {
        self.ensure_ready()?;
        BudgetStore::new(&self.conn).get(id)
    }

    fn budgets_by_category(&mut self, category_id: &str) -> Result<Vec<Budget>> {
        self.ensure_ready()?;
        BudgetStore::new(&self.conn).by_category(category_id)
    }

    fn add_budget(&mut self, draft: &BudgetDraft) -> Result<String> {
        self.ensure_ready()?;
        BudgetStore::new(&self.conn).add(draft)
    }

    fn update_budget(&mut self, id: &str, patch: &BudgetPatch) -> Result<()> {
        self.ensure_ready()?;
        BudgetStore::new(&self.conn).update(id, patch)
    }

    fn delete_budget(&mut self, id: &str) -> Result<()> {
        self.ensure_ready()?;
        BudgetStore::new(&self.conn).delete(id)
    }

    fn export_data(&mut self) -> Result<Backup> {
        self.ensure_ready()?;
        Ok(Backup {
            transactions: Some(TransactionStore::new(&self.conn).all()?),
            categories: Some(CategoryStore::new(&self.conn).all()?),
            budgets: Some(BudgetStore::new(&self.conn).all()?),
        })
    }

    /// Destructive restore: wipes everything first, then inserts
    /// categories before the rows that reference them. No referential
    /// check is made. The seeder is skipped afterwards because data
    /// was just supplied.
    fn import_data(&mut self, backup: &Backup) -> Result<()> {
        self.wipe_tables()?;
        if let Some(categories) = &backup.categories {
            let store = CategoryStore::new(&self.conn);
            for category in categories {
                store.put(category)?;
            }
        }
        if let Some(transactions) = &backup.transactions {
            let store = TransactionStore::new(&self.conn);
            for tx in transactions {
                store.put(tx)?;
            }
        }
        if let Some(budgets) = &backup.budgets {
            let store = BudgetStore::new(&self.conn);
            for budget in budgets {
                store.put(budget)?;
            }
        }
        self.state = InitState::Ready;
        Ok(())
    }

    /// Wipe everything and force reseeding on next access.
    fn clear_all_data(&mut self) -> Result<()> {
        self.wipe_tables()?;
        self.state = InitState::Uninitialized;
        Ok(())
    }
}
