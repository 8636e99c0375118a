// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::{Budget, Category, Kind, Period, Transaction};
use crate::store::{BudgetStore, CategoryStore, TransactionStore};
use crate::utils::{month_bounds, parse_decimal};
use chrono::{Duration, Timelike, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::info;

// (id, name, icon, color, kind)
const DEFAULT_CATEGORIES: &[(&str, &str, &str, &str, Kind)] = &[
    ("1", "Dining", "🍽️", "#EF4444", Kind::Expense),
    ("2", "Transport", "🚗", "#F97316", Kind::Expense),
    ("3", "Shopping", "🛍️", "#8B5CF6", Kind::Expense),
    ("4", "Entertainment", "🎮", "#06B6D4", Kind::Expense),
    ("5", "Health", "🏥", "#EF4444", Kind::Expense),
    ("6", "Education", "📚", "#3B82F6", Kind::Expense),
    ("7", "Savings", "💰", "#10B981", Kind::Expense),
    ("8", "Salary", "💵", "#10B981", Kind::Income),
    ("9", "Bonus", "🎁", "#F59E0B", Kind::Income),
    ("10", "Investments", "📈", "#3B82F6", Kind::Income),
];

// (id, amount, category id, description, days ago, kind)
const DEFAULT_TRANSACTIONS: &[(&str, &str, &str, &str, i64, Kind)] = &[
    ("1", "4200", "8", "Monthly salary", 1, Kind::Income),
    ("2", "-38.50", "1", "Team lunch", 1, Kind::Expense),
    ("3", "-24", "2", "Fuel", 2, Kind::Expense),
    ("4", "-129.99", "3", "Winter jacket", 3, Kind::Expense),
    ("5", "-31", "4", "Cinema tickets", 4, Kind::Expense),
    ("6", "600", "9", "Project bonus", 5, Kind::Income),
    ("7", "-85", "5", "Health check-up", 7, Kind::Expense),
    ("8", "-199", "6", "Online course", 10, Kind::Expense),
    ("9", "-64.75", "1", "Weekend groceries", 14, Kind::Expense),
    ("10", "450", "10", "Stock dividend", 15, Kind::Income),
];

// (id, category id, name, monthly limit)
const DEFAULT_BUDGETS: &[(&str, &str, &str, &str)] = &[
    ("1", "1", "Dining budget", "450"),
    ("2", "2", "Transport budget", "220"),
    ("3", "3", "Shopping budget", "300"),
    ("4", "4", "Entertainment budget", "150"),
];

/// First-run population. Gated on the category count alone: once any
/// category exists this never runs again, even if the other two tables
/// are empty.
pub fn ensure_seeded(conn: &mut Connection) -> Result<()> {
    if CategoryStore::new(conn).count()? > 0 {
        return Ok(());
    }

    let now = Utc::now();
    // Second precision, matching what the store persists, so the
    // in-window comparison below agrees with later reads.
    let now = now.with_nanosecond(0).unwrap_or(now);
    let (month_start, month_end) = month_bounds(now)?;

    let tx = conn.transaction()?;
    {
        let categories = CategoryStore::new(&tx);
        for (id, name, icon, color, kind) in DEFAULT_CATEGORIES {
            categories.put(&Category {
                id: (*id).to_string(),
                name: (*name).to_string(),
                icon: (*icon).to_string(),
                color: (*color).to_string(),
                kind: *kind,
            })?;
        }

        let transactions = TransactionStore::new(&tx);
        let mut spent_by_category: HashMap<&str, Decimal> = HashMap::new();
        for (id, amount, category, description, days_ago, kind) in DEFAULT_TRANSACTIONS {
            let amount = parse_decimal(amount)?;
            let date = now - Duration::days(*days_ago);
            transactions.put(&Transaction {
                id: (*id).to_string(),
                amount,
                category: (*category).to_string(),
                description: (*description).to_string(),
                date,
                kind: *kind,
            })?;
            if *kind == Kind::Expense && date >= month_start && date <= month_end {
                *spent_by_category.entry(*category).or_insert(Decimal::ZERO) += amount.abs();
            }
        }

        // Seeded budgets start consistent: spent equals the fixture
        // expenses of the category that fall inside the window.
        let budgets = BudgetStore::new(&tx);
        for (id, category_id, name, limit) in DEFAULT_BUDGETS {
            let spent = spent_by_category
                .get(category_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            budgets.put(&Budget {
                id: (*id).to_string(),
                category_id: (*category_id).to_string(),
                name: (*name).to_string(),
                limit: parse_decimal(limit)?,
                spent,
                period: Period::Monthly,
                start_date: month_start,
                end_date: month_end,
            })?;
        }
    }
    tx.commit()?;

    info!(
        "Seeded starter data: {} categories, {} transactions, {} budgets",
        DEFAULT_CATEGORIES.len(),
        DEFAULT_TRANSACTIONS.len(),
        DEFAULT_BUDGETS.len()
    );
    Ok(())
}
