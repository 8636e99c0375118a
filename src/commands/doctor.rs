// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, Kind};
use crate::service::{DataAccess, Ledger};
use crate::utils::{fmt_amount, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

pub fn handle(ledger: &mut Ledger) -> Result<()> {
    let rows = collect_issues(ledger)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn collect_issues(ledger: &mut Ledger) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    let known: HashSet<String> = ledger.categories()?.into_iter().map(|c| c.id).collect();

    // 1) Budget counters that drifted from history. `spent` only ever
    //    grows on expense inserts; edits and deletes leave it alone, so
    //    the counter goes stale until someone overwrites it.
    for budget in ledger.budgets()? {
        let recomputed = recompute_spent(ledger, &budget)?;
        if budget.spent != recomputed {
            rows.push(vec![
                "budget_drift".into(),
                format!(
                    "'{}' tracks {} but the window sums to {}",
                    budget.name,
                    fmt_amount(&budget.spent),
                    fmt_amount(&recomputed)
                ),
            ]);
        }
        if !known.contains(&budget.category_id) {
            rows.push(vec![
                "budget_unknown_category".into(),
                format!("{} -> {}", budget.id, budget.category_id),
            ]);
        }
    }

    // 2) Transactions pointing at a category that no longer exists.
    for t in ledger.transactions()? {
        if !known.contains(&t.category) {
            rows.push(vec![
                "txn_unknown_category".into(),
                format!("{} -> {}", t.id, t.category),
            ]);
        }
    }

    Ok(rows)
}

fn recompute_spent(ledger: &mut Ledger, budget: &Budget) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for t in ledger.transactions_in_range(budget.start_date, budget.end_date)? {
        if t.kind == Kind::Expense && t.category == budget.category_id {
            total += t.amount.abs();
        }
    }
    Ok(total)
}
