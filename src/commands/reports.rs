// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::Snapshot;
use crate::models::Kind;
use crate::service::{DataAccess, Ledger};
use crate::utils::{fmt_amount, maybe_print_json, month_bounds, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(ledger, sub)?,
        Some(("weekly", sub)) => weekly(ledger, sub)?,
        Some(("summary", sub)) => summary(ledger, sub)?,
        Some(("by-category", sub)) => by_category(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn snapshot_for(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<Snapshot> {
    if sub.get_flag("refresh") {
        Ok(ledger.refresh_analytics()?)
    } else {
        Ok(ledger.analytics()?)
    }
}

fn monthly(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snapshot = snapshot_for(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &snapshot.monthly)? {
        let rows: Vec<Vec<String>> = snapshot
            .monthly
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    fmt_amount(&p.income),
                    fmt_amount(&p.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}

fn weekly(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snapshot = snapshot_for(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &snapshot.weekly)? {
        let rows: Vec<Vec<String>> = snapshot
            .weekly
            .iter()
            .map(|p| vec![p.day.clone(), fmt_amount(&p.amount)])
            .collect();
        println!("{}", pretty_table(&["Day", "Spent"], rows));
    }
    Ok(())
}

fn summary(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let snapshot = snapshot_for(ledger, sub)?;
    if !maybe_print_json(json_flag, false, &snapshot.summary)? {
        let s = &snapshot.summary;
        let rows = vec![vec![
            fmt_amount(&s.total_income),
            fmt_amount(&s.total_expense),
            fmt_amount(&s.balance),
        ]];
        println!("{}", pretty_table(&["Income", "Expense", "Balance"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct CategorySpendRow {
    category: String,
    spent: String,
}

/// Current-month expense total per category, straight from the stores
/// rather than the snapshot cache, so it never lags behind a write.
fn by_category(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (start, end) = month_bounds(Utc::now())?;
    let transactions = ledger.transactions_in_range(start, end)?;
    let names: HashMap<String, String> = ledger
        .categories()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut agg: HashMap<String, Decimal> = HashMap::new();
    for t in &transactions {
        if t.kind == Kind::Expense {
            *agg.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount.abs();
        }
    }
    let mut items: Vec<_> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));

    let data: Vec<CategorySpendRow> = items
        .into_iter()
        .map(|(id, spent)| CategorySpendRow {
            category: names.get(&id).cloned().unwrap_or(id),
            spent: fmt_amount(&spent),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.category.clone(), r.spent.clone()])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}
