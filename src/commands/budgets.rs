// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, BudgetDraft, BudgetPatch, Period};
use crate::service::{DataAccess, Ledger};
use crate::utils::{
    fmt_amount, fmt_ts, maybe_print_json, month_bounds, parse_arg_ts, parse_decimal, pretty_table,
    week_bounds, year_bounds,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("status", sub)) => status(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete_budget(id)?;
            println!("Removed budget '{}'", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let category_id = sub.get_one::<String>("category").unwrap().to_string();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let period = match sub.get_one::<String>("period") {
        Some(raw) => raw.parse::<Period>()?,
        None => Period::Monthly,
    };
    let (default_start, default_end) = default_window(period, Utc::now())?;
    let start_date = match sub.get_one::<String>("from") {
        Some(raw) => {
            parse_arg_ts(raw, false).with_context(|| format!("Invalid start date '{}'", raw))?
        }
        None => default_start,
    };
    let end_date = match sub.get_one::<String>("to") {
        Some(raw) => {
            parse_arg_ts(raw, true).with_context(|| format!("Invalid end date '{}'", raw))?
        }
        None => default_end,
    };
    let name = match sub.get_one::<String>("name") {
        Some(n) => n.to_string(),
        None => {
            let category_name = ledger
                .category(&category_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| category_id.clone());
            format!("{} budget", category_name)
        }
    };

    let id = ledger.add_budget(&BudgetDraft {
        category_id,
        name: name.clone(),
        limit,
        spent: Decimal::ZERO,
        period,
        start_date,
        end_date,
    })?;
    println!("Added budget '{}' ({})", name, id);
    Ok(())
}

fn default_window(period: Period, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    Ok(match period {
        Period::Weekly => week_bounds(now),
        Period::Monthly => month_bounds(now)?,
        Period::Yearly => year_bounds(now)?,
    })
}

fn list(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = ledger.budgets()?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.id.clone(),
                    b.name.clone(),
                    b.category_id.clone(),
                    b.period.to_string(),
                    format!("{} .. {}", fmt_ts(&b.start_date), fmt_ts(&b.end_date)),
                    fmt_amount(&b.limit),
                    fmt_amount(&b.spent),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Category", "Period", "Window", "Limit", "Spent"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct StatusRow {
    id: String,
    name: String,
    period: String,
    limit: String,
    spent: String,
    remaining: String,
    used: String,
}

fn status(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<StatusRow> = ledger.budgets()?.iter().map(status_row).collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.name.clone(),
                    r.period.clone(),
                    r.limit.clone(),
                    r.spent.clone(),
                    r.remaining.clone(),
                    r.used.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Period", "Limit", "Spent", "Remaining", "Used"],
                rows,
            )
        );
    }
    Ok(())
}

fn status_row(b: &Budget) -> StatusRow {
    let used = if b.limit.is_zero() {
        "-".to_string()
    } else {
        format!("{}%", (b.spent / b.limit * Decimal::ONE_HUNDRED).round_dp(1))
    };
    StatusRow {
        id: b.id.clone(),
        name: b.name.clone(),
        period: b.period.to_string(),
        limit: fmt_amount(&b.limit),
        spent: fmt_amount(&b.spent),
        remaining: fmt_amount(&(b.limit - b.spent)),
        used,
    }
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut patch = BudgetPatch::default();
    if let Some(cat) = sub.get_one::<String>("category") {
        patch.category_id = Some(cat.to_string());
    }
    if let Some(name) = sub.get_one::<String>("name") {
        patch.name = Some(name.to_string());
    }
    if let Some(raw) = sub.get_one::<String>("limit") {
        patch.limit = Some(parse_decimal(raw)?);
    }
    if let Some(raw) = sub.get_one::<String>("spent") {
        patch.spent = Some(parse_decimal(raw)?);
    }
    if let Some(raw) = sub.get_one::<String>("period") {
        patch.period = Some(raw.parse::<Period>()?);
    }
    if let Some(raw) = sub.get_one::<String>("from") {
        let date =
            parse_arg_ts(raw, false).with_context(|| format!("Invalid start date '{}'", raw))?;
        patch.start_date = Some(date);
    }
    if let Some(raw) = sub.get_one::<String>("to") {
        let date =
            parse_arg_ts(raw, true).with_context(|| format!("Invalid end date '{}'", raw))?;
        patch.end_date = Some(date);
    }
    if patch.is_empty() {
        println!("Nothing to change for '{}'", id);
        return Ok(());
    }
    ledger.update_budget(id, &patch)?;
    println!("Updated budget '{}'", id);
    Ok(())
}
