// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Kind, Transaction, TransactionDraft, TransactionPatch};
use crate::service::{DataAccess, Ledger};
use crate::utils::{fmt_amount, fmt_ts, maybe_print_json, parse_arg_ts, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("show", sub)) => show(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let description = sub
        .get_one::<String>("desc")
        .map(|s| s.to_string())
        .unwrap_or_default();
    let date = match sub.get_one::<String>("date") {
        Some(raw) => {
            parse_arg_ts(raw, false).with_context(|| format!("Invalid transaction date '{}'", raw))?
        }
        None => Utc::now(),
    };
    let kind = match sub.get_one::<String>("kind") {
        Some(raw) => raw.parse::<Kind>()?,
        None if amount.is_sign_negative() => Kind::Expense,
        None => Kind::Income,
    };

    let id = ledger.add_transaction(&TransactionDraft {
        amount,
        category,
        description,
        date,
        kind,
    })?;
    println!("Recorded {} {} ({})", kind, fmt_amount(&amount), id);
    Ok(())
}

fn list(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let names = category_names(ledger)?;
        let rows: Vec<Vec<String>> = data.iter().map(|t| row_cells(t, &names)).collect();
        println!("{}", pretty_table(HEADERS, rows));
    }
    Ok(())
}

/// Resolves the list filters against the narrowest store read, then
/// trims the rest in memory.
pub fn query_rows(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let from = sub.get_one::<String>("from");
    let to = sub.get_one::<String>("to");
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<Kind>())
        .transpose()?;
    let category = sub.get_one::<String>("category");

    let mut data = if from.is_some() || to.is_some() {
        let start = match from {
            Some(raw) => {
                parse_arg_ts(raw, false).with_context(|| format!("Invalid start date '{}'", raw))?
            }
            None => DateTime::<Utc>::UNIX_EPOCH,
        };
        let end = match to {
            Some(raw) => {
                parse_arg_ts(raw, true).with_context(|| format!("Invalid end date '{}'", raw))?
            }
            None => Utc::now(),
        };
        ledger.transactions_in_range(start, end)?
    } else if let Some(k) = kind {
        ledger.transactions_by_kind(k)?
    } else if let Some(cat) = category {
        ledger.transactions_by_category(cat)?
    } else {
        ledger.transactions()?
    };

    if let Some(k) = kind {
        data.retain(|t| t.kind == k);
    }
    if let Some(cat) = category {
        data.retain(|t| &t.category == cat);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn show(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let json_flag = sub.get_flag("json");
    match ledger.transaction(id)? {
        Some(t) => {
            if !maybe_print_json(json_flag, false, &t)? {
                let names = category_names(ledger)?;
                println!("{}", pretty_table(HEADERS, vec![row_cells(&t, &names)]));
            }
        }
        None => println!("No transaction with id '{}'", id),
    }
    Ok(())
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut patch = TransactionPatch::default();
    if let Some(raw) = sub.get_one::<String>("amount") {
        patch.amount = Some(parse_decimal(raw)?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        patch.category = Some(cat.to_string());
    }
    if let Some(desc) = sub.get_one::<String>("desc") {
        patch.description = Some(desc.to_string());
    }
    if let Some(raw) = sub.get_one::<String>("date") {
        let date =
            parse_arg_ts(raw, false).with_context(|| format!("Invalid transaction date '{}'", raw))?;
        patch.date = Some(date);
    }
    if let Some(raw) = sub.get_one::<String>("kind") {
        patch.kind = Some(raw.parse::<Kind>()?);
    }
    if patch.is_empty() {
        println!("Nothing to change for '{}'", id);
        return Ok(());
    }
    ledger.update_transaction(id, &patch)?;
    println!("Updated transaction '{}'", id);
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    ledger.delete_transaction(id)?;
    println!("Removed transaction '{}'", id);
    Ok(())
}

const HEADERS: &[&str] = &["Id", "Date", "Kind", "Amount", "Category", "Description"];

fn row_cells(t: &Transaction, names: &HashMap<String, String>) -> Vec<String> {
    vec![
        t.id.clone(),
        fmt_ts(&t.date),
        t.kind.to_string(),
        fmt_amount(&t.amount),
        names
            .get(&t.category)
            .cloned()
            .unwrap_or_else(|| t.category.clone()),
        t.description.clone(),
    ]
}

fn category_names(ledger: &mut Ledger) -> Result<HashMap<String, String>> {
    Ok(ledger
        .categories()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}
