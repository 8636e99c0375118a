// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Backup, Kind, TransactionDraft};
use crate::service::{DataAccess, Ledger};
use crate::utils::{parse_arg_ts, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("bundle", sub)) => import_bundle(ledger, sub),
        Some(("transactions", sub)) => import_transactions(ledger, sub),
        _ => Ok(()),
    }
}

/// Destructive restore: whatever is in the database is replaced by the
/// bundle, missing sections and all.
fn import_bundle(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Open bundle {}", path))?;
    let backup: Backup =
        serde_json::from_str(&raw).with_context(|| format!("Invalid bundle '{}'", path))?;
    ledger.import_data(&backup)?;
    println!("Imported bundle from {}", path);
    Ok(())
}

/// Additive CSV import. Rows go through the regular insert path, so
/// expense rows bump the matching budget counters like any other add.
fn import_transactions(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut count = 0usize;
    for result in rdr.records() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim().to_string();
        let amount_raw = rec.get(1).context("amount missing")?.trim().to_string();
        let category = rec.get(2).context("category missing")?.trim().to_string();
        let description = rec.get(3).unwrap_or("").trim().to_string();
        let kind_raw = rec.get(4).unwrap_or("").trim();

        let date = parse_arg_ts(&date_raw, false)
            .with_context(|| format!("Invalid transaction date '{}'", date_raw))?;
        let amount = parse_decimal(&amount_raw)
            .with_context(|| format!("Invalid amount '{}' for {}", amount_raw, category))?;
        let kind = if kind_raw.is_empty() {
            if amount.is_sign_negative() {
                Kind::Expense
            } else {
                Kind::Income
            }
        } else {
            kind_raw.parse::<Kind>()?
        };

        ledger.add_transaction(&TransactionDraft {
            amount,
            category,
            description,
            date,
            kind,
        })?;
        count += 1;
    }
    println!("Imported {} transactions from {}", count, path);
    Ok(())
}
