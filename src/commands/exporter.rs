// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::service::{DataAccess, Ledger};
use crate::utils::fmt_ts;
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("bundle", sub)) => export_bundle(ledger, sub),
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_bundle(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    let backup = ledger.export_data()?;
    std::fs::write(out, serde_json::to_string_pretty(&backup)?)?;
    println!("Exported bundle to {}", out);
    Ok(())
}

fn export_transactions(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let data = ledger.transactions()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "amount", "category", "description", "kind"])?;
            for t in &data {
                wtr.write_record([
                    fmt_ts(&t.date),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    t.kind.to_string(),
                ])?;
            }
            wtr.flush()?;
            println!("Exported transactions to {}", out);
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&data)?)?;
            println!("Exported transactions to {}", out);
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    Ok(())
}
