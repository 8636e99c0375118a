// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategoryDraft, CategoryPatch, Kind};
use crate::service::{DataAccess, Ledger};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().to_string();
            let kind = sub.get_one::<String>("kind").unwrap().parse::<Kind>()?;
            let icon = sub
                .get_one::<String>("icon")
                .map(|s| s.to_string())
                .unwrap_or_default();
            let color = sub
                .get_one::<String>("color")
                .map(|s| s.to_string())
                .unwrap_or_default();
            let id = ledger.add_category(&CategoryDraft {
                name: name.clone(),
                icon,
                color,
                kind,
            })?;
            println!("Added category '{}' ({})", name, id);
        }
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete_category(id)?;
            println!("Removed category '{}'", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = match sub.get_one::<String>("kind") {
        Some(raw) => ledger.categories_by_kind(raw.parse::<Kind>()?)?,
        None => ledger.categories()?,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    c.name.clone(),
                    c.icon.clone(),
                    c.color.clone(),
                    c.kind.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Icon", "Color", "Kind"], rows)
        );
    }
    Ok(())
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut patch = CategoryPatch::default();
    if let Some(name) = sub.get_one::<String>("name") {
        patch.name = Some(name.to_string());
    }
    if let Some(icon) = sub.get_one::<String>("icon") {
        patch.icon = Some(icon.to_string());
    }
    if let Some(color) = sub.get_one::<String>("color") {
        patch.color = Some(color.to_string());
    }
    if let Some(raw) = sub.get_one::<String>("kind") {
        patch.kind = Some(raw.parse::<Kind>()?);
    }
    if patch.is_empty() {
        println!("Nothing to change for '{}'", id);
        return Ok(());
    }
    ledger.update_category(id, &patch)?;
    println!("Updated category '{}'", id);
    Ok(())
}
