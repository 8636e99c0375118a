// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use billfold::service::{DataAccess, Ledger};
use billfold::{cli, commands, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut ledger = Ledger::open()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let categories = ledger.categories()?;
            println!(
                "Database ready at {} ({} categories)",
                db::db_path()?.display(),
                categories.len()
            );
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut ledger, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut ledger, sub)?,
        Some(("reset", sub)) => {
            if sub.get_flag("yes") {
                ledger.clear_all_data()?;
                println!("All data removed; the next command starts from the seed set");
            } else {
                println!("Refusing to wipe without --yes");
            }
        }
        Some(("doctor", _)) => commands::doctor::handle(&mut ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
