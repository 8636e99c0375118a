// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::cli;
use billfold::commands::{exporter, importer};
use billfold::models::{Backup, Category, Kind};
use billfold::service::{DataAccess, Ledger};
use chrono::Utc;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

fn seeded() -> Ledger {
    Ledger::open_in_memory().unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn export(ledger: &mut Ledger, argv: &[&str]) {
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", m)) = matches.subcommand() {
        exporter::handle(ledger, m).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

fn import(ledger: &mut Ledger, argv: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("import", m)) = matches.subcommand() {
        importer::handle(ledger, m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn bundle_roundtrip_through_the_cli() {
    let mut ledger = seeded();
    let original = ledger.export_data().unwrap();

    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap();
    export(&mut ledger, &["billfold", "export", "bundle", "--out", path]);

    ledger.clear_all_data().unwrap();
    import(&mut ledger, &["billfold", "import", "bundle", "--path", path]).unwrap();

    assert_eq!(ledger.export_data().unwrap(), original);
}

#[test]
fn partial_bundle_restores_only_named_sections() {
    let mut ledger = seeded();
    let bundle = Backup {
        categories: Some(vec![Category {
            id: "c1".into(),
            name: "Books".into(),
            icon: "📚".into(),
            color: "#3B82F6".into(),
            kind: Kind::Expense,
        }]),
        ..Default::default()
    };
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), serde_json::to_string(&bundle).unwrap()).unwrap();
    let path = file.path().to_str().unwrap();

    import(&mut ledger, &["billfold", "import", "bundle", "--path", path]).unwrap();

    let categories = ledger.categories().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Books");
    assert!(ledger.transactions().unwrap().is_empty());
    assert!(ledger.budgets().unwrap().is_empty());
}

#[test]
fn garbage_bundle_is_rejected() {
    let mut ledger = seeded();
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "not json at all").unwrap();
    let path = file.path().to_str().unwrap();

    let err = import(&mut ledger, &["billfold", "import", "bundle", "--path", path]).unwrap_err();
    assert!(err.to_string().contains("Invalid bundle"));
    // The failed parse never reached the destructive wipe.
    assert_eq!(ledger.categories().unwrap().len(), 10);
}

#[test]
fn csv_import_runs_through_budget_counters() {
    let mut ledger = seeded();
    let before = ledger.budget("1").unwrap().unwrap().spent;
    let count_before = ledger.transactions().unwrap().len();

    let today = Utc::now().format("%Y-%m-%d").to_string();
    let csv = format!(
        "date,amount,category,description,kind\n{},-42.50,1,Takeout,expense\n{},120,8,Gift,income\n",
        today, today
    );
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), csv).unwrap();
    let path = file.path().to_str().unwrap();

    import(
        &mut ledger,
        &["billfold", "import", "transactions", "--path", path],
    )
    .unwrap();

    assert_eq!(ledger.transactions().unwrap().len(), count_before + 2);
    assert_eq!(
        ledger.budget("1").unwrap().unwrap().spent,
        before + dec("42.50")
    );
}

#[test]
fn csv_kind_defaults_to_the_amount_sign() {
    let mut ledger = seeded();
    let today = Utc::now().format("%Y-%m-%d").to_string();
    let csv = format!("date,amount,category\n{},-5,2\n{},250,8\n", today, today);
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), csv).unwrap();
    let path = file.path().to_str().unwrap();

    import(
        &mut ledger,
        &["billfold", "import", "transactions", "--path", path],
    )
    .unwrap();

    let all = ledger.transactions().unwrap();
    assert_eq!(all.iter().find(|t| t.amount == dec("-5")).unwrap().kind, Kind::Expense);
    assert_eq!(all.iter().find(|t| t.amount == dec("250")).unwrap().kind, Kind::Income);
}

#[test]
fn csv_invalid_amount_is_reported() {
    let mut ledger = seeded();
    let csv = "date,amount,category\n2025-08-10,abc,9\n";
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), csv).unwrap();
    let path = file.path().to_str().unwrap();

    let err = import(
        &mut ledger,
        &["billfold", "import", "transactions", "--path", path],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid amount"));
}

#[test]
fn transactions_export_writes_csv_and_json() {
    let mut ledger = seeded();

    let csv_file = NamedTempFile::new().unwrap();
    let csv_path = csv_file.path().to_str().unwrap();
    export(
        &mut ledger,
        &[
            "billfold",
            "export",
            "transactions",
            "--format",
            "csv",
            "--out",
            csv_path,
        ],
    );
    let text = std::fs::read_to_string(csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,amount,category,description,kind"
    );
    assert_eq!(lines.count(), 10);

    let json_file = NamedTempFile::new().unwrap();
    let json_path = json_file.path().to_str().unwrap();
    export(
        &mut ledger,
        &[
            "billfold",
            "export",
            "transactions",
            "--format",
            "json",
            "--out",
            json_path,
        ],
    );
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 10);
}

#[test]
fn unknown_export_format_writes_nothing() {
    let mut ledger = seeded();
    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap();
    export(
        &mut ledger,
        &[
            "billfold",
            "export",
            "transactions",
            "--format",
            "xml",
            "--out",
            path,
        ],
    );
    assert_eq!(std::fs::read_to_string(path).unwrap(), "");
}
