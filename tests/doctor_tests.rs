// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::commands::doctor;
use billfold::models::{BudgetPatch, Kind, TransactionDraft};
use billfold::service::{DataAccess, Ledger};
use chrono::Utc;
use rust_decimal::Decimal;

fn seeded() -> Ledger {
    Ledger::open_in_memory().unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn expense(amount: &str, category: &str) -> TransactionDraft {
    TransactionDraft {
        amount: dec(amount),
        category: category.into(),
        description: String::new(),
        date: Utc::now(),
        kind: Kind::Expense,
    }
}

fn issue_codes(rows: &[Vec<String>]) -> Vec<&str> {
    rows.iter().map(|r| r[0].as_str()).collect()
}

#[test]
fn fresh_seed_is_clean() {
    let mut ledger = seeded();
    let rows = doctor::collect_issues(&mut ledger).unwrap();
    assert!(rows.is_empty(), "unexpected issues: {:?}", rows);
}

#[test]
fn doctor_handle_runs() {
    let mut ledger = seeded();
    doctor::handle(&mut ledger).unwrap();
}

#[test]
fn deleting_an_expense_leaves_visible_drift() {
    let mut ledger = seeded();
    let id = ledger.add_transaction(&expense("-60", "1")).unwrap();
    assert!(doctor::collect_issues(&mut ledger).unwrap().is_empty());

    ledger.delete_transaction(&id).unwrap();

    let rows = doctor::collect_issues(&mut ledger).unwrap();
    assert!(issue_codes(&rows).contains(&"budget_drift"));
    assert!(rows
        .iter()
        .any(|r| r[0] == "budget_drift" && r[1].contains("Dining budget")));
}

#[test]
fn manual_spent_override_is_flagged() {
    let mut ledger = seeded();
    let patch = BudgetPatch {
        spent: Some(dec("999999")),
        ..Default::default()
    };
    ledger.update_budget("4", &patch).unwrap();

    let rows = doctor::collect_issues(&mut ledger).unwrap();
    assert!(issue_codes(&rows).contains(&"budget_drift"));
}

#[test]
fn dangling_category_references_are_reported() {
    let mut ledger = seeded();
    ledger.add_transaction(&expense("-5", "nope")).unwrap();
    ledger.delete_category("4").unwrap();

    let rows = doctor::collect_issues(&mut ledger).unwrap();
    let codes = issue_codes(&rows);
    assert!(codes.contains(&"txn_unknown_category"));
    assert!(codes.contains(&"budget_unknown_category"));
}
