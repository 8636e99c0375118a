// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::BillfoldError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl FromStr for Kind {
    type Err = BillfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(BillfoldError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }
}

impl FromStr for Period {
    type Err = BillfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            other => Err(BillfoldError::UnknownPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Negative amounts are expenses, positive amounts income; `kind` is
/// stored alongside rather than derived so imported rows keep whatever
/// the source said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub period: Period,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Insert payloads: everything but the id, which the store generates.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub kind: Kind,
}

#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: Kind,
}

#[derive(Debug, Clone)]
pub struct BudgetDraft {
    pub category_id: String,
    pub name: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub period: Period,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Partial updates: a `None` field is left untouched. There is no way
/// to clear a field to empty other than setting it to an empty value
/// explicitly.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub kind: Option<Kind>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.kind.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub kind: Option<Kind>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.icon.is_none() && self.color.is_none() && self.kind.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub limit: Option<Decimal>,
    pub spent: Option<Decimal>,
    pub period: Option<Period>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.name.is_none()
            && self.limit.is_none()
            && self.spent.is_none()
            && self.period.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Bundle format for export and import. All three sections are
/// optional on the way in; export always fills them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Vec<Budget>>,
}
