// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::Kind;
use crate::store::TransactionStore;
use crate::utils::{month_bounds, week_bounds};
use chrono::{DateTime, Datelike, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

const MONTHLY_WINDOW: usize = 6;
const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPoint {
    pub day: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub monthly: Vec<MonthlyPoint>,
    pub weekly: Vec<WeeklyPoint>,
    pub summary: MonthSummary,
}

struct CachedSnapshot {
    snapshot: Snapshot,
    taken_at: Instant,
}

/// All three derivations behind a single cache slot. Writes elsewhere
/// never invalidate the slot; a reader either accepts up to `ttl` of
/// staleness or calls `refresh`.
pub struct Analytics {
    ttl: Duration,
    slot: Option<CachedSnapshot>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    /// Cached read: recomputes only when the slot is empty or has
    /// outlived the TTL.
    pub fn snapshot(&mut self, conn: &Connection) -> Result<Snapshot> {
        if let Some(cached) = &self.slot {
            if cached.taken_at.elapsed() < self.ttl {
                debug!("Serving analytics snapshot from cache");
                return Ok(cached.snapshot.clone());
            }
        }
        self.refresh(conn)
    }

    /// Unconditional recompute. When recomputation fails and an older
    /// snapshot exists, the stale one is served; with nothing cached
    /// the error propagates.
    pub fn refresh(&mut self, conn: &Connection) -> Result<Snapshot> {
        match compute(conn) {
            Ok(snapshot) => {
                self.slot = Some(CachedSnapshot {
                    snapshot: snapshot.clone(),
                    taken_at: Instant::now(),
                });
                Ok(snapshot)
            }
            Err(err) => match &self.slot {
                Some(cached) => {
                    warn!("Analytics recompute failed, serving stale snapshot: {}", err);
                    Ok(cached.snapshot.clone())
                }
                None => Err(err),
            },
        }
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}

fn compute(conn: &Connection) -> Result<Snapshot> {
    let now = Utc::now();
    let transactions = TransactionStore::new(conn);
    Ok(Snapshot {
        monthly: monthly_series(&transactions)?,
        weekly: weekly_series(&transactions, now)?,
        summary: month_summary(&transactions, now)?,
    })
}

/// Income and absolute expense per calendar month over the whole
/// history, last six buckets. Buckets are ordered by (year, month);
/// the `MM/yyyy` label is display only, so a series spanning a year
/// boundary stays in true time order.
fn monthly_series(transactions: &TransactionStore) -> Result<Vec<MonthlyPoint>> {
    let mut buckets: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions.all()? {
        let entry = buckets
            .entry((tx.date.year(), tx.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            Kind::Income => entry.0 += tx.amount,
            Kind::Expense => entry.1 += tx.amount.abs(),
        }
    }
    let mut series: Vec<MonthlyPoint> = buckets
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyPoint {
            month: format!("{:02}/{}", month, year),
            income,
            expense,
        })
        .collect();
    if series.len() > MONTHLY_WINDOW {
        series.drain(..series.len() - MONTHLY_WINDOW);
    }
    Ok(series)
}

/// Expense totals of the trailing seven days in seven fixed Mon..Sun
/// buckets. Income never contributes, and every bucket is present even
/// when zero.
fn weekly_series(
    transactions: &TransactionStore,
    now: DateTime<Utc>,
) -> Result<Vec<WeeklyPoint>> {
    let (start, end) = week_bounds(now);
    let mut buckets = [Decimal::ZERO; 7];
    for tx in transactions.in_range(start, end)? {
        if tx.kind == Kind::Expense {
            let day = tx.date.weekday().num_days_from_monday() as usize;
            buckets[day] += tx.amount.abs();
        }
    }
    Ok(WEEKDAY_LABELS
        .iter()
        .zip(buckets)
        .map(|(day, amount)| WeeklyPoint {
            day: (*day).to_string(),
            amount,
        })
        .collect())
}

fn month_summary(transactions: &TransactionStore, now: DateTime<Utc>) -> Result<MonthSummary> {
    let (start, end) = month_bounds(now)?;
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for tx in transactions.in_range(start, end)? {
        match tx.kind {
            Kind::Income => total_income += tx.amount,
            Kind::Expense => total_expense += tx.amount.abs(),
        }
    }
    Ok(MonthSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    })
}
