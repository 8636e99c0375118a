// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{BillfoldError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

/// Timestamps are stored as TEXT in this exact shape so that string
/// comparison in SQL agrees with chronological order.
pub const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.format(TS_FORMAT).to_string()
}

pub fn parse_ts(s: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, TS_FORMAT)
        .map_err(|_| BillfoldError::InvalidTimestamp(s.to_string()))?;
    Ok(naive.and_utc())
}

/// Accepts a full timestamp or a bare `YYYY-MM-DD` date. Bare dates
/// expand to midnight, or to the last second of the day when used as
/// a range end.
pub fn parse_arg_ts(s: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    if let Ok(ts) = parse_ts(s) {
        return Ok(ts);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| BillfoldError::InvalidTimestamp(s.to_string()))?;
    let (h, m, sec) = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
    let dt = date
        .and_hms_opt(h, m, sec)
        .ok_or_else(|| BillfoldError::InvalidTimestamp(s.to_string()))?;
    Ok(dt.and_utc())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| BillfoldError::InvalidAmount(s.to_string()))
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{}", d.round_dp(2))
}

/// First and last second of the month containing `now`.
pub fn month_bounds(now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let (y, m) = (now.year(), now.month());
    let last_day = match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(y, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    };
    let start = NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| BillfoldError::InvalidTimestamp(format!("{:04}-{:02}", y, m)))?;
    let end = NaiveDate::from_ymd_opt(y, m, last_day)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .ok_or_else(|| BillfoldError::InvalidTimestamp(format!("{:04}-{:02}", y, m)))?;
    Ok((start.and_utc(), end.and_utc()))
}

/// Trailing seven days ending at `now`.
pub fn week_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now - Duration::days(7), now)
}

/// First and last second of the calendar year containing `now`.
pub fn year_bounds(now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let y = now.year();
    let start = NaiveDate::from_ymd_opt(y, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| BillfoldError::InvalidTimestamp(format!("{:04}-01-01", y)))?;
    let end = NaiveDate::from_ymd_opt(y, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .ok_or_else(|| BillfoldError::InvalidTimestamp(format!("{:04}-12-31", y)))?;
    Ok((start.and_utc(), end.and_utc()))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
