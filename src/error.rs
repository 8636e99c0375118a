// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillfoldError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No writable data directory on this platform")]
    NoDataDir,

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown transaction kind: {0}")]
    UnknownKind(String),

    #[error("Unknown budget period: {0}")]
    UnknownPeriod(String),
}

pub type Result<T> = std::result::Result<T, BillfoldError>;
