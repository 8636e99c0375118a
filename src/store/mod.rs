// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod transactions;

pub use budgets::BudgetStore;
pub use categories::CategoryStore;
pub use transactions::TransactionStore;

use rusqlite::types::Type;

/// Wraps a TEXT-column parse failure into the error a rusqlite row
/// mapper is allowed to return.
pub(crate) fn conv_err(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}
