// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod cli;
pub mod db;
pub mod error;
pub mod ident;
pub mod models;
pub mod seed;
pub mod service;
pub mod store;
pub mod utils;
pub mod commands;
