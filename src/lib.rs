// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod series;
pub mod utils;

pub use analytics::{AnalyticsSnapshot, DailyTotals, DateRange, aggregate};
pub use error::ReportError;
pub use models::{EntryKind, LedgerRecord, PaymentMethod};
