// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised by the analytics and report engine.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: i64, reason: String },

    #[error("Totals overflow at record {id}")]
    Overflow { id: i64 },

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub fn malformed(id: i64, reason: impl Into<String>) -> Self {
        ReportError::MalformedRecord {
            id,
            reason: reason.into(),
        }
    }
}
