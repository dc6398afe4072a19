// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ReportError;
use crate::models::LedgerRecord;
use crate::utils::{fmt_money, fmt_plain};

pub const TABLE_HEADERS: [&str; 9] = [
    "Date",
    "Type",
    "Amount",
    "Description",
    "Fruit Name",
    "Quantity",
    "Price per Unit",
    "Payment Method",
    "Created At",
];

/// Writes `records` as CSV in the order given.
pub fn export_table(records: &[LedgerRecord]) -> Result<String, ReportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(TABLE_HEADERS)?;
    for r in records {
        wtr.write_record([
            r.date.format("%Y-%m-%d").to_string(),
            r.kind.to_string(),
            fmt_money(r.amount),
            r.description.clone().unwrap_or_default(),
            r.item_name.clone().unwrap_or_default(),
            r.quantity.map(fmt_plain).unwrap_or_default(),
            r.unit_price.map(fmt_plain).unwrap_or_default(),
            r.payment_method.to_string(),
            r.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))?;
    tracing::debug!(rows = records.len(), "exported transaction table");
    String::from_utf8(bytes).map_err(|e| ReportError::Render(e.to_string()))
}
