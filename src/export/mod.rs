// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod document;
pub mod table;

use chrono::NaiveDate;

pub use document::{ReportOptions, export_document, layout_document};
pub use table::export_table;

/// `transactions_<YYYYMMDD>.csv`
pub fn table_filename(on: NaiveDate) -> String {
    format!("transactions_{}.csv", on.format("%Y%m%d"))
}

/// `report_<YYYYMMDD>.pdf`
pub fn document_filename(on: NaiveDate) -> String {
    format!("report_{}.pdf", on.format("%Y%m%d"))
}
