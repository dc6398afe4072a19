// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::error::ReportError;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = db::scan_malformed(conn)?;

    if issues.is_empty() {
        println!("doctor: no issues found");
        return Ok(());
    }

    let rows = issues
        .iter()
        .map(|e| match e {
            ReportError::MalformedRecord { id, reason } => vec![id.to_string(), reason.clone()],
            other => vec![String::new(), other.to_string()],
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Issue"], rows));
    println!(
        "{} row(s) would make analytics and exports fail; fix or remove them with `tx edit`/`tx rm`.",
        issues.len()
    );
    Ok(())
}
