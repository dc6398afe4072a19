// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::aggregate;
use crate::db;
use crate::export::{document_filename, export_document, export_table, table_filename};
use crate::utils::{date_range, report_options};
use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::Connection;
use std::path::PathBuf;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => export_csv(conn, sub),
        Some(("pdf", sub)) => export_pdf(conn, sub),
        _ => Ok(()),
    }
}

fn out_path(sub: &clap::ArgMatches, default_name: String) -> PathBuf {
    sub.get_one::<String>("out")
        .map(|s| PathBuf::from(s.trim()))
        .unwrap_or_else(|| PathBuf::from(default_name))
}

fn export_csv(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let range = date_range(sub)?;
    let out = out_path(sub, table_filename(Local::now().date_naive()));

    let records = db::load_records(conn, &range)?;
    let text = export_table(&records)?;
    std::fs::write(&out, text).with_context(|| format!("Write {}", out.display()))?;
    println!("Exported {} transactions to {}", records.len(), out.display());
    Ok(())
}

fn export_pdf(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let range = date_range(sub)?;
    let out = out_path(sub, document_filename(Local::now().date_naive()));

    let records = db::load_records(conn, &range)?;
    let snap = aggregate(&records, range.start, range.end)?;
    let bytes = export_document(&snap, &records, &report_options(conn, range)?)?;
    std::fs::write(&out, bytes).with_context(|| format!("Write {}", out.display()))?;
    println!("Exported report to {}", out.display());
    Ok(())
}
