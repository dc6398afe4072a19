// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::analytics::DateRange;
use crate::error::ReportError;
use crate::models::{EntryKind, LedgerRecord, NewEntry, PaymentMethod};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Shopbook", "shopbook"));

pub const DB_ENV: &str = "SHOPBOOK_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("shopbook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "opened ledger database");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        type TEXT NOT NULL,
        amount TEXT NOT NULL,
        description TEXT,
        item_name TEXT,
        quantity TEXT,
        unit_price TEXT,
        payment_method TEXT NOT NULL DEFAULT 'cash',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;
    Ok(())
}

fn blank_to_none(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Stores a validated entry and returns its id.
pub fn insert_entry(conn: &Connection, e: &NewEntry) -> Result<i64> {
    let (date, kind, amount) = required(e)?;
    conn.execute(
        "INSERT INTO transactions(date, type, amount, description, item_name, quantity, unit_price, payment_method)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            date.to_string(),
            kind,
            amount,
            blank_to_none(&e.description),
            blank_to_none(&e.item_name),
            e.quantity.map(|q| q.to_string()),
            e.unit_price.map(|p| p.to_string()),
            e.payment_method.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_entry(conn: &Connection, id: i64, e: &NewEntry) -> Result<()> {
    let (date, kind, amount) = required(e)?;
    let n = conn.execute(
        "UPDATE transactions SET date=?1, type=?2, amount=?3, description=?4, item_name=?5,
         quantity=?6, unit_price=?7, payment_method=?8 WHERE id=?9",
        params![
            date.to_string(),
            kind,
            amount,
            blank_to_none(&e.description),
            blank_to_none(&e.item_name),
            e.quantity.map(|q| q.to_string()),
            e.unit_price.map(|p| p.to_string()),
            e.payment_method.as_str(),
            id
        ],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    Ok(())
}

fn required(e: &NewEntry) -> Result<(NaiveDate, &'static str, String)> {
    let errors = e.validate();
    if !errors.is_empty() {
        return Err(anyhow!(errors.join("; ")));
    }
    match (e.date, e.kind, e.amount) {
        (Some(d), Some(k), Some(a)) => Ok((d, k.as_str(), a.to_string())),
        _ => Err(anyhow!("Date, type and amount are required")),
    }
}

pub fn delete_entry(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    Ok(())
}

pub fn delete_all(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM transactions", [])?)
}

/// Raw column values of one stored row, before decoding.
struct RawRow {
    id: i64,
    date: String,
    kind: String,
    amount: String,
    description: Option<String>,
    item_name: Option<String>,
    quantity: Option<String>,
    unit_price: Option<String>,
    payment_method: String,
    created_at: String,
}

const SELECT_ROWS: &str = "SELECT id, date, type, amount, description, item_name, quantity, unit_price, payment_method, created_at FROM transactions";

fn raw_row(r: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: r.get(0)?,
        date: r.get(1)?,
        kind: r.get(2)?,
        amount: r.get(3)?,
        description: r.get(4)?,
        item_name: r.get(5)?,
        quantity: r.get(6)?,
        unit_price: r.get(7)?,
        payment_method: r.get(8)?,
        created_at: r.get(9)?,
    })
}

fn decimal_field(id: i64, name: &str, raw: &str) -> Result<Decimal, ReportError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| ReportError::malformed(id, format!("unparseable {} '{}'", name, raw)))
}

impl RawRow {
    fn decode(self) -> Result<LedgerRecord, ReportError> {
        let id = self.id;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ReportError::malformed(id, format!("unparseable date '{}'", self.date)))?;
        let recorded_at = NaiveDateTime::parse_from_str(self.created_at.trim(), "%Y-%m-%d %H:%M:%S")
            .map_err(|_| {
                ReportError::malformed(id, format!("unparseable created_at '{}'", self.created_at))
            })?;
        let opt_decimal = |name: &str, v: Option<String>| -> Result<Option<Decimal>, ReportError> {
            match v.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                Some(s) => decimal_field(id, name, s).map(Some),
                None => Ok(None),
            }
        };
        Ok(LedgerRecord {
            id,
            date,
            kind: self
                .kind
                .parse::<EntryKind>()
                .map_err(|e: String| ReportError::malformed(id, e))?,
            amount: decimal_field(id, "amount", &self.amount)?,
            description: self.description.filter(|s| !s.is_empty()),
            item_name: self.item_name.filter(|s| !s.is_empty()),
            quantity: opt_decimal("quantity", self.quantity)?,
            unit_price: opt_decimal("unit_price", self.unit_price)?,
            payment_method: self
                .payment_method
                .parse::<PaymentMethod>()
                .map_err(|e: String| ReportError::malformed(id, e))?,
            recorded_at,
        })
    }
}

/// Loads records within `range`, newest date first, newest entry first
/// within a date. Any row that cannot be decoded fails the whole load.
pub fn load_records(conn: &Connection, range: &DateRange) -> Result<Vec<LedgerRecord>> {
    let mut sql = format!("{} WHERE 1=1", SELECT_ROWS);
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(s) = range.start {
        sql.push_str(" AND date >= ?");
        params_vec.push(s.to_string());
    }
    if let Some(e) = range.end {
        sql.push_str(" AND date <= ?");
        params_vec.push(e.to_string());
    }
    sql.push_str(" ORDER BY date DESC, created_at DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), raw_row)?;
    let mut out = Vec::new();
    for row in rows {
        let record = row?
            .decode()
            .context("Stored ledger has undecodable rows; `shopbook doctor` lists them")?;
        out.push(record);
    }
    Ok(out)
}

/// Every stored row that would be rejected by the report engine.
pub fn scan_malformed(conn: &Connection) -> Result<Vec<ReportError>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_ROWS))?;
    let rows = stmt.query_map([], raw_row)?;
    let mut issues = Vec::new();
    for row in rows {
        if let Err(e) = row?.decode().and_then(|rec| rec.check()) {
            issues.push(e);
        }
    }
    Ok(issues)
}
