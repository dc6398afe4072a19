// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{EntryKind, LedgerRecord, NewEntry, PaymentMethod};
use crate::utils::{
    date_range, fmt_money, fmt_plain, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            db::delete_entry(conn, id)?;
            println!("Deleted transaction {}", id);
        }
        Some(("clear", sub)) => {
            if !sub.get_flag("yes") {
                return Err(anyhow!("Refusing to delete all transactions without --yes"));
            }
            let n = db::delete_all(conn)?;
            println!("Deleted {} transactions", n);
        }
        _ => {}
    }
    Ok(())
}

/// Builds an entry from `add`/`edit` arguments.
pub fn entry_from_args(sub: &clap::ArgMatches) -> Result<NewEntry> {
    let opt_decimal = |name: &str| {
        sub.get_one::<String>(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(parse_decimal)
            .transpose()
    };
    Ok(NewEntry {
        date: Some(parse_date(sub.get_one::<String>("date").unwrap())?),
        kind: Some(
            sub.get_one::<String>("type")
                .unwrap()
                .parse::<EntryKind>()
                .map_err(|e: String| anyhow!(e))?,
        ),
        amount: Some(parse_decimal(sub.get_one::<String>("amount").unwrap())?),
        description: sub.get_one::<String>("description").cloned(),
        item_name: sub.get_one::<String>("item").cloned(),
        quantity: opt_decimal("quantity")?,
        unit_price: opt_decimal("price")?,
        payment_method: sub
            .get_one::<String>("payment")
            .map(|s| s.parse::<PaymentMethod>())
            .transpose()
            .map_err(|e: String| anyhow!(e))?
            .unwrap_or_default(),
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let entry = entry_from_args(sub)?;
    let id = db::insert_entry(conn, &entry)?;
    println!(
        "Recorded {} {} on {} (id {})",
        entry.kind.map(|k| k.as_str()).unwrap_or_default(),
        fmt_money(entry.amount.unwrap_or_default()),
        entry.date.map(|d| d.to_string()).unwrap_or_default(),
        id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let entry = entry_from_args(sub)?;
    db::update_entry(conn, id, &entry)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.item_name.clone(),
                    r.payment_method.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Description", "Fruit", "Payment"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub description: String,
    pub item_name: String,
    pub quantity: String,
    pub unit_price: String,
    pub payment_method: String,
    pub created_at: String,
}

impl From<&LedgerRecord> for TransactionRow {
    fn from(r: &LedgerRecord) -> Self {
        Self {
            id: r.id,
            date: r.date.to_string(),
            r#type: r.kind.to_string(),
            amount: fmt_money(r.amount),
            description: r.description.clone().unwrap_or_default(),
            item_name: r.item_name.clone().unwrap_or_default(),
            quantity: r.quantity.map(fmt_plain).unwrap_or_default(),
            unit_price: r.unit_price.map(fmt_plain).unwrap_or_default(),
            payment_method: r.payment_method.to_string(),
            created_at: r.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let range = date_range(sub)?;
    let records = db::load_records(conn, &range)?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(records.iter().take(limit).map(TransactionRow::from).collect())
}
