// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{AnalyticsSnapshot, aggregate};
use crate::chart::{ChartKind, ChartRenderer, SvgChartRenderer};
use crate::db;
use crate::series::{self, DailyMetric};
use crate::utils::{date_range, fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("daily", sub)) => daily(conn, sub)?,
        Some(("charts", sub)) => charts(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Loads the requested range from the store and aggregates it.
pub fn snapshot_for(conn: &Connection, sub: &clap::ArgMatches) -> Result<AnalyticsSnapshot> {
    let range = date_range(sub)?;
    let records = db::load_records(conn, &range)?;
    Ok(aggregate(&records, range.start, range.end)?)
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let snap = snapshot_for(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snap)? {
        let ccy = get_currency(conn)?;
        let mut rows: Vec<Vec<String>> = series::summary(&snap)
            .points
            .into_iter()
            .map(|p| vec![p.label, fmt_money(p.value)])
            .collect();
        rows.push(vec!["Days".into(), snap.day_count.to_string()]);
        let hdr = format!("Amount ({})", ccy);
        println!("{}", pretty_table(&["Metric", &hdr], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct DailyRow<'a> {
    date: &'a str,
    income: String,
    expense: String,
    profit: String,
}

fn daily(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let snap = snapshot_for(conn, sub)?;
    let data: Vec<DailyRow<'_>> = snap
        .daily_rollup
        .iter()
        .rev()
        .map(|(date, d)| DailyRow {
            date: date.as_str(),
            income: fmt_money(d.income),
            expense: fmt_money(d.expense),
            profit: fmt_money(d.profit),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.income.clone(),
                    r.expense.clone(),
                    r.profit.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Income", "Expense", "Profit"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ChartOut {
    name: &'static str,
    mime: &'static str,
    base64: String,
}

fn charts(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let snap = snapshot_for(conn, sub)?;
    let dir = Path::new(sub.get_one::<String>("out").unwrap().trim());
    std::fs::create_dir_all(dir).with_context(|| format!("Create {}", dir.display()))?;

    let json_flag = sub.get_flag("json");
    let renderer = SvgChartRenderer::default();
    let plan = [
        (
            "daily_income_bar",
            ChartKind::Bar,
            "Daily Income",
            series::daily(&snap, DailyMetric::Income),
        ),
        (
            "daily_profit_line",
            ChartKind::Line,
            "Daily Profit",
            series::daily(&snap, DailyMetric::Profit),
        ),
        (
            "payment_methods_pie",
            ChartKind::Pie,
            "Income by Payment Method",
            series::payment_breakdown(&snap),
        ),
    ];

    let mut out = Vec::new();
    for (name, kind, title, data) in plan {
        let chart = renderer.render(kind, title, &data.into_chart())?;
        let path = dir.join(format!("{}.svg", name));
        std::fs::write(&path, &chart.bytes)
            .with_context(|| format!("Write {}", path.display()))?;
        if !json_flag {
            println!("Wrote {}", path.display());
        }
        out.push(ChartOut {
            name,
            mime: chart.mime,
            base64: chart.to_base64(),
        });
    }
    if json_flag {
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}
