// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Daily rollups and summary metrics over a snapshot of ledger records.
//!
//! [`aggregate`] is a pure function: it reads the records it is given, never
//! touches the store, and returns a fresh [`AnalyticsSnapshot`] each call.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ReportError;
use crate::models::{EntryKind, LedgerRecord, PaymentMethod};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub profit_total: Decimal,
    pub cash_income_total: Decimal,
    pub digital_income_total: Decimal,
    /// Keyed by `YYYY-MM-DD`; only dates that have at least one record.
    pub daily_rollup: BTreeMap<String, DailyTotals>,
    pub avg_daily_income: Decimal,
    pub avg_daily_expense: Decimal,
    pub avg_daily_profit: Decimal,
    pub day_count: usize,
}

/// Inclusive date bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ReportError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ReportError::InvalidRange { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Rolls `records` up into per-day and overall totals.
///
/// The whole batch is rejected if any record fails [`LedgerRecord::check`],
/// including records that fall outside the date bounds.
pub fn aggregate(
    records: &[LedgerRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<AnalyticsSnapshot, ReportError> {
    let range = DateRange::new(start, end)?;
    if let Err(e) = records.iter().try_for_each(LedgerRecord::check) {
        tracing::warn!(error = %e, "rejecting record batch");
        return Err(e);
    }

    let mut snap = AnalyticsSnapshot::default();
    for r in records.iter().filter(|r| range.contains(r.date)) {
        let bucket = snap
            .daily_rollup
            .entry(r.date.format(DAY_KEY_FORMAT).to_string())
            .or_default();
        match r.kind {
            EntryKind::Income => {
                add(&mut bucket.income, r)?;
                add(&mut snap.income_total, r)?;
                match r.payment_method {
                    PaymentMethod::Cash => add(&mut snap.cash_income_total, r)?,
                    PaymentMethod::Digital => add(&mut snap.digital_income_total, r)?,
                }
            }
            EntryKind::Expense => {
                add(&mut bucket.expense, r)?;
                add(&mut snap.expense_total, r)?;
            }
        }
    }

    for day in snap.daily_rollup.values_mut() {
        day.profit = day.income - day.expense;
    }
    snap.profit_total = snap.income_total - snap.expense_total;
    snap.day_count = snap.daily_rollup.len();

    if snap.day_count > 0 {
        let days = Decimal::from(snap.day_count);
        snap.avg_daily_income = snap.income_total / days;
        snap.avg_daily_expense = snap.expense_total / days;
        snap.avg_daily_profit = snap.profit_total / days;
    }

    tracing::debug!(
        records = records.len(),
        days = snap.day_count,
        "aggregated ledger snapshot"
    );
    Ok(snap)
}

fn add(total: &mut Decimal, r: &LedgerRecord) -> Result<(), ReportError> {
    *total = total.checked_add(r.amount).ok_or_else(|| {
        tracing::warn!(id = r.id, "ledger totals overflowed");
        ReportError::Overflow { id: r.id }
    })?;
    Ok(())
}
