// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::{AnalyticsSnapshot, DailyTotals};

pub const NO_DATA_LABEL: &str = "No Data";
pub const CASH_INCOME_LABEL: &str = "Cash Income";
pub const DIGITAL_INCOME_LABEL: &str = "Digital Income";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabeledSeries {
    pub points: Vec<SeriesPoint>,
}

/// A series that is safe to hand to a chart renderer: never empty and never
/// all zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries(LabeledSeries);

/// Income/expense/profit fields of a nested value, any of which may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldValues {
    pub income: Option<Decimal>,
    pub expense: Option<Decimal>,
    pub profit: Option<Decimal>,
}

/// Input to [`project`]: a plain number or a nested set of fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesValue {
    Scalar(Decimal),
    Fields(FieldValues),
}

impl SeriesValue {
    /// Scalars pass through. Nested values yield their first present field in
    /// the order income, expense, profit, or zero when none is set.
    pub fn extract(&self) -> Decimal {
        match self {
            SeriesValue::Scalar(v) => *v,
            SeriesValue::Fields(f) => f
                .income
                .or(f.expense)
                .or(f.profit)
                .unwrap_or(Decimal::ZERO),
        }
    }
}

impl From<Decimal> for SeriesValue {
    fn from(v: Decimal) -> Self {
        SeriesValue::Scalar(v)
    }
}

impl From<DailyTotals> for SeriesValue {
    fn from(d: DailyTotals) -> Self {
        SeriesValue::Fields(FieldValues {
            income: Some(d.income),
            expense: Some(d.expense),
            profit: Some(d.profit),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyMetric {
    Income,
    Expense,
    Profit,
}

impl DailyMetric {
    fn pick(&self, d: &DailyTotals) -> Decimal {
        match self {
            DailyMetric::Income => d.income,
            DailyMetric::Expense => d.expense,
            DailyMetric::Profit => d.profit,
        }
    }
}

impl LabeledSeries {
    pub fn push(&mut self, label: impl Into<String>, value: Decimal) {
        self.points.push(SeriesPoint {
            label: label.into(),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_degenerate(&self) -> bool {
        self.points.iter().all(|p| p.value.is_zero())
    }

    /// Swaps an empty or all-zero series for the single "No Data" point.
    pub fn into_chart(self) -> ChartSeries {
        if self.is_degenerate() {
            let mut sentinel = LabeledSeries::default();
            sentinel.push(NO_DATA_LABEL, Decimal::ONE);
            ChartSeries(sentinel)
        } else {
            ChartSeries(self)
        }
    }
}

impl ChartSeries {
    pub fn points(&self) -> &[SeriesPoint] {
        &self.0.points
    }

    pub fn is_sentinel(&self) -> bool {
        self.0.len() == 1 && self.0.points[0].label == NO_DATA_LABEL
    }
}

pub fn project<L, V, I>(entries: I) -> LabeledSeries
where
    L: Into<String>,
    V: Into<SeriesValue>,
    I: IntoIterator<Item = (L, V)>,
{
    let mut series = LabeledSeries::default();
    for (label, value) in entries {
        series.push(label, value.into().extract());
    }
    series
}

pub fn payment_breakdown(snap: &AnalyticsSnapshot) -> LabeledSeries {
    project([
        (CASH_INCOME_LABEL, snap.cash_income_total),
        (DIGITAL_INCOME_LABEL, snap.digital_income_total),
    ])
}

/// One point per rolled-up day, oldest first.
pub fn daily(snap: &AnalyticsSnapshot, metric: DailyMetric) -> LabeledSeries {
    project(
        snap.daily_rollup
            .iter()
            .map(|(day, totals)| (day.as_str(), metric.pick(totals))),
    )
}

/// The printed summary metrics, in report order. `day_count` is not included.
pub fn summary(snap: &AnalyticsSnapshot) -> LabeledSeries {
    project([
        ("Total Income", snap.income_total),
        ("Total Expenses", snap.expense_total),
        ("Total Profit", snap.profit_total),
        (CASH_INCOME_LABEL, snap.cash_income_total),
        (DIGITAL_INCOME_LABEL, snap.digital_income_total),
        ("Average Daily Income", snap.avg_daily_income),
        ("Average Daily Expenses", snap.avg_daily_expense),
        ("Average Daily Profit", snap.avg_daily_profit),
    ])
}
