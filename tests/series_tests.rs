// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shopbook::series::{
    self, DailyMetric, FieldValues, NO_DATA_LABEL, SeriesValue, payment_breakdown,
};
use shopbook::{AnalyticsSnapshot, DailyTotals};

fn snapshot() -> AnalyticsSnapshot {
    let mut snap = AnalyticsSnapshot {
        income_total: dec!(150),
        expense_total: dec!(30),
        profit_total: dec!(120),
        cash_income_total: dec!(100),
        digital_income_total: dec!(50),
        avg_daily_income: dec!(75),
        avg_daily_expense: dec!(15),
        avg_daily_profit: dec!(60),
        day_count: 2,
        ..Default::default()
    };
    snap.daily_rollup.insert(
        "2024-01-02".into(),
        DailyTotals {
            income: dec!(50),
            expense: dec!(0),
            profit: dec!(50),
        },
    );
    snap.daily_rollup.insert(
        "2024-01-01".into(),
        DailyTotals {
            income: dec!(100),
            expense: dec!(30),
            profit: dec!(70),
        },
    );
    snap
}

#[test]
fn payment_breakdown_uses_fixed_labels() {
    let s = payment_breakdown(&snapshot());
    let pairs: Vec<(&str, Decimal)> = s.points.iter().map(|p| (p.label.as_str(), p.value)).collect();
    assert_eq!(
        pairs,
        vec![("Cash Income", dec!(100)), ("Digital Income", dec!(50))]
    );
    let chart = s.into_chart();
    assert!(!chart.is_sentinel());
    assert_eq!(chart.points().len(), 2);
}

#[test]
fn zero_payment_totals_become_sentinel() {
    let snap = AnalyticsSnapshot::default();
    let chart = payment_breakdown(&snap).into_chart();
    assert!(chart.is_sentinel());
    assert_eq!(chart.points().len(), 1);
    assert_eq!(chart.points()[0].label, NO_DATA_LABEL);
    assert_eq!(chart.points()[0].value, Decimal::ONE);
    // The snapshot itself is untouched.
    assert_eq!(snap, AnalyticsSnapshot::default());
}

#[test]
fn empty_daily_series_becomes_sentinel() {
    let s = series::daily(&AnalyticsSnapshot::default(), DailyMetric::Income);
    assert!(s.is_empty());
    assert!(s.into_chart().is_sentinel());
}

#[test]
fn daily_series_is_date_ordered() {
    let s = series::daily(&snapshot(), DailyMetric::Profit);
    let labels: Vec<&str> = s.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(s.points[0].value, dec!(70));
    assert_eq!(s.points[1].value, dec!(50));
}

#[test]
fn negative_values_are_not_degenerate() {
    let s = series::project([("2024-01-01", dec!(-20)), ("2024-01-02", dec!(0))]);
    let chart = s.into_chart();
    assert!(!chart.is_sentinel());
    assert_eq!(chart.points()[0].value, dec!(-20));
}

#[test]
fn nested_values_pick_first_present_field() {
    let full = SeriesValue::from(DailyTotals {
        income: dec!(5),
        expense: dec!(3),
        profit: dec!(2),
    });
    assert_eq!(full.extract(), dec!(5));

    let no_income = SeriesValue::Fields(FieldValues {
        income: None,
        expense: Some(dec!(3)),
        profit: Some(dec!(2)),
    });
    assert_eq!(no_income.extract(), dec!(3));

    let only_profit = SeriesValue::Fields(FieldValues {
        profit: Some(dec!(-4)),
        ..Default::default()
    });
    assert_eq!(only_profit.extract(), dec!(-4));

    assert_eq!(SeriesValue::Fields(FieldValues::default()).extract(), Decimal::ZERO);
}

#[test]
fn project_mixes_scalars_and_nested_values() {
    let s = series::project([
        ("a", SeriesValue::Scalar(dec!(1.5))),
        ("b", SeriesValue::Fields(FieldValues::default())),
        (
            "c",
            SeriesValue::Fields(FieldValues {
                expense: Some(dec!(9)),
                ..Default::default()
            }),
        ),
    ]);
    let values: Vec<Decimal> = s.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![dec!(1.5), Decimal::ZERO, dec!(9)]);
}

#[test]
fn summary_lists_eight_metrics_in_report_order() {
    let s = series::summary(&snapshot());
    let labels: Vec<&str> = s.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Total Income",
            "Total Expenses",
            "Total Profit",
            "Cash Income",
            "Digital Income",
            "Average Daily Income",
            "Average Daily Expenses",
            "Average Daily Profit",
        ]
    );
    assert_eq!(s.points[2].value, dec!(120));
    assert_eq!(s.points[7].value, dec!(60));
}
