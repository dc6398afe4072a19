// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shopbook::{EntryKind, LedgerRecord, PaymentMethod, ReportError, aggregate};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rec(id: i64, date: &str, kind: EntryKind, amount: Decimal, pm: PaymentMethod) -> LedgerRecord {
    LedgerRecord {
        id,
        date: day(date),
        kind,
        amount,
        description: None,
        item_name: None,
        quantity: None,
        unit_price: None,
        payment_method: pm,
        recorded_at: day(date).and_hms_opt(9, id as u32 % 60, 0).unwrap(),
    }
}

fn scenario() -> Vec<LedgerRecord> {
    vec![
        rec(1, "2024-01-01", EntryKind::Income, dec!(100), PaymentMethod::Cash),
        rec(2, "2024-01-01", EntryKind::Expense, dec!(30), PaymentMethod::Cash),
        rec(3, "2024-01-02", EntryKind::Income, dec!(50), PaymentMethod::Digital),
    ]
}

#[test]
fn scenario_totals_and_rollup() {
    let snap = aggregate(&scenario(), None, None).unwrap();
    assert_eq!(snap.income_total, dec!(150));
    assert_eq!(snap.expense_total, dec!(30));
    assert_eq!(snap.profit_total, dec!(120));
    assert_eq!(snap.cash_income_total, dec!(100));
    assert_eq!(snap.digital_income_total, dec!(50));
    assert_eq!(snap.day_count, 2);

    let d1 = snap.daily_rollup["2024-01-01"];
    assert_eq!((d1.income, d1.expense, d1.profit), (dec!(100), dec!(30), dec!(70)));
    let d2 = snap.daily_rollup["2024-01-02"];
    assert_eq!((d2.income, d2.expense, d2.profit), (dec!(50), dec!(0), dec!(50)));

    assert_eq!(snap.avg_daily_profit, dec!(60));
    assert_eq!(snap.avg_daily_income, dec!(75));
    assert_eq!(snap.avg_daily_expense, dec!(15));
}

#[test]
fn buckets_sum_to_totals_and_profit_holds() {
    let records = vec![
        rec(1, "2024-03-01", EntryKind::Income, dec!(12.35), PaymentMethod::Cash),
        rec(2, "2024-03-01", EntryKind::Income, dec!(0.10), PaymentMethod::Digital),
        rec(3, "2024-03-04", EntryKind::Expense, dec!(99.99), PaymentMethod::Cash),
        rec(4, "2024-03-04", EntryKind::Income, dec!(40.00), PaymentMethod::Cash),
        rec(5, "2024-03-09", EntryKind::Expense, dec!(3.33), PaymentMethod::Digital),
        rec(6, "2024-03-01", EntryKind::Expense, dec!(7.77), PaymentMethod::Cash),
    ];
    let snap = aggregate(&records, None, None).unwrap();

    let income: Decimal = snap.daily_rollup.values().map(|d| d.income).sum();
    let expense: Decimal = snap.daily_rollup.values().map(|d| d.expense).sum();
    assert_eq!(income, snap.income_total);
    assert_eq!(expense, snap.expense_total);
    for d in snap.daily_rollup.values() {
        assert_eq!(d.profit, d.income - d.expense);
    }
    assert_eq!(snap.profit_total, snap.income_total - snap.expense_total);
    assert_eq!(
        snap.cash_income_total + snap.digital_income_total,
        snap.income_total
    );
    // Gaps between dates are not filled in.
    assert_eq!(snap.day_count, 3);
    assert!(!snap.daily_rollup.contains_key("2024-03-02"));
}

#[test]
fn date_bounds_are_inclusive() {
    let records = vec![
        rec(1, "2024-02-09", EntryKind::Income, dec!(1), PaymentMethod::Cash),
        rec(2, "2024-02-10", EntryKind::Income, dec!(10), PaymentMethod::Cash),
        rec(3, "2024-02-15", EntryKind::Income, dec!(100), PaymentMethod::Cash),
        rec(4, "2024-02-20", EntryKind::Income, dec!(1000), PaymentMethod::Cash),
        rec(5, "2024-02-21", EntryKind::Income, dec!(10000), PaymentMethod::Cash),
    ];
    let snap = aggregate(&records, Some(day("2024-02-10")), Some(day("2024-02-20"))).unwrap();
    assert_eq!(snap.income_total, dec!(1110));
    assert_eq!(snap.day_count, 3);

    let open_end = aggregate(&records, Some(day("2024-02-20")), None).unwrap();
    assert_eq!(open_end.income_total, dec!(11000));
    let open_start = aggregate(&records, None, Some(day("2024-02-09"))).unwrap();
    assert_eq!(open_start.income_total, dec!(1));
}

#[test]
fn averages_divide_by_distinct_days() {
    let records = vec![
        rec(1, "2024-05-01", EntryKind::Income, dec!(40), PaymentMethod::Cash),
        rec(2, "2024-05-01", EntryKind::Income, dec!(20), PaymentMethod::Cash),
        rec(3, "2024-05-07", EntryKind::Income, dec!(25), PaymentMethod::Cash),
        rec(4, "2024-05-30", EntryKind::Expense, dec!(15), PaymentMethod::Cash),
    ];
    let snap = aggregate(&records, None, None).unwrap();
    assert_eq!(snap.day_count, 3);
    let days = Decimal::from(snap.day_count);
    let tol = dec!(0.000000001);
    assert!((snap.avg_daily_income * days - snap.income_total).abs() < tol);
    assert!((snap.avg_daily_expense * days - snap.expense_total).abs() < tol);
    assert!((snap.avg_daily_profit * days - snap.profit_total).abs() < tol);
}

#[test]
fn empty_input_yields_zeroed_snapshot() {
    let snap = aggregate(&[], None, None).unwrap();
    assert_eq!(snap.income_total, Decimal::ZERO);
    assert_eq!(snap.expense_total, Decimal::ZERO);
    assert_eq!(snap.profit_total, Decimal::ZERO);
    assert!(snap.daily_rollup.is_empty());
    assert_eq!(snap.day_count, 0);
    assert_eq!(snap.avg_daily_income, Decimal::ZERO);
    assert_eq!(snap.avg_daily_profit, Decimal::ZERO);

    // A range that excludes everything is the same as no input.
    let filtered = aggregate(&scenario(), Some(day("2025-01-01")), None).unwrap();
    assert_eq!(filtered, snap);
}

#[test]
fn start_after_end_is_rejected() {
    let err = aggregate(&scenario(), Some(day("2024-01-05")), Some(day("2024-01-01"))).unwrap_err();
    assert!(matches!(err, ReportError::InvalidRange { .. }));
}

#[test]
fn malformed_record_rejects_whole_batch() {
    let mut records = scenario();
    records.push(rec(9, "2023-12-31", EntryKind::Expense, dec!(-5), PaymentMethod::Cash));

    // Still rejected even though the bad record falls outside the range.
    let err = aggregate(&records, Some(day("2024-01-01")), None).unwrap_err();
    match err {
        ReportError::MalformedRecord { id, reason } => {
            assert_eq!(id, 9);
            assert!(reason.contains("amount"));
        }
        other => panic!("unexpected error {other}"),
    }

    let mut records = scenario();
    records[1].quantity = Some(dec!(0));
    assert!(matches!(
        aggregate(&records, None, None),
        Err(ReportError::MalformedRecord { id: 2, .. })
    ));
}

#[test]
fn aggregation_does_not_depend_on_input_order() {
    let mut records = scenario();
    let forward = aggregate(&records, None, None).unwrap();
    records.reverse();
    let backward = aggregate(&records, None, None).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn overflowing_totals_fail_instead_of_panicking() {
    let records = vec![
        rec(1, "2024-01-01", EntryKind::Income, Decimal::MAX, PaymentMethod::Cash),
        rec(2, "2024-01-01", EntryKind::Income, Decimal::MAX, PaymentMethod::Cash),
    ];
    match aggregate(&records, None, None) {
        Err(ReportError::Overflow { id }) => assert_eq!(id, 2),
        other => panic!("expected overflow, got {:?}", other),
    }
}
