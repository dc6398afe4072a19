// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};
use rust_decimal_macros::dec;
use shopbook::analytics::DateRange;
use shopbook::{EntryKind, PaymentMethod, cli, commands::transactions, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(date,type,amount,payment_method,created_at) VALUES (?1,'income','10','cash',?2)",
            params![format!("2025-01-0{}", i), format!("2025-01-0{} 12:00:00", i)],
        )
        .unwrap();
    }
    conn
}

fn run_tx(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["shopbook", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(conn, tx_m)
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["shopbook", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn add_stores_optional_fields() {
    let conn = setup();
    run_tx(
        &conn,
        &[
            "add", "--date", "2025-01-04", "--type", "expense", "--amount", "42.50", "--item",
            "Apple", "--quantity", "5", "--price", "8.5", "--payment", "digital",
        ],
    )
    .unwrap();

    let records = db::load_records(&conn, &DateRange::default()).unwrap();
    assert_eq!(records.len(), 4);
    let newest = &records[0];
    assert_eq!(newest.kind, EntryKind::Expense);
    assert_eq!(newest.amount, dec!(42.50));
    assert_eq!(newest.item_name.as_deref(), Some("Apple"));
    assert_eq!(newest.quantity, Some(dec!(5)));
    assert_eq!(newest.unit_price, Some(dec!(8.5)));
    assert_eq!(newest.payment_method, PaymentMethod::Digital);
    assert_eq!(newest.description, None);
}

#[test]
fn add_rejects_non_positive_amount() {
    let conn = setup();
    let err = run_tx(
        &conn,
        &["add", "--date", "2025-01-04", "--type", "income", "--amount", "0"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Amount must be greater than 0"));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn edit_and_remove_by_id() {
    let conn = setup();
    run_tx(
        &conn,
        &[
            "edit", "1", "--date", "2025-01-01", "--type", "expense", "--amount", "7",
            "--description", "Ice",
        ],
    )
    .unwrap();
    let rec = db::load_records(&conn, &DateRange::default())
        .unwrap()
        .into_iter()
        .find(|r| r.id == 1)
        .unwrap();
    assert_eq!(rec.kind, EntryKind::Expense);
    assert_eq!(rec.amount, dec!(7));
    assert_eq!(rec.description.as_deref(), Some("Ice"));

    run_tx(&conn, &["rm", "2"]).unwrap();
    assert!(run_tx(&conn, &["rm", "2"]).is_err());
    assert_eq!(db::load_records(&conn, &DateRange::default()).unwrap().len(), 2);
}

#[test]
fn clear_requires_confirmation() {
    let conn = setup();
    assert!(run_tx(&conn, &["clear"]).is_err());
    run_tx(&conn, &["clear", "--yes"]).unwrap();
    assert!(db::load_records(&conn, &DateRange::default()).unwrap().is_empty());
}

#[test]
fn undecodable_rows_surface_as_malformed() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,type,amount,payment_method) VALUES ('01/02/2025','income','5','cash')",
        [],
    )
    .unwrap();
    let err = db::load_records(&conn, &DateRange::default()).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("doctor"));
    assert!(msg.contains("unparseable date"));

    let issues = db::scan_malformed(&conn).unwrap();
    assert_eq!(issues.len(), 1);
}

#[test]
fn list_rows_match_export_number_format() {
    let conn = setup();
    run_tx(
        &conn,
        &[
            "add", "--date", "2025-01-05", "--type", "income", "--amount", "42.505", "--item",
            "Kiwi", "--quantity", "2.50", "--price", "8.00",
        ],
    )
    .unwrap();
    let matches = cli::build_cli().get_matches_from(["shopbook", "tx", "list", "--limit", "1"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows[0].amount, "42.51");
    assert_eq!(rows[0].quantity, "2.5");
    assert_eq!(rows[0].unit_price, "8");
}
