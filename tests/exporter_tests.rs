// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use nestegg::cli::build_cli;
use nestegg::commands::exporter;
use nestegg::db::{self, NewTransaction};
use nestegg::models::TxKind;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let records = vec![
        NewTransaction::simple(
            "salary",
            Decimal::from(5000),
            TxKind::Income,
            "Salary",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        ),
        NewTransaction::simple(
            "rent",
            Decimal::from(1500),
            TxKind::Expense,
            "Housing",
            NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
        ),
    ];
    db::insert_transactions(&mut conn, &records).unwrap();
    conn
}

fn export_matches(args: &[&str]) -> clap::ArgMatches {
    let m = build_cli().try_get_matches_from(args).unwrap();
    let (_, sub) = m.subcommand().unwrap();
    sub.clone()
}

#[test]
fn csv_export_writes_header_and_rows() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("records.csv");

    let sub = export_matches(&[
        "nestegg", "export", "records", "--format", "csv", "--out", out.to_str().unwrap(),
    ]);
    exporter::handle(&conn, &sub).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert!(lines.next().unwrap().starts_with("id,date,kind,description"));
    assert_eq!(lines.clone().count(), 2);
    assert!(contents.contains("salary"));
    assert!(contents.contains("INCOME"));
}

#[test]
fn json_export_is_valid_and_complete() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("records.json");

    let sub = export_matches(&[
        "nestegg", "export", "records", "--format", "json", "--out", out.to_str().unwrap(),
    ]);
    exporter::handle(&conn, &sub).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["kind"], "INCOME");
    assert_eq!(arr[1]["description"], "rent");
}
