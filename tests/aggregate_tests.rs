// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use nestegg::db::{self, NewTransaction};
use nestegg::engine::aggregate::{Aggregates, SCORE_MAX, SCORE_MIN};
use nestegg::models::TxKind;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn insert(conn: &mut Connection, kind: TxKind, amount: i64, on: &str) {
    let record = NewTransaction::simple("record", Decimal::from(amount), kind, "Others", date(on));
    db::insert_transactions(conn, &[record]).unwrap();
}

#[test]
fn expense_only_month_scores_three_hundred() {
    let mut conn = setup();
    insert(&mut conn, TxKind::Expense, 500, "2025-06-10");

    let records = db::load_transactions(&conn).unwrap();
    let agg = Aggregates::compute(&records, date("2025-06-15"));
    assert_eq!(agg.monthly_expense, Decimal::from(500));
    assert_eq!(agg.score, 300);
}

#[test]
fn thirty_percent_savings_rate_scores_seven_hundred() {
    let mut conn = setup();
    insert(&mut conn, TxKind::Income, 1000, "2025-06-01");
    insert(&mut conn, TxKind::Expense, 700, "2025-06-05");

    let records = db::load_transactions(&conn).unwrap();
    let agg = Aggregates::compute(&records, date("2025-06-15"));
    assert_eq!(agg.score, 700);
}

#[test]
fn score_stays_in_range_across_extremes() {
    let mut conn = setup();
    insert(&mut conn, TxKind::Income, 1_000_000, "2025-06-01");
    insert(&mut conn, TxKind::Investment, 1, "2025-06-01");
    let records = db::load_transactions(&conn).unwrap();
    let high = Aggregates::compute(&records, date("2025-06-15"));
    assert!(high.score <= SCORE_MAX);

    let mut conn = setup();
    insert(&mut conn, TxKind::Expense, 1_000_000, "2025-06-01");
    let records = db::load_transactions(&conn).unwrap();
    let low = Aggregates::compute(&records, date("2025-06-15"));
    assert!(low.score >= SCORE_MIN);
}

#[test]
fn recompute_on_unchanged_store_is_stable() {
    let mut conn = setup();
    insert(&mut conn, TxKind::Income, 4200, "2025-06-01");
    insert(&mut conn, TxKind::Expense, 1300, "2025-06-03");
    insert(&mut conn, TxKind::Investment, 800, "2025-05-20");

    let records = db::load_transactions(&conn).unwrap();
    let a = Aggregates::compute(&records, date("2025-06-15"));
    let b = Aggregates::compute(&records, date("2025-06-15"));
    assert_eq!(a.score, b.score);
    assert_eq!(a.net_worth, b.net_worth);
    assert_eq!(a.monthly_income, b.monthly_income);
}

#[test]
fn liquid_cash_ignores_future_dated_records() {
    let mut conn = setup();
    insert(&mut conn, TxKind::Income, 2000, "2025-06-01");
    insert(&mut conn, TxKind::Investment, 500, "2025-12-01");

    let records = db::load_transactions(&conn).unwrap();
    let agg = Aggregates::compute(&records, date("2025-06-15"));
    assert_eq!(agg.liquid_cash, Decimal::from(2000));
    assert_eq!(agg.total_invested, Decimal::ZERO);
}
