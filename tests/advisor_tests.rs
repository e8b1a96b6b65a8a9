// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use nestegg::db::{self, NewTransaction};
use nestegg::engine::advisor::{PurchaseQuery, analyze};
use nestegg::models::{Emotion, Importance, RiskLevel, TxKind};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn insert(conn: &mut Connection, kind: TxKind, amount: i64, on: &str, emotion: Option<Emotion>) {
    let mut record =
        NewTransaction::simple("record", Decimal::from(amount), kind, "Others", date(on));
    record.emotion = emotion;
    db::insert_transactions(conn, &[record]).unwrap();
}

fn query(amount: i64, importance: Importance, emotion: Emotion) -> PurchaseQuery {
    PurchaseQuery {
        description: "sneakers".into(),
        amount: Decimal::from(amount),
        importance,
        emotion,
    }
}

#[test]
fn three_similar_purchases_outrank_emotional_desire() {
    let mut conn = setup();
    insert(&mut conn, TxKind::Income, 5000, "2025-06-01", None);
    for on in ["2025-01-10", "2025-02-14", "2025-03-03"] {
        insert(&mut conn, TxKind::Expense, 80, on, Some(Emotion::Anxious));
    }

    let records = db::load_transactions(&conn).unwrap();
    // DESIRE + ANXIOUS would also fire the emotional rule; the pattern rule
    // must be checked first and claim the verdict.
    let rec = analyze(
        &query(200, Importance::Desire, Emotion::Anxious),
        &records,
        date("2025-06-15"),
    );
    assert_eq!(rec.risk, RiskLevel::High);
    assert!(rec.alternative.contains("48 hours"));
    assert!(rec.emotional_alert.contains('3'));
}

#[test]
fn two_similar_purchases_fall_through_to_emotional_rule() {
    let mut conn = setup();
    insert(&mut conn, TxKind::Income, 5000, "2025-06-01", None);
    for on in ["2025-01-10", "2025-02-14"] {
        insert(&mut conn, TxKind::Expense, 80, on, Some(Emotion::Anxious));
    }

    let records = db::load_transactions(&conn).unwrap();
    let rec = analyze(
        &query(200, Importance::Desire, Emotion::Anxious),
        &records,
        date("2025-06-15"),
    );
    assert_eq!(rec.risk, RiskLevel::High);
    assert!(rec.alternative.contains("24 hours"));
}

#[test]
fn need_within_free_balance_gets_a_green_light() {
    let mut conn = setup();
    insert(&mut conn, TxKind::Income, 3000, "2025-06-01", None);
    insert(&mut conn, TxKind::Expense, 1000, "2025-06-05", None);

    let records = db::load_transactions(&conn).unwrap();
    let rec = analyze(
        &query(500, Importance::Need, Emotion::Neutral),
        &records,
        date("2025-06-15"),
    );
    assert_eq!(rec.risk, RiskLevel::Low);
    assert!(rec.real_impact.contains("25.0%"));
}

#[test]
fn free_balance_uses_only_the_current_month() {
    let mut conn = setup();
    // Income in May only; advising in June sees a zero free balance
    insert(&mut conn, TxKind::Income, 3000, "2025-05-01", None);

    let records = db::load_transactions(&conn).unwrap();
    let rec = analyze(
        &query(100, Importance::Need, Emotion::Neutral),
        &records,
        date("2025-06-15"),
    );
    assert!(rec.real_impact.contains("exceeds"));
}
