// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use nestegg::db;
use nestegg::engine::recurrence::{Draft, expand};
use nestegg::models::{Recurrence, TxKind};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn tv_draft(installments: u32) -> Draft {
    Draft {
        description: "Television".into(),
        amount: Decimal::from(1200),
        kind: TxKind::Expense,
        category: "Leisure".into(),
        subcategory: None,
        date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        recurring: false,
        installments: Some(installments),
        emotion: None,
    }
}

#[test]
fn installment_plan_persists_n_dated_slices() {
    let mut conn = setup();
    let slices = expand(&tv_draft(3));
    assert_eq!(slices.len(), 3);
    db::insert_transactions(&mut conn, &slices).unwrap();

    let stored = db::load_transactions(&conn).unwrap();
    assert_eq!(stored.len(), 3);

    let dates: Vec<String> = stored.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, ["2024-01-31", "2024-02-29", "2024-03-31"]);

    for (i, t) in stored.iter().enumerate() {
        let inst = t.installments.unwrap();
        assert_eq!(inst.current as usize, i + 1);
        assert_eq!(inst.total, 3);
        assert_eq!(t.recurrence, Recurrence::None);
        assert_eq!(t.description, format!("Television ({}/3)", i + 1));
        assert_eq!(t.amount, Decimal::from(1200));
    }
}

#[test]
fn twelve_installments_cover_a_full_year() {
    let slices = expand(&tv_draft(12));
    assert_eq!(slices.len(), 12);
    assert_eq!(slices[0].date.to_string(), "2024-01-31");
    assert_eq!(slices[11].date.to_string(), "2024-12-31");
    let currents: Vec<u32> = slices.iter().map(|s| s.installments.unwrap().current).collect();
    assert_eq!(currents, (1..=12).collect::<Vec<u32>>());
}

#[test]
fn fixed_monthly_record_round_trips() {
    let mut conn = setup();
    let mut draft = tv_draft(0);
    draft.installments = None;
    draft.recurring = true;
    draft.description = "Rent".into();

    db::insert_transactions(&mut conn, &expand(&draft)).unwrap();
    let stored = db::load_transactions(&conn).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].recurrence, Recurrence::Monthly);
    assert!(stored[0].installments.is_none());
    assert_eq!(stored[0].description, "Rent");
}

#[test]
fn schema_rejects_unknown_kind() {
    let conn = setup();
    let res = conn.execute(
        "INSERT INTO transactions(description, amount, kind, category, date) \
         VALUES ('bad', '10', 'BOGUS', 'Leisure', '2024-02-01')",
        [],
    );
    assert!(res.is_err());
    assert!(db::load_transactions(&conn).unwrap().is_empty());
}
