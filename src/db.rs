// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::models::{
    Emotion, Goal, Installments, Priority, Recurrence, Transaction, TxKind, YieldType,
};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.nestegg", "Nestegg", "nestegg"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("nestegg.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('INCOME','EXPENSE','INVESTMENT')),
        category TEXT NOT NULL,
        subcategory TEXT,
        date TEXT NOT NULL,
        recurrence TEXT NOT NULL DEFAULT 'NONE' CHECK(recurrence IN ('NONE','MONTHLY')),
        installment_current INTEGER,
        installment_total INTEGER,
        ticker TEXT,
        quantity TEXT,
        price_per_unit TEXT,
        yield_type TEXT CHECK(yield_type IN ('CDI','IPCA','PRE') OR yield_type IS NULL),
        yield_rate TEXT,
        current_value TEXT,
        investment_type TEXT,
        purchase_date TEXT,
        emotion TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_kind ON transactions(kind);

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL DEFAULT '0',
        deadline TEXT NOT NULL,
        priority TEXT NOT NULL DEFAULT 'MEDIUM' CHECK(priority IN ('HIGH','MEDIUM','LOW')),
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

fn decimal_col(row: &Row<'_>, idx: usize, field: &str) -> Result<Decimal> {
    let s: String = row.get(idx)?;
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid stored {} '{}'", field, s))
}

fn opt_decimal_col(row: &Row<'_>, idx: usize, field: &str) -> Result<Option<Decimal>> {
    let s: Option<String> = row.get(idx)?;
    match s {
        Some(s) => Ok(Some(s.parse::<Decimal>().with_context(|| {
            format!("Invalid stored {} '{}'", field, s)
        })?)),
        None => Ok(None),
    }
}

// Row <-> struct mapping for the store boundary. Columns are flat
// snake_case; the in-memory model carries typed enums and Decimals.
fn tx_from_row(row: &Row<'_>) -> Result<Transaction> {
    let kind: String = row.get(3)?;
    let recurrence: String = row.get(7)?;
    let installment_current: Option<u32> = row.get(8)?;
    let installment_total: Option<u32> = row.get(9)?;
    let yield_type: Option<String> = row.get(13)?;
    let emotion: Option<String> = row.get(18)?;

    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: decimal_col(row, 2, "amount")?,
        kind: TxKind::parse(&kind)?,
        category: row.get(4)?,
        subcategory: row.get(5)?,
        date: row.get(6)?,
        recurrence: Recurrence::parse(&recurrence)?,
        installments: match (installment_current, installment_total) {
            (Some(current), Some(total)) => Some(Installments { current, total }),
            _ => None,
        },
        ticker: row.get(10)?,
        quantity: opt_decimal_col(row, 11, "quantity")?,
        price_per_unit: opt_decimal_col(row, 12, "price_per_unit")?,
        yield_type: yield_type.as_deref().map(YieldType::parse).transpose()?,
        yield_rate: opt_decimal_col(row, 14, "yield_rate")?,
        current_value: opt_decimal_col(row, 15, "current_value")?,
        investment_type: row.get(16)?,
        purchase_date: row.get(17)?,
        emotion: emotion.as_deref().map(Emotion::parse).transpose()?,
    })
}

const TX_COLUMNS: &str = "id, description, amount, kind, category, subcategory, date, recurrence, \
     installment_current, installment_total, ticker, quantity, price_per_unit, \
     yield_type, yield_rate, current_value, investment_type, purchase_date, emotion";

pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let sql = format!("SELECT {} FROM transactions ORDER BY date, id", TX_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(tx_from_row(row)?);
    }
    Ok(out)
}

/// Fields of a transaction before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub date: chrono::NaiveDate,
    pub recurrence: Recurrence,
    pub installments: Option<Installments>,
    pub ticker: Option<String>,
    pub quantity: Option<Decimal>,
    pub price_per_unit: Option<Decimal>,
    pub yield_type: Option<YieldType>,
    pub yield_rate: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub investment_type: Option<String>,
    pub purchase_date: Option<chrono::NaiveDate>,
    pub emotion: Option<Emotion>,
}

impl NewTransaction {
    pub fn simple(
        description: &str,
        amount: Decimal,
        kind: TxKind,
        category: &str,
        date: chrono::NaiveDate,
    ) -> Self {
        NewTransaction {
            description: description.to_string(),
            amount,
            kind,
            category: category.to_string(),
            subcategory: None,
            date,
            recurrence: Recurrence::None,
            installments: None,
            ticker: None,
            quantity: None,
            price_per_unit: None,
            yield_type: None,
            yield_rate: None,
            current_value: None,
            investment_type: None,
            purchase_date: None,
            emotion: None,
        }
    }
}

/// Insert a batch of records in one transaction. All-or-nothing: a failed
/// batch leaves the store untouched.
pub fn insert_transactions(conn: &mut Connection, records: &[NewTransaction]) -> Result<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO transactions(description, amount, kind, category, subcategory, date,
                 recurrence, installment_current, installment_total, ticker, quantity,
                 price_per_unit, yield_type, yield_rate, current_value, investment_type,
                 purchase_date, emotion)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18)",
        )?;
        for r in records {
            stmt.execute(params![
                r.description,
                r.amount.to_string(),
                r.kind.as_str(),
                r.category,
                r.subcategory,
                r.date.to_string(),
                r.recurrence.as_str(),
                r.installments.map(|i| i.current),
                r.installments.map(|i| i.total),
                r.ticker,
                r.quantity.map(|q| q.to_string()),
                r.price_per_unit.map(|p| p.to_string()),
                r.yield_type.map(|y| y.as_str()),
                r.yield_rate.map(|y| y.to_string()),
                r.current_value.map(|v| v.to_string()),
                r.investment_type,
                r.purchase_date.map(|d| d.to_string()),
                r.emotion.map(|e| e.as_str()),
            ])?;
        }
    }
    tx.commit()?;
    Ok(records.len())
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}

/// Persist a refreshed mark-to-market value. Cost basis is never touched.
pub fn update_current_value(conn: &Connection, id: i64, value: Decimal) -> Result<()> {
    conn.execute(
        "UPDATE transactions SET current_value=?1 WHERE id=?2",
        params![value.to_string(), id],
    )?;
    Ok(())
}

fn goal_from_row(row: &Row<'_>) -> Result<Goal> {
    let priority: String = row.get(5)?;
    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        target_amount: decimal_col(row, 2, "target_amount")?,
        current_amount: decimal_col(row, 3, "current_amount")?,
        deadline: row.get(4)?,
        priority: Priority::parse(&priority)?,
    })
}

pub fn load_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, target_amount, current_amount, deadline, priority
         FROM goals ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(goal_from_row(row)?);
    }
    Ok(out)
}

pub fn insert_goal(
    conn: &Connection,
    title: &str,
    target: Decimal,
    deadline: chrono::NaiveDate,
    priority: Priority,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO goals(title, target_amount, current_amount, deadline, priority)
         VALUES (?1, ?2, '0', ?3, ?4)",
        params![
            title,
            target.to_string(),
            deadline.to_string(),
            priority.as_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Deposits only add; goals are never partially edited otherwise.
pub fn deposit_to_goal(conn: &Connection, id: i64, amount: Decimal) -> Result<Decimal> {
    let current: String = conn
        .query_row("SELECT current_amount FROM goals WHERE id=?1", params![id], |r| r.get(0))
        .with_context(|| format!("Goal {} not found", id))?;
    let current = current
        .parse::<Decimal>()
        .with_context(|| format!("Invalid stored current_amount '{}'", current))?;
    let updated = current + amount;
    conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE id=?2",
        params![updated.to_string(), id],
    )?;
    Ok(updated)
}

pub fn delete_goal(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM goals WHERE id=?1", params![id])?;
    Ok(n > 0)
}
