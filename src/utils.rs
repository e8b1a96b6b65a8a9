// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::Plan;

const UA: &str = concat!(
    "nestegg/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/nestegg-cli/nestegg)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Validate and split a YYYY-MM month string.
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    use chrono::Datelike;
    Ok((d.year(), d.month()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Parse a monetary magnitude; records store non-negative amounts only.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        return Err(anyhow!("Amount must be greater than zero, got '{}'", s));
    }
    Ok(d)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, d.round_dp(2))
}

/// Last calendar day of the month containing `year`/`month`.
pub fn month_end(year: i32, month: u32) -> Result<NaiveDate> {
    let last_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(anyhow!("Invalid month number {}", month)),
    };
    NaiveDate::from_ymd_opt(year, month, last_day)
        .ok_or_else(|| anyhow!("Invalid month {}-{:02}", year, month))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

static TICKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9.\-]{1,12}$").expect("static pattern"));

pub fn validate_ticker(ticker: &str) -> Result<String> {
    let upper = ticker.trim().to_uppercase();
    if !TICKER_RE.is_match(&upper) {
        return Err(anyhow!(
            "Invalid ticker '{}' (letters, digits, '.', '-', max 12 chars)",
            ticker
        ));
    }
    Ok(upper)
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| r.get(0))
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_plan(conn: &Connection) -> Result<Plan> {
    match get_setting(conn, "plan")? {
        Some(v) => Plan::parse(&v),
        None => Ok(Plan::Free),
    }
}

pub fn set_plan(conn: &Connection, plan: Plan) -> Result<()> {
    set_setting(conn, "plan", plan.as_str())
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| "BRL".to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_setting(conn, "currency", &ccy.to_uppercase())
}
