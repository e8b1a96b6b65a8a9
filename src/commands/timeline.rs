// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db;
use crate::engine::aggregate::in_month;
use crate::limits;
use crate::models::TxKind;
use crate::utils::{get_plan, maybe_print_json, parse_month, pretty_table};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    let (year, month) = match sub.get_one::<String>("month") {
        Some(raw) => parse_month(raw.trim())?,
        None => (today.year(), today.month()),
    };

    let months_ahead = (year - today.year()) * 12 + (month as i32 - today.month() as i32);
    let plan = get_plan(conn)?;
    if let Err(limit) = limits::check_lookahead(plan, months_ahead) {
        println!("{}. {}", limit, limits::UPSELL);
        return Ok(());
    }

    let records = db::load_transactions(conn)?;
    let members: Vec<_> = records
        .iter()
        .filter(|t| t.kind != TxKind::Investment && in_month(t, year, month))
        .collect();

    #[derive(Serialize)]
    struct TimelineRow {
        date: String,
        kind: String,
        description: String,
        amount: String,
        installment: String,
    }

    let data: Vec<TimelineRow> = members
        .iter()
        .map(|t| TimelineRow {
            date: t.date.to_string(),
            kind: t.kind.as_str().to_string(),
            description: t.description.clone(),
            amount: t.amount.to_string(),
            installment: t
                .installments
                .map(|i| format!("{}/{}", i.current, i.total))
                .unwrap_or_default(),
        })
        .collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.installment.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Description", "Amount", "Installment"], rows)
        );

        let income: Decimal = members
            .iter()
            .filter(|t| t.kind == TxKind::Income)
            .map(|t| t.amount)
            .sum();
        let expense: Decimal = members
            .iter()
            .filter(|t| t.kind == TxKind::Expense)
            .map(|t| t.amount)
            .sum();
        println!(
            "{}-{:02}: planned income {}, planned expenses {}, balance {}",
            year,
            month,
            income,
            expense,
            income - expense
        );
    }
    Ok(())
}
