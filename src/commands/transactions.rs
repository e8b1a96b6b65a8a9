// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{Datelike, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::engine::recurrence::{Draft, expand};
use crate::limits;
use crate::models::{CATEGORIES, Emotion, TxKind};
use crate::utils::{
    get_plan, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table,
};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = TxKind::parse(sub.get_one::<String>("kind").unwrap())?;
    if kind == TxKind::Investment {
        return Err(anyhow!("Use 'invest add-market' or 'invest add-fixed' for investments"));
    }
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    if !CATEGORIES.iter().any(|c| c.eq_ignore_ascii_case(&category)) {
        eprintln!(
            "Note: '{}' is not a standard category ({})",
            category,
            CATEGORIES.join(", ")
        );
    }
    let subcategory = sub.get_one::<String>("subcategory").map(|s| s.trim().to_string());
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => Utc::now().date_naive(),
    };
    let recurring = sub.get_flag("fixed");
    let installments = match sub.get_one::<String>("months") {
        Some(raw) => {
            let n: u32 = raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid installment count '{}'", raw))?;
            if !(2..=120).contains(&n) {
                return Err(anyhow!("Installments must be between 2 and 120, got {}", n));
            }
            Some(n)
        }
        None => None,
    };
    let emotion = sub
        .get_one::<String>("emotion")
        .map(|s| Emotion::parse(s))
        .transpose()?;

    let records = db::load_transactions(conn)?;
    let plan = get_plan(conn)?;
    if let Err(limit) = limits::check_entry_cap(plan, kind, &records) {
        println!("{}. {}", limit, limits::UPSELL);
        return Ok(());
    }

    let draft = Draft {
        description,
        amount,
        kind,
        category,
        subcategory,
        date,
        recurring,
        installments,
        emotion,
    };
    let slices = expand(&draft);
    let n = db::insert_transactions(conn, &slices)?;
    if n == 1 {
        println!("Recorded {} '{}' on {}", amount, slices[0].description, slices[0].date);
    } else {
        println!(
            "Recorded {} installments of {} from {} to {}",
            n,
            amount,
            slices[0].date,
            slices[n - 1].date
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct RecordRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub recurrence: String,
    pub emotion: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| TxKind::parse(s))
        .transpose()?;
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let category = sub.get_one::<String>("category");

    let records = db::load_transactions(conn)?;
    let data: Vec<RecordRow> = records
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| month.is_none_or(|(y, m)| t.date.year() == y && t.date.month() == m))
        .filter(|t| category.is_none_or(|c| t.category.eq_ignore_ascii_case(c)))
        .map(|t| RecordRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.as_str().to_string(),
            description: t.description.clone(),
            amount: t.amount.to_string(),
            category: t.category.clone(),
            recurrence: t.recurrence.as_str().to_string(),
            emotion: t.emotion.map(|e| e.as_str().to_string()).unwrap_or_default(),
        })
        .collect();

    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.recurrence.clone(),
                    r.emotion.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Kind", "Description", "Amount", "Category", "Recurrence", "Emotion"],
                rows,
            )
        );
    }
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub
        .get_one::<String>("ID")
        .unwrap()
        .parse()
        .map_err(|_| anyhow!("Invalid record id"))?;
    if db::delete_transaction(conn, id)? {
        println!("Deleted record {}", id);
    } else {
        println!("No record with id {}", id);
    }
    Ok(())
}
