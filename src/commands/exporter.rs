// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

use crate::db;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("records", sub)) => export_records(conn, sub),
        Some(("goals", sub)) => export_goals(conn, sub),
        _ => Ok(()),
    }
}

fn export_records(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let records = db::load_transactions(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "kind", "description", "amount", "category", "subcategory",
                "recurrence", "installment", "ticker", "emotion",
            ])?;
            for t in &records {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.subcategory.clone().unwrap_or_default(),
                    t.recurrence.as_str().to_string(),
                    t.installments
                        .map(|i| format!("{}/{}", i.current, i.total))
                        .unwrap_or_default(),
                    t.ticker.clone().unwrap_or_default(),
                    t.emotion.map(|e| e.as_str().to_string()).unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&records)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} records to {}", records.len(), out);
    Ok(())
}

fn export_goals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let goals = db::load_goals(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "title", "target", "saved", "deadline", "priority"])?;
            for g in &goals {
                wtr.write_record([
                    g.id.to_string(),
                    g.title.clone(),
                    g.target_amount.to_string(),
                    g.current_amount.to_string(),
                    g.deadline.to_string(),
                    g.priority.as_str().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = goals
                .iter()
                .map(|g| {
                    json!({
                        "id": g.id,
                        "title": g.title,
                        "target": g.target_amount,
                        "saved": g.current_amount,
                        "deadline": g.deadline,
                        "priority": g.priority,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} goals to {}", goals.len(), out);
    Ok(())
}
