// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{Datelike, Months, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use crate::db;
use crate::models::{Priority, Transaction, TxKind};
use crate::utils::{get_currency, maybe_print_json, parse_amount, parse_date, pretty_table};

const EMERGENCY_TITLE: &str = "Emergency Fund";

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("emergency", sub)) => emergency(conn, sub)?,
        Some(("deposit", sub)) => deposit(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
    let deadline = parse_date(sub.get_one::<String>("deadline").unwrap().trim())?;
    let priority = sub
        .get_one::<String>("priority")
        .map(|s| Priority::parse(s))
        .transpose()?
        .unwrap_or(Priority::Medium);

    let id = db::insert_goal(conn, &title, target, deadline, priority)?;
    println!("Created goal {} '{}' targeting {} by {}", id, title, target, deadline);
    Ok(())
}

/// Average monthly spend over the months that actually have expenses, times
/// the coverage window. History-free databases get a refusal, not a zero goal.
pub fn emergency_target(records: &[Transaction], coverage_months: u32) -> Option<Decimal> {
    let expenses: Vec<&Transaction> =
        records.iter().filter(|t| t.kind == TxKind::Expense).collect();
    if expenses.is_empty() {
        return None;
    }
    let total: Decimal = expenses.iter().map(|t| t.amount).sum();
    let months: HashSet<(i32, u32)> = expenses
        .iter()
        .map(|t| (t.date.year(), t.date.month()))
        .collect();
    let avg = total / Decimal::from(months.len() as u64);
    Some((avg * Decimal::from(coverage_months)).round_dp(2))
}

fn emergency(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let coverage: u32 = match sub.get_one::<String>("months") {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid coverage months '{}'", raw))?,
        None => 6,
    };
    if coverage == 0 {
        return Err(anyhow!("Coverage must be at least one month"));
    }

    let goals = db::load_goals(conn)?;
    if goals.iter().any(|g| g.title == EMERGENCY_TITLE) {
        println!("An '{}' goal already exists; deposit into it instead.", EMERGENCY_TITLE);
        return Ok(());
    }

    let records = db::load_transactions(conn)?;
    let Some(target) = emergency_target(&records, coverage) else {
        println!("No expense history yet; record some expenses first.");
        return Ok(());
    };

    let today = Utc::now().date_naive();
    let deadline = today.checked_add_months(Months::new(12)).unwrap_or(today);
    let id = db::insert_goal(conn, EMERGENCY_TITLE, target, deadline, Priority::High)?;
    println!(
        "Created goal {} '{}': {} ({} months of average spending) by {}",
        id, EMERGENCY_TITLE, target, coverage, deadline
    );
    Ok(())
}

fn deposit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub
        .get_one::<String>("ID")
        .unwrap()
        .parse()
        .map_err(|_| anyhow!("Invalid goal id"))?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let updated = db::deposit_to_goal(conn, id, amount)?;
    println!("Goal {} now holds {}", id, updated);
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub
        .get_one::<String>("ID")
        .unwrap()
        .parse()
        .map_err(|_| anyhow!("Invalid goal id"))?;
    if db::delete_goal(conn, id)? {
        println!("Deleted goal {}", id);
    } else {
        println!("No goal with id {}", id);
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    id: i64,
    title: String,
    target: String,
    saved: String,
    progress_pct: String,
    deadline: String,
    priority: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ccy = get_currency(conn)?;
    let goals = db::load_goals(conn)?;
    let data: Vec<GoalRow> = goals
        .iter()
        .map(|g| {
            let pct = if g.target_amount > Decimal::ZERO {
                (g.current_amount / g.target_amount * Decimal::from(100)).round_dp(1)
            } else {
                Decimal::ZERO
            };
            GoalRow {
                id: g.id,
                title: g.title.clone(),
                target: g.target_amount.round_dp(2).to_string(),
                saved: g.current_amount.round_dp(2).to_string(),
                progress_pct: pct.to_string(),
                deadline: g.deadline.to_string(),
                priority: g.priority.as_str().to_string(),
            }
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
                    r.title.clone(),
                    r.target.clone(),
                    r.saved.clone(),
                    format!("{}%", r.progress_pct),
                    r.deadline.clone(),
                    r.priority.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Title", "Target", "Saved", "Progress", "Deadline", "Priority"],
                rows,
            )
        );
        println!("Amounts in {}", ccy);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;

    fn expense(amount: i64, date: &str) -> Transaction {
        Transaction {
            id: 0,
            description: "e".into(),
            amount: Decimal::from(amount),
            kind: TxKind::Expense,
            category: "Others".into(),
            subcategory: None,
            date: date.parse().unwrap(),
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

    #[test]
    fn emergency_target_averages_over_active_months() {
        // 900 over Jan, 1100 over Feb: average 1000/month, 6 months coverage
        let records = vec![
            expense(400, "2025-01-05"),
            expense(500, "2025-01-20"),
            expense(1100, "2025-02-10"),
        ];
        assert_eq!(
            emergency_target(&records, 6),
            Some(Decimal::from(6000))
        );
    }

    #[test]
    fn emergency_target_needs_expense_history() {
        assert_eq!(emergency_target(&[], 6), None);
        let mut income = expense(1000, "2025-01-01");
        income.kind = TxKind::Income;
        assert_eq!(emergency_target(&[income], 6), None);
    }
}
