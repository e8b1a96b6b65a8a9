// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::db;
use crate::models::TxKind;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();
    let records = db::load_transactions(conn)?;

    for t in &records {
        // An investment must be exactly one of market-traded or fixed-income
        if t.kind == TxKind::Investment {
            let market = t.ticker.is_some() && t.quantity.is_some();
            let fixed = t.yield_type.is_some() && t.yield_rate.is_some();
            if market && fixed {
                rows.push(vec![
                    "ambiguous_investment".into(),
                    format!("record {} has both ticker and yield fields", t.id),
                ]);
            }
            if !market && !fixed {
                rows.push(vec![
                    "bare_investment".into(),
                    format!("record {} has neither ticker nor yield fields", t.id),
                ]);
            }
        } else if t.ticker.is_some() || t.yield_type.is_some() {
            rows.push(vec![
                "investment_fields_on_non_investment".into(),
                format!("record {} is {}", t.id, t.kind.as_str()),
            ]);
        }

        if let Some(inst) = t.installments {
            if inst.total < 2 || inst.current == 0 || inst.current > inst.total {
                rows.push(vec![
                    "bad_installment_tag".into(),
                    format!("record {} tagged {}/{}", t.id, inst.current, inst.total),
                ]);
            }
        }

        if t.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("record {} amount {}", t.id, t.amount),
            ]);
        }
    }

    let goals = db::load_goals(conn)?;
    for g in &goals {
        if g.target_amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_goal_target".into(),
                format!("goal {} target {}", g.id, g.target_amount),
            ]);
        }
        if g.current_amount < Decimal::ZERO {
            rows.push(vec![
                "negative_goal_balance".into(),
                format!("goal {} holds {}", g.id, g.current_amount),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
