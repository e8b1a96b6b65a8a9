// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::db;
use crate::engine::advisor::{PurchaseQuery, analyze};
use crate::models::{Emotion, Importance};
use crate::utils::{maybe_print_json, parse_amount, pretty_table};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let query = PurchaseQuery {
        description: sub.get_one::<String>("description").unwrap().trim().to_string(),
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        importance: Importance::parse(sub.get_one::<String>("importance").unwrap())?,
        emotion: Emotion::parse(sub.get_one::<String>("emotion").unwrap())?,
    };

    let records = db::load_transactions(conn)?;
    let rec = analyze(&query, &records, Utc::now().date_naive());

    if !maybe_print_json(sub.get_flag("json"), false, &rec)? {
        let rows = vec![
            vec!["Purchase".into(), query.description.clone()],
            vec!["Risk".into(), rec.risk.as_str().to_string()],
            vec!["Emotional read".into(), rec.emotional_alert.clone()],
            vec!["Real impact".into(), rec.real_impact.clone()],
            vec!["Suggestion".into(), rec.alternative.clone()],
        ];
        println!("{}", pretty_table(&["", ""], rows));
    }
    Ok(())
}
