// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::engine::aggregate::Aggregates;
use crate::engine::badges::{BADGES, level_for, unlocked};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    let records = db::load_transactions(conn)?;
    let goals = db::load_goals(conn)?;
    let agg = Aggregates::compute(&records, today);
    let earned = unlocked(&records, &goals, agg.score);
    let level = level_for(agg.score);

    #[derive(Serialize)]
    struct BadgeRow {
        id: &'static str,
        title: &'static str,
        tier: String,
        unlocked: bool,
        description: &'static str,
    }

    let data: Vec<BadgeRow> = BADGES
        .iter()
        .map(|b| BadgeRow {
            id: b.id,
            title: b.title,
            tier: b.tier.as_str().to_string(),
            unlocked: earned.iter().any(|e| e.id == b.id),
            description: b.description,
        })
        .collect();

    if !maybe_print_json(sub.get_flag("json"), false, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    if r.unlocked { "*".into() } else { String::new() },
                    r.title.to_string(),
                    r.tier.clone(),
                    r.description.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "Badge", "Tier", "How"], rows));
        println!(
            "Level: {} (score {}), {}/{} badges unlocked",
            level.title,
            agg.score,
            earned.len(),
            BADGES.len()
        );
    }
    Ok(())
}
