// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::Plan;
use crate::utils::{get_currency, get_plan, pretty_table, set_currency, set_plan};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-plan", sub)) => {
            let plan = Plan::parse(sub.get_one::<String>("PLAN").unwrap())?;
            set_plan(conn, plan)?;
            println!("Plan set to {}", plan.as_str());
        }
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("CURRENCY").unwrap();
            set_currency(conn, ccy)?;
            println!("Currency set to {}", ccy.to_uppercase());
        }
        Some(("show", _)) => {
            let rows = vec![
                vec!["Plan".into(), get_plan(conn)?.as_str().to_string()],
                vec!["Currency".into(), get_currency(conn)?],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
