// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use nestegg::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut conn, sub)?,
        Some(("invest", sub)) => commands::investments::handle(&mut conn, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, sub)?,
        Some(("timeline", sub)) => commands::timeline::handle(&conn, sub)?,
        Some(("advise", sub)) => commands::advisor::handle(&conn, sub)?,
        Some(("badges", sub)) => commands::badges::handle(&conn, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&conn, sub)?,
        Some(("insight", _)) => commands::insight::handle(&conn)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
