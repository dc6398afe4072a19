// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, get_shop_name, pretty_table, set_setting};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["shop_name".to_string(), get_shop_name(conn)?],
                vec!["currency".to_string(), get_currency(conn)?],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-shop-name", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                return Err(anyhow!("Shop name cannot be empty"));
            }
            set_setting(conn, "shop_name", name)?;
            println!("Shop name set to '{}'", name);
        }
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().trim().to_uppercase();
            if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Invalid currency code '{}', expected e.g. INR", ccy));
            }
            set_setting(conn, "currency", &ccy)?;
            println!("Report currency set to {}", ccy);
        }
        _ => {}
    }
    Ok(())
}
