// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::db::{self, NewTransaction};
use crate::engine::projection::{MacroRates, QuoteSnapshot, project};
use crate::models::{Recurrence, TxKind, YieldType};
use crate::utils::{
    get_currency, http_client, maybe_print_json, parse_amount, parse_date, parse_decimal,
    pretty_table, validate_ticker,
};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add-market", sub)) => add_market(conn, sub)?,
        Some(("add-fixed", sub)) => add_fixed(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("refresh", sub)) => refresh(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add_market(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let ticker = validate_ticker(sub.get_one::<String>("ticker").unwrap())?;
    let quantity = parse_amount(sub.get_one::<String>("quantity").unwrap())?;
    let price = parse_amount(sub.get_one::<String>("price").unwrap())?;
    let asset_type = sub
        .get_one::<String>("asset-type")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "Stocks".to_string());
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => Utc::now().date_naive(),
    };

    let cost = quantity * price;
    let record = NewTransaction {
        description: description.clone(),
        amount: cost,
        kind: TxKind::Investment,
        category: "Investments".to_string(),
        subcategory: Some(asset_type.clone()),
        date,
        recurrence: Recurrence::None,
        installments: None,
        ticker: Some(ticker.clone()),
        quantity: Some(quantity),
        price_per_unit: Some(price),
        yield_type: None,
        yield_rate: None,
        current_value: Some(cost),
        investment_type: Some(asset_type),
        purchase_date: Some(date),
        emotion: None,
    };
    db::insert_transactions(conn, &[record])?;
    println!("Added {} x {} @ {} ({})", quantity, ticker, price, description);
    Ok(())
}

fn add_fixed(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let yield_type = YieldType::parse(sub.get_one::<String>("yield-type").unwrap())?;
    let rate = parse_amount(sub.get_one::<String>("rate").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => Utc::now().date_naive(),
    };

    let record = NewTransaction {
        description: description.clone(),
        amount,
        kind: TxKind::Investment,
        category: "Investments".to_string(),
        subcategory: Some("Fixed Income".to_string()),
        date,
        recurrence: Recurrence::None,
        installments: None,
        ticker: None,
        quantity: None,
        price_per_unit: None,
        yield_type: Some(yield_type),
        yield_rate: Some(rate),
        current_value: Some(amount),
        investment_type: Some("Fixed Income".to_string()),
        purchase_date: Some(date),
        emotion: None,
    };
    db::insert_transactions(conn, &[record])?;
    println!(
        "Added fixed-income '{}' of {} at {} {}",
        description,
        amount,
        rate,
        yield_type.as_str()
    );
    Ok(())
}

#[derive(Serialize)]
struct PositionRow {
    id: i64,
    description: String,
    asset_type: String,
    ticker: String,
    cost_basis: String,
    current_value: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ccy = get_currency(conn)?;
    let records = db::load_transactions(conn)?;
    let data: Vec<PositionRow> = records
        .iter()
        .filter(|t| t.kind == TxKind::Investment)
        .map(|t| PositionRow {
            id: t.id,
            description: t.description.clone(),
            asset_type: t.investment_type.clone().unwrap_or_default(),
            ticker: t.ticker.clone().unwrap_or_default(),
            cost_basis: t.amount.round_dp(2).to_string(),
            current_value: t.market_value().round_dp(2).to_string(),
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
                    r.description.clone(),
                    r.asset_type.clone(),
                    r.ticker.clone(),
                    r.cost_basis.clone(),
                    r.current_value.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Description", "Type", "Ticker", "Cost", "Value"],
                rows,
            )
        );
        println!("Values in {}", ccy);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct YahooResponse {
    quoteResponse: QuoteResponse,
}
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    result: Vec<YahooQuote>,
}
#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    symbol: Option<String>,
}

fn fetch_yahoo_prices(tickers: &[String]) -> Result<HashMap<String, Decimal>> {
    let url = format!(
        "https://query1.finance.yahoo.com/v7/finance/quote?symbols={}",
        tickers.join(",")
    );
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let yr: YahooResponse = resp.json()?;

    let mut prices = HashMap::new();
    for q in yr.quoteResponse.result {
        if let (Some(sym), Some(px)) = (q.symbol, q.regular_market_price) {
            if let Some(px_decimal) = Decimal::from_f64_retain(px) {
                prices.insert(sym, px_decimal);
            }
        }
    }
    Ok(prices)
}

#[derive(Debug, Deserialize)]
struct SgsPoint {
    valor: String,
}

// Central-bank time series: 432 SELIC target, 4389 CDI (annual), 13522
// IPCA accumulated 12 months. All published as percentages.
fn fetch_sgs_rate(series: u32) -> Result<f64> {
    let url = format!(
        "https://api.bcb.gov.br/dados/serie/bcdata.sgs.{}/dados/ultimos/1?formato=json",
        series
    );
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let points: Vec<SgsPoint> = resp.json()?;
    let last = points
        .last()
        .with_context(|| format!("Empty SGS series {}", series))?;
    let pct: f64 = last
        .valor
        .trim()
        .parse()
        .with_context(|| format!("Invalid SGS value '{}'", last.valor))?;
    Ok(pct / 100.0)
}

fn macro_rates(sub: &clap::ArgMatches, offline: bool) -> MacroRates {
    let mut rates = MacroRates::default();
    if !offline {
        if let Ok(selic) = fetch_sgs_rate(432) {
            rates.selic = selic;
        }
        if let Ok(cdi) = fetch_sgs_rate(4389) {
            rates.cdi = cdi;
        }
        if let Ok(ipca) = fetch_sgs_rate(13522) {
            rates.ipca = ipca;
        }
    }
    if let Some(raw) = sub.get_one::<String>("selic") {
        if let Ok(v) = raw.parse() {
            rates.selic = v;
        }
    }
    if let Some(raw) = sub.get_one::<String>("cdi") {
        if let Ok(v) = raw.parse() {
            rates.cdi = v;
        }
    }
    if let Some(raw) = sub.get_one::<String>("ipca") {
        if let Ok(v) = raw.parse() {
            rates.ipca = v;
        }
    }
    rates
}

fn parse_price_override(raw: &str) -> Result<(String, Decimal)> {
    let (ticker, price) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid price override '{}', expected TICKER=PRICE", raw))?;
    Ok((validate_ticker(ticker)?, parse_decimal(price.trim())?))
}

fn refresh(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let offline = sub.get_flag("offline");
    let today = Utc::now().date_naive();

    let records = db::load_transactions(conn)?;
    let investments: Vec<_> = records
        .iter()
        .filter(|t| t.kind == TxKind::Investment)
        .collect();
    if investments.is_empty() {
        println!("No investments to refresh");
        return Ok(());
    }

    let mut prices: HashMap<String, Decimal> = HashMap::new();
    let tickers: Vec<String> = {
        let mut seen = Vec::new();
        for t in &investments {
            if let Some(ticker) = &t.ticker {
                if !seen.contains(ticker) {
                    seen.push(ticker.clone());
                }
            }
        }
        seen
    };
    if !offline && !tickers.is_empty() {
        match fetch_yahoo_prices(&tickers) {
            Ok(fetched) => prices.extend(fetched),
            Err(e) => eprintln!("Quote fetch failed ({}); keeping stored values", e),
        }
    }
    if let Some(overrides) = sub.get_many::<String>("price") {
        for raw in overrides {
            let (ticker, price) = parse_price_override(raw)?;
            prices.insert(ticker, price);
        }
    }

    let quotes = QuoteSnapshot {
        prices,
        rates: macro_rates(sub, offline),
    };

    let mut updated = 0usize;
    for t in &investments {
        let value = project(t, &quotes, today).round_dp(2);
        if value != t.market_value().round_dp(2) {
            db::update_current_value(conn, t.id, value)?;
            updated += 1;
        }
    }
    println!(
        "Refreshed {} of {} positions (SELIC {:.2}%, CDI {:.2}%, IPCA {:.2}%)",
        updated,
        investments.len(),
        quotes.rates.selic * 100.0,
        quotes.rates.cdi * 100.0,
        quotes.rates.ipca * 100.0
    );
    Ok(())
}
