// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::json;

use crate::db;
use crate::engine::aggregate::Aggregates;
use crate::models::Plan;
use crate::utils::{get_currency, get_plan, http_client};

const FALLBACK: &str =
    "Sorry, I could not generate an insight right now. Your numbers are still on the dashboard.";

fn model_for(plan: Plan) -> &'static str {
    match plan {
        Plan::Free => "gemini-2.5-flash",
        Plan::Premium => "gemini-3-pro-preview",
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}
#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}
#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}
#[derive(Deserialize)]
struct Part {
    text: String,
}

fn generate(prompt: &str, model: &str) -> Result<String> {
    let key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        model, key
    );
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });
    let client = http_client()?;
    let resp = client.post(url).json(&body).send()?.error_for_status()?;
    let parsed: GenerateResponse = resp.json()?;
    let text = parsed
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.trim().to_string())
        .context("Empty model response")?;
    Ok(text)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let today = Utc::now().date_naive();
    let records = db::load_transactions(conn)?;
    let agg = Aggregates::compute(&records, today);
    let ccy = get_currency(conn)?;
    let plan = get_plan(conn)?;

    let prompt = format!(
        "You are a concise personal finance coach. This month the user earned \
         {} {}, spent {} {} and holds {} {} in investments (net worth {} {}). \
         In at most three sentences, give one specific, actionable observation \
         about their finances. No greetings, no disclaimers.",
        agg.monthly_income,
        ccy,
        agg.monthly_expense,
        ccy,
        agg.total_invested,
        ccy,
        agg.net_worth,
        ccy
    );

    // Degrade to the fallback line on any failure; this view never errors out.
    match generate(&prompt, model_for(plan)) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", FALLBACK),
    }
    Ok(())
}
