// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxKind {
    Income,
    Expense,
    Investment,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "INCOME",
            TxKind::Expense => "EXPENSE",
            TxKind::Investment => "INVESTMENT",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(TxKind::Income),
            "EXPENSE" => Ok(TxKind::Expense),
            "INVESTMENT" => Ok(TxKind::Investment),
            other => Err(anyhow!(
                "Unknown transaction type '{}' (use income|expense|investment)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recurrence {
    None,
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "NONE",
            Recurrence::Monthly => "MONTHLY",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(Recurrence::None),
            "MONTHLY" => Ok(Recurrence::Monthly),
            other => Err(anyhow!("Unknown recurrence '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum YieldType {
    Cdi,
    Ipca,
    Pre,
}

impl YieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            YieldType::Cdi => "CDI",
            YieldType::Ipca => "IPCA",
            YieldType::Pre => "PRE",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "CDI" => Ok(YieldType::Cdi),
            "IPCA" => Ok(YieldType::Ipca),
            "PRE" => Ok(YieldType::Pre),
            other => Err(anyhow!("Unknown yield type '{}' (use cdi|ipca|pre)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Emotion {
    Neutral,
    Happy,
    Anxious,
    Bored,
    Sad,
    Regret,
    Impulsive,
    Proud,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "NEUTRAL",
            Emotion::Happy => "HAPPY",
            Emotion::Anxious => "ANXIOUS",
            Emotion::Bored => "BORED",
            Emotion::Sad => "SAD",
            Emotion::Regret => "REGRET",
            Emotion::Impulsive => "IMPULSIVE",
            Emotion::Proud => "PROUD",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NEUTRAL" => Ok(Emotion::Neutral),
            "HAPPY" => Ok(Emotion::Happy),
            "ANXIOUS" => Ok(Emotion::Anxious),
            "BORED" => Ok(Emotion::Bored),
            "SAD" => Ok(Emotion::Sad),
            "REGRET" => Ok(Emotion::Regret),
            "IMPULSIVE" => Ok(Emotion::Impulsive),
            "PROUD" => Ok(Emotion::Proud),
            other => Err(anyhow!("Unknown emotion '{}'", other)),
        }
    }

    /// Emotional states historically correlated with regretted purchases.
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Emotion::Impulsive | Emotion::Anxious | Emotion::Sad | Emotion::Bored
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            other => Err(anyhow!("Unknown priority '{}' (use high|medium|low)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    Free,
    Premium,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "FREE",
            Plan::Premium => "PREMIUM",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "FREE" => Ok(Plan::Free),
            "PREMIUM" => Ok(Plan::Premium),
            other => Err(anyhow!("Unknown plan '{}' (use free|premium)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Importance {
    Need,
    Desire,
}

impl Importance {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NEED" => Ok(Importance::Need),
            "DESIRE" => Ok(Importance::Desire),
            other => Err(anyhow!("Unknown importance '{}' (use need|desire)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

/// One materialized slice of a multi-month installment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installments {
    pub current: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub date: NaiveDate,
    pub recurrence: Recurrence,
    pub installments: Option<Installments>,
    // Market-traded investment fields
    pub ticker: Option<String>,
    pub quantity: Option<Decimal>,
    pub price_per_unit: Option<Decimal>,
    // Fixed-income investment fields
    pub yield_type: Option<YieldType>,
    pub yield_rate: Option<Decimal>,
    // Mark-to-market value; stays at cost basis until refreshed
    pub current_value: Option<Decimal>,
    pub investment_type: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub emotion: Option<Emotion>,
}

impl Transaction {
    /// Mark-to-market value, falling back to cost basis.
    pub fn market_value(&self) -> Decimal {
        self.current_value.unwrap_or(self.amount)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub priority: Priority,
}

/// Categories surfaced in CLI help; used for grouping only, never control flow.
pub const CATEGORIES: &[&str] = &[
    "Housing",
    "Food",
    "Transport",
    "Health",
    "Education",
    "Leisure",
    "Salary",
    "Side Income",
    "Investments",
    "Utilities",
    "Others",
];
