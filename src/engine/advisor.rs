// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::models::{Emotion, Importance, RiskLevel, Transaction, TxKind};

/// A purchase the user is considering, before any money moves.
#[derive(Debug, Clone)]
pub struct PurchaseQuery {
    pub description: String,
    pub amount: Decimal,
    pub importance: Importance,
    pub emotion: Emotion,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub risk: RiskLevel,
    pub emotional_alert: String,
    pub real_impact: String,
    pub alternative: String,
}

/// Income minus expense for the current calendar month, floored at zero.
/// This deliberately uses a plain same-month filter, not the recurring-item
/// recognition the aggregation view applies.
fn free_balance(records: &[Transaction], today: NaiveDate) -> Decimal {
    let (year, month) = (today.year(), today.month());
    let monthly = |kind: TxKind| -> Decimal {
        records
            .iter()
            .filter(|t| t.kind == kind && t.date.year() == year && t.date.month() == month)
            .map(|t| t.amount)
            .sum()
    };
    (monthly(TxKind::Income) - monthly(TxKind::Expense)).max(Decimal::ZERO)
}

fn impact_pct(amount: Decimal, free: Decimal) -> f64 {
    if free == Decimal::ZERO {
        return 100.0;
    }
    (amount / free * Decimal::from(100)).to_f64().unwrap_or(100.0)
}

/// Rule-based purchase triage. The rules fire in order and the first match
/// wins; reordering them changes the verdicts, so the order is a contract.
pub fn analyze(query: &PurchaseQuery, records: &[Transaction], today: NaiveDate) -> Recommendation {
    let free = free_balance(records, today);
    let impact = impact_pct(query.amount, free);

    let similar_bad = records
        .iter()
        .filter(|t| {
            t.kind == TxKind::Expense
                && t.emotion == Some(query.emotion)
                && t.emotion.map(|e| e.is_negative()).unwrap_or(false)
        })
        .count();

    let real_impact = if free < query.amount {
        format!(
            "This purchase exceeds your free balance for the month ({} available).",
            free
        )
    } else {
        format!("This consumes {:.1}% of your free balance.", impact)
    };

    if similar_bad >= 3 {
        return Recommendation {
            risk: RiskLevel::High,
            emotional_alert: format!(
                "You already have {} purchases tagged with this feeling. This looks like a repeating pattern, not a one-off.",
                similar_bad
            ),
            real_impact,
            alternative: "Wait 48 hours. If you still want it after the pause, revisit with a clear head.".into(),
        };
    }

    if query.importance == Importance::Desire && query.emotion.is_negative() {
        return Recommendation {
            risk: RiskLevel::High,
            emotional_alert:
                "You may be compensating for how you feel right now with a purchase.".into(),
            real_impact,
            alternative:
                "Sleep on it for 24 hours. The urge usually fades faster than the money returns."
                    .into(),
        };
    }

    if query.importance == Importance::Desire && impact > 30.0 {
        return Recommendation {
            risk: RiskLevel::Medium,
            emotional_alert: "No emotional red flag, but this is a big bite for a want.".into(),
            real_impact,
            alternative: "Consider deferring to next month or finding a cheaper version.".into(),
        };
    }

    if query.importance == Importance::Need {
        let alternative = if free >= query.amount {
            "It fits your free balance. Go ahead.".to_string()
        } else {
            "It is a need, but the money is not there this month. Look for ways to cover it first."
                .to_string()
        };
        return Recommendation {
            risk: RiskLevel::Low,
            emotional_alert: "Needs rarely carry emotional risk.".into(),
            real_impact,
            alternative,
        };
    }

    Recommendation {
        risk: RiskLevel::Medium,
        emotional_alert: "Nothing alarming, but pause for a moment before buying.".into(),
        real_impact,
        alternative: "Ask yourself what this purchase changes a month from now.".into(),
    }
}
