// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use crate::models::{Goal, Transaction, TxKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Diamond => "DIAMOND",
        }
    }
}

type Predicate = fn(&[Transaction], &[Goal], i32) -> bool;

/// A badge is a pure predicate over the current collections and score.
/// Nothing records historical unlocks: a badge locks again if its predicate
/// later fails.
pub struct BadgeDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: Tier,
    pub predicate: Predicate,
}

fn any_record(records: &[Transaction], _goals: &[Goal], _score: i32) -> bool {
    !records.is_empty()
}

fn income_exceeds_expense(records: &[Transaction], _goals: &[Goal], _score: i32) -> bool {
    let income: Decimal = records
        .iter()
        .filter(|t| t.kind == TxKind::Income)
        .map(|t| t.amount)
        .sum();
    let expense: Decimal = records
        .iter()
        .filter(|t| t.kind == TxKind::Expense)
        .map(|t| t.amount)
        .sum();
    income > expense && income > Decimal::ZERO
}

fn any_investment(records: &[Transaction], _goals: &[Goal], _score: i32) -> bool {
    records.iter().any(|t| t.kind == TxKind::Investment)
}

fn any_goal(_records: &[Transaction], goals: &[Goal], _score: i32) -> bool {
    !goals.is_empty()
}

fn elite_score(_records: &[Transaction], _goals: &[Goal], score: i32) -> bool {
    score >= 800
}

fn diversified(records: &[Transaction], _goals: &[Goal], _score: i32) -> bool {
    let types: HashSet<&str> = records
        .iter()
        .filter(|t| t.kind == TxKind::Investment)
        .filter_map(|t| t.investment_type.as_deref())
        .collect();
    types.len() >= 2
}

fn whale(records: &[Transaction], _goals: &[Goal], _score: i32) -> bool {
    let invested: Decimal = records
        .iter()
        .filter(|t| t.kind == TxKind::Investment)
        .map(|t| t.amount)
        .sum();
    invested >= Decimal::from(10_000)
}

pub const BADGES: &[BadgeDef] = &[
    BadgeDef {
        id: "FIRST_STEP",
        title: "First Step",
        description: "Record your first transaction.",
        tier: Tier::Bronze,
        predicate: any_record,
    },
    BadgeDef {
        id: "SAVER",
        title: "Natural Saver",
        description: "Keep lifetime income above lifetime expenses.",
        tier: Tier::Bronze,
        predicate: income_exceeds_expense,
    },
    BadgeDef {
        id: "INVESTOR_INIT",
        title: "Future Secured",
        description: "Make your first investment.",
        tier: Tier::Silver,
        predicate: any_investment,
    },
    BadgeDef {
        id: "GOAL_SETTER",
        title: "Visionary",
        description: "Create at least one savings goal.",
        tier: Tier::Silver,
        predicate: any_goal,
    },
    BadgeDef {
        id: "SCORE_MASTER",
        title: "Elite Score",
        description: "Reach a financial score of 800 or more.",
        tier: Tier::Gold,
        predicate: elite_score,
    },
    BadgeDef {
        id: "DIVERSIFIER",
        title: "Diversifier",
        description: "Invest in at least two different asset types.",
        tier: Tier::Gold,
        predicate: diversified,
    },
    BadgeDef {
        id: "WHALE",
        title: "Whale",
        description: "Accumulate 10,000 or more in total investments.",
        tier: Tier::Diamond,
        predicate: whale,
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelDef {
    pub min: i32,
    pub max: i32,
    pub title: &'static str,
}

// Contiguous ranges partitioning [0, 1000].
pub const LEVELS: &[LevelDef] = &[
    LevelDef { min: 0, max: 450, title: "Apprentice" },
    LevelDef { min: 451, max: 650, title: "Explorer" },
    LevelDef { min: 651, max: 780, title: "Strategist" },
    LevelDef { min: 781, max: 850, title: "Magnate" },
    LevelDef { min: 851, max: 1000, title: "Legend" },
];

pub fn level_for(score: i32) -> &'static LevelDef {
    LEVELS
        .iter()
        .find(|l| score >= l.min && score <= l.max)
        .unwrap_or(&LEVELS[0])
}

/// Evaluate every badge predicate against the current state. Re-run in full
/// on each call; no unlock state is kept anywhere.
pub fn unlocked(records: &[Transaction], goals: &[Goal], score: i32) -> Vec<&'static BadgeDef> {
    BADGES
        .iter()
        .filter(|b| (b.predicate)(records, goals, score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Recurrence};
    use chrono::NaiveDate;

    fn tx(kind: TxKind, amount: i64) -> Transaction {
        Transaction {
            id: 0,
            description: "t".into(),
            amount: Decimal::from(amount),
            kind,
            category: "Others".into(),
            subcategory: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            recurrence: Recurrence::None,
            installments: None,
            ticker: None,
            quantity: None,
            price_per_unit: None,
            yield_type: None,
            yield_rate: None,
            current_value: None,
            investment_type: None,
            purchase_date: None,
            emotion: None,
        }
    }

    fn goal() -> Goal {
        Goal {
            id: 1,
            title: "Trip".into(),
            target_amount: Decimal::from(5000),
            current_amount: Decimal::ZERO,
            deadline: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            priority: Priority::Medium,
        }
    }

    fn ids(badges: &[&'static BadgeDef]) -> Vec<&'static str> {
        badges.iter().map(|b| b.id).collect()
    }

    #[test]
    fn empty_state_unlocks_nothing() {
        assert!(unlocked(&[], &[], 400).is_empty());
    }

    #[test]
    fn first_record_and_saver_unlock_together() {
        let records = vec![tx(TxKind::Income, 100)];
        let got = ids(&unlocked(&records, &[], 400));
        assert!(got.contains(&"FIRST_STEP"));
        assert!(got.contains(&"SAVER"));
        assert!(!got.contains(&"INVESTOR_INIT"));
    }

    #[test]
    fn badges_lock_again_when_predicates_fail() {
        let saving = vec![tx(TxKind::Income, 100)];
        assert!(ids(&unlocked(&saving, &[], 400)).contains(&"SAVER"));
        let overspent = vec![tx(TxKind::Income, 100), tx(TxKind::Expense, 200)];
        assert!(!ids(&unlocked(&overspent, &[], 400)).contains(&"SAVER"));
    }

    #[test]
    fn diversifier_needs_two_distinct_types() {
        let mut a = tx(TxKind::Investment, 1000);
        a.investment_type = Some("Stocks".into());
        let mut b = tx(TxKind::Investment, 1000);
        b.investment_type = Some("Stocks".into());
        assert!(!ids(&unlocked(&[a.clone(), b], &[], 400)).contains(&"DIVERSIFIER"));
        let mut c = tx(TxKind::Investment, 1000);
        c.investment_type = Some("Crypto".into());
        assert!(ids(&unlocked(&[a, c], &[], 400)).contains(&"DIVERSIFIER"));
    }

    #[test]
    fn whale_threshold_is_inclusive() {
        let records = vec![tx(TxKind::Investment, 10_000)];
        assert!(ids(&unlocked(&records, &[], 400)).contains(&"WHALE"));
    }

    #[test]
    fn goal_setter_tracks_goal_collection() {
        assert!(ids(&unlocked(&[], &[goal()], 400)).contains(&"GOAL_SETTER"));
    }

    #[test]
    fn levels_partition_the_score_range() {
        for s in 0..=1000 {
            let matches = LEVELS
                .iter()
                .filter(|l| s >= l.min && s <= l.max)
                .count();
            assert_eq!(matches, 1, "score {} matched {} levels", s, matches);
        }
        assert_eq!(level_for(400).title, "Apprentice");
        assert_eq!(level_for(451).title, "Explorer");
        assert_eq!(level_for(850).title, "Magnate");
    }
}
