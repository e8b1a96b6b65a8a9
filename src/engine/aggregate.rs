// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Recurrence, Transaction, TxKind};
use crate::utils::month_end;

pub const SCORE_MIN: i32 = 0;
pub const SCORE_MAX: i32 = 850;

/// Derived view over the full record set for a reference date. Recomputed
/// from scratch on every call; holds no state of its own.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregates {
    pub monthly_income: Decimal,
    pub monthly_expense: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_invested: Decimal,
    pub liquid_cash: Decimal,
    pub net_worth: Decimal,
    pub score: i32,
}

/// A record counts toward the reference month when it is dated inside it,
/// or when it is a MONTHLY fixed item that has already started (dated on or
/// before the month's last day). Installment slices carry their own dates,
/// so they need no special case here.
pub fn in_month(tx: &Transaction, year: i32, month: u32) -> bool {
    let same_month = tx.date.year() == year && tx.date.month() == month;
    let started_recurring = tx.recurrence == Recurrence::Monthly
        && month_end(year, month).is_ok_and(|end| tx.date <= end);
    same_month || started_recurring
}

fn sum_by_kind<'a>(records: impl Iterator<Item = &'a Transaction>, kind: TxKind) -> Decimal {
    records
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

impl Aggregates {
    pub fn compute(records: &[Transaction], today: NaiveDate) -> Aggregates {
        let (year, month) = (today.year(), today.month());

        let monthly: Vec<&Transaction> =
            records.iter().filter(|t| in_month(t, year, month)).collect();
        let monthly_income = sum_by_kind(monthly.iter().copied(), TxKind::Income);
        let monthly_expense = sum_by_kind(monthly.iter().copied(), TxKind::Expense);

        let settled: Vec<&Transaction> = records.iter().filter(|t| t.date <= today).collect();
        let total_income = sum_by_kind(settled.iter().copied(), TxKind::Income);
        let total_expense = sum_by_kind(settled.iter().copied(), TxKind::Expense);
        let total_invested = sum_by_kind(settled.iter().copied(), TxKind::Investment);

        let liquid_cash = total_income - total_expense - total_invested;
        let invested_market: Decimal = settled
            .iter()
            .filter(|t| t.kind == TxKind::Investment)
            .map(|t| t.market_value())
            .sum();
        let net_worth = liquid_cash + invested_market;

        let score = financial_score(monthly_income, monthly_expense, total_invested);

        Aggregates {
            monthly_income,
            monthly_expense,
            total_income,
            total_expense,
            total_invested,
            liquid_cash,
            net_worth,
            score,
        }
    }
}

/// Rule-based 0-850 scorecard. The thresholds and additive weights are a
/// contract, not tunable defaults.
pub fn financial_score(
    monthly_income: Decimal,
    monthly_expense: Decimal,
    total_invested: Decimal,
) -> i32 {
    let balance = monthly_income - monthly_expense;
    let savings_rate = if monthly_income > Decimal::ZERO {
        (monthly_income - monthly_expense) / monthly_income * Decimal::from(100)
    } else {
        Decimal::ZERO
    };

    let mut score = 400;
    if balance > Decimal::ZERO {
        score += 150;
    }
    if total_invested > Decimal::ZERO {
        score += 100;
    }
    if savings_rate > Decimal::from(20) {
        score += 150;
    } else if savings_rate > Decimal::ZERO {
        score += 50;
    }
    if monthly_expense > monthly_income {
        score -= 100;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}
