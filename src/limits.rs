// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Free-tier caps. These are expected business rules, not failures: callers
//! block the action and print an upsell line instead of propagating an error.

use thiserror::Error;

use crate::models::{Plan, Transaction, TxKind};

pub const FREE_MAX_INCOME_ENTRIES: usize = 2;
pub const FREE_MAX_EXPENSE_ENTRIES: usize = 5;
pub const FREE_MAX_LOOKAHEAD_MONTHS: i32 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanLimit {
    #[error("the free plan allows at most {0} income entries")]
    IncomeEntries(usize),
    #[error("the free plan allows at most {0} expense entries")]
    ExpenseEntries(usize),
    #[error("the free plan can only plan {0} months ahead")]
    LookaheadMonths(i32),
}

pub const UPSELL: &str = "Upgrade to Premium for unlimited access.";

pub fn check_entry_cap(plan: Plan, kind: TxKind, records: &[Transaction]) -> Result<(), PlanLimit> {
    if plan == Plan::Premium {
        return Ok(());
    }
    let count = records.iter().filter(|t| t.kind == kind).count();
    match kind {
        TxKind::Income if count >= FREE_MAX_INCOME_ENTRIES => {
            Err(PlanLimit::IncomeEntries(FREE_MAX_INCOME_ENTRIES))
        }
        TxKind::Expense if count >= FREE_MAX_EXPENSE_ENTRIES => {
            Err(PlanLimit::ExpenseEntries(FREE_MAX_EXPENSE_ENTRIES))
        }
        _ => Ok(()),
    }
}

/// `months_ahead` is the signed month distance from today's month to the
/// queried month; past months are always allowed.
pub fn check_lookahead(plan: Plan, months_ahead: i32) -> Result<(), PlanLimit> {
    if plan == Plan::Free && months_ahead > FREE_MAX_LOOKAHEAD_MONTHS {
        return Err(PlanLimit::LookaheadMonths(FREE_MAX_LOOKAHEAD_MONTHS));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn income(n: usize) -> Vec<Transaction> {
        (0..n)
            .map(|i| Transaction {
                id: i as i64,
                description: format!("income {}", i),
                amount: Decimal::from(100),
                kind: TxKind::Income,
                category: "Salary".into(),
                subcategory: None,
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                recurrence: crate::models::Recurrence::None,
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
            })
            .collect()
    }

    #[test]
    fn free_plan_caps_income_entries() {
        let records = income(2);
        assert_eq!(
            check_entry_cap(Plan::Free, TxKind::Income, &records),
            Err(PlanLimit::IncomeEntries(2))
        );
        assert!(check_entry_cap(Plan::Premium, TxKind::Income, &records).is_ok());
    }

    #[test]
    fn lookahead_allows_past_and_near_future() {
        assert!(check_lookahead(Plan::Free, -6).is_ok());
        assert!(check_lookahead(Plan::Free, 3).is_ok());
        assert_eq!(
            check_lookahead(Plan::Free, 4),
            Err(PlanLimit::LookaheadMonths(3))
        );
        assert!(check_lookahead(Plan::Premium, 24).is_ok());
    }
}
