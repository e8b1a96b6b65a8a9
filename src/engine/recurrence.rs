// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::db::NewTransaction;
use crate::models::{Emotion, Installments, Recurrence, TxKind};

/// A user-entered transaction intent before expansion. `recurring` marks a
/// perpetual fixed-monthly item; `installments` an N-month plan. Setting
/// both is the fixed-income shape from the income form: slices are emitted
/// without the "(i/n)" suffix.
#[derive(Debug, Clone)]
pub struct Draft {
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub date: NaiveDate,
    pub recurring: bool,
    pub installments: Option<u32>,
    pub emotion: Option<Emotion>,
}

/// Materialize a draft into the concrete records to persist.
///
/// - no recurrence, no installments: one record, recurrence NONE.
/// - recurring: one record, recurrence MONTHLY (retroactive month
///   recognition covers all future months; no extra rows are ever created).
/// - installments n >= 2: n records, recurrence NONE, each dated i calendar
///   months after the original date (day clamped to the target month's end),
///   tagged {current: i+1, total: n}.
/// - installments n <= 1 degrades to the non-installment cases.
///
/// Pure function; the caller assigns ids and persists.
pub fn expand(draft: &Draft) -> Vec<NewTransaction> {
    let base = NewTransaction {
        description: draft.description.clone(),
        amount: draft.amount,
        kind: draft.kind,
        category: draft.category.clone(),
        subcategory: draft.subcategory.clone(),
        date: draft.date,
        recurrence: if draft.recurring {
            Recurrence::Monthly
        } else {
            Recurrence::None
        },
        installments: None,
        ticker: None,
        quantity: None,
        price_per_unit: None,
        yield_type: None,
        yield_rate: None,
        current_value: None,
        investment_type: None,
        purchase_date: None,
        emotion: draft.emotion,
    };

    let total = draft.installments.unwrap_or(0);
    if total < 2 {
        return vec![base];
    }

    let bare_label = draft.recurring && draft.kind == TxKind::Income;
    (0..total)
        .map(|i| {
            let mut slice = base.clone();
            slice.date = add_months(draft.date, i);
            slice.recurrence = Recurrence::None;
            slice.installments = Some(Installments {
                current: i + 1,
                total,
            });
            if !bare_label {
                slice.description = format!("{} ({}/{})", draft.description, i + 1, total);
            }
            slice
        })
        .collect()
}

/// Calendar-month advance from the original date, clamping the day to the
/// target month's end (Jan 31 -> Feb 29 in a leap year -> Mar 31).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}
