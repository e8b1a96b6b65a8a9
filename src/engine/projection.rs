// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;

use crate::models::{Transaction, YieldType};

// Fallback macro rates (annual fractions) when the quote collaborator is
// unavailable or returns partial data.
pub const DEFAULT_SELIC: f64 = 0.1125;
pub const DEFAULT_CDI: f64 = 0.1115;
pub const DEFAULT_IPCA: f64 = 0.045;

#[derive(Debug, Clone, Copy)]
pub struct MacroRates {
    pub selic: f64,
    pub cdi: f64,
    pub ipca: f64,
}

impl Default for MacroRates {
    fn default() -> Self {
        MacroRates {
            selic: DEFAULT_SELIC,
            cdi: DEFAULT_CDI,
            ipca: DEFAULT_IPCA,
        }
    }
}

/// A point-in-time view of the market: unit prices per ticker plus macro
/// annual rates. Tickers missing from `prices` leave positions unchanged.
#[derive(Debug, Clone, Default)]
pub struct QuoteSnapshot {
    pub prices: HashMap<String, Decimal>,
    pub rates: MacroRates,
}

/// Mark one investment record to market.
///
/// Market-traded positions value at quoted price x quantity. Fixed-income
/// positions accrue compound interest over elapsed calendar days / 365 (a
/// plain division, not a banking day-count convention): PRE rates are the
/// annual percentage itself, CDI/IPCA rates scale the index by the
/// percentage-of-index (110 = "110% of CDI"). When neither branch applies
/// the stored value is kept. Cost basis (`amount`) is never touched.
pub fn project(tx: &Transaction, quotes: &QuoteSnapshot, today: NaiveDate) -> Decimal {
    if let (Some(ticker), Some(quantity)) = (&tx.ticker, tx.quantity) {
        if let Some(price) = quotes.prices.get(ticker) {
            return *price * quantity;
        }
    }

    if let (Some(yield_type), Some(yield_rate)) = (tx.yield_type, tx.yield_rate) {
        let elapsed_days = (today - tx.date).num_days();
        if elapsed_days <= 0 {
            return tx.amount;
        }
        let years = elapsed_days as f64 / 365.0;
        let pct = yield_rate.to_f64().unwrap_or(0.0) / 100.0;
        let annual = match yield_type {
            YieldType::Pre => pct,
            YieldType::Cdi => quotes.rates.cdi * pct,
            YieldType::Ipca => quotes.rates.ipca * pct,
        };
        let grown = tx.amount.to_f64().unwrap_or(0.0) * (1.0 + annual).powf(years);
        return Decimal::from_f64_retain(grown)
            .map(|d| d.round_dp(2))
            .unwrap_or_else(|| tx.market_value());
    }

    tx.market_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Recurrence, TxKind};

    fn investment(amount: i64, date: &str) -> Transaction {
        Transaction {
            id: 0,
            description: "asset".into(),
            amount: Decimal::from(amount),
            kind: TxKind::Investment,
            category: "Investments".into(),
            subcategory: None,
            date: date.parse().unwrap(),
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

    #[test]
    fn market_position_values_at_price_times_quantity() {
        let mut tx = investment(1000, "2025-01-01");
        tx.ticker = Some("PETR4".into());
        tx.quantity = Some(Decimal::from(25));
        let mut quotes = QuoteSnapshot::default();
        quotes.prices.insert("PETR4".into(), "38.50".parse().unwrap());
        let v = project(&tx, &quotes, "2025-06-01".parse().unwrap());
        assert_eq!(v, "962.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn missing_quote_leaves_value_unchanged() {
        let mut tx = investment(1000, "2025-01-01");
        tx.ticker = Some("VALE3".into());
        tx.quantity = Some(Decimal::from(10));
        tx.current_value = Some(Decimal::from(1080));
        let v = project(&tx, &QuoteSnapshot::default(), "2025-06-01".parse().unwrap());
        assert_eq!(v, Decimal::from(1080));
    }

    #[test]
    fn pre_fixed_one_year_compounds_exactly() {
        let mut tx = investment(1000, "2024-06-01");
        tx.yield_type = Some(YieldType::Pre);
        tx.yield_rate = Some(Decimal::from(12));
        // 365 elapsed days, so delta-years is exactly 1.0
        let v = project(&tx, &QuoteSnapshot::default(), "2025-06-01".parse().unwrap());
        assert_eq!(v, Decimal::from(1120));
    }

    #[test]
    fn zero_elapsed_days_returns_cost_basis_exactly() {
        let mut tx = investment(1000, "2025-06-01");
        tx.yield_type = Some(YieldType::Cdi);
        tx.yield_rate = Some(Decimal::from(110));
        let v = project(&tx, &QuoteSnapshot::default(), "2025-06-01".parse().unwrap());
        assert_eq!(v, Decimal::from(1000));
    }

    #[test]
    fn cdi_rate_scales_by_percentage_of_index() {
        let mut tx = investment(1000, "2024-06-01");
        tx.yield_type = Some(YieldType::Cdi);
        tx.yield_rate = Some(Decimal::from(110));
        let quotes = QuoteSnapshot {
            prices: HashMap::new(),
            rates: MacroRates {
                selic: 0.10,
                cdi: 0.10,
                ipca: 0.04,
            },
        };
        // 110% of a 10% CDI = 11% effective annual over one 365-day year
        let v = project(&tx, &quotes, "2025-06-01".parse().unwrap());
        assert_eq!(v, Decimal::from(1110));
    }

    #[test]
    fn bare_investment_keeps_stored_value() {
        let mut tx = investment(500, "2025-01-01");
        tx.current_value = Some(Decimal::from(510));
        let v = project(&tx, &QuoteSnapshot::default(), "2025-06-01".parse().unwrap());
        assert_eq!(v, Decimal::from(510));
    }

    #[test]
    fn default_snapshot_carries_the_fallback_rates() {
        let quotes = QuoteSnapshot::default();
        assert!(quotes.prices.is_empty());
        assert_eq!(quotes.rates.selic, DEFAULT_SELIC);
        assert_eq!(quotes.rates.cdi, DEFAULT_CDI);
        assert_eq!(quotes.rates.ipca, DEFAULT_IPCA);
    }

    #[test]
    fn projection_is_idempotent_for_a_fixed_snapshot() {
        let mut tx = investment(2500, "2023-09-15");
        tx.yield_type = Some(YieldType::Ipca);
        tx.yield_rate = Some(Decimal::from(100));
        let quotes = QuoteSnapshot::default();
        let today = "2025-06-01".parse().unwrap();
        assert_eq!(project(&tx, &quotes, today), project(&tx, &quotes, today));
    }
}
