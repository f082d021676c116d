//! Aggregates and ratios computed from the resolved columns
//!
//! All values stay untruncated `f64`; truncation to integers happens only
//! when the engine assembles the [`crate::AnalysisResult`]. Every ratio with
//! a zero denominator is 0 rather than an error.

use super::columns::{ColumnRole, ResolvedColumns};
use crate::Dataset;
use serde::Serialize;

/// Untruncated aggregates and ratios for one dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FinancialRatios {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub profit: f64,
    pub profit_margin: f64,
    pub cash_flow_ratio: f64,
    pub debt_ratio: f64,
    pub avg_receivable: f64,
    pub avg_payable: f64,
    /// Average receivables minus average payables
    pub working_capital_gap: f64,
    pub avg_inventory: f64,
}

/// Calculator for [`FinancialRatios`]
pub struct RatioCalculator;

impl RatioCalculator {
    pub fn compute(dataset: &Dataset, columns: &ResolvedColumns) -> FinancialRatios {
        let sum = |role: ColumnRole| columns.get(role).map(|c| dataset.sum(c)).unwrap_or(0.0);
        let mean = |role: ColumnRole| columns.get(role).map(|c| dataset.mean(c)).unwrap_or(0.0);

        let total_revenue = sum(ColumnRole::Revenue);
        let total_expenses = sum(ColumnRole::Expense);
        let profit = total_revenue - total_expenses;

        let debt_ratio = match columns.get(ColumnRole::Loan) {
            Some(loan) => guarded_div(dataset.mean(loan), total_revenue),
            None => 0.0,
        };

        let avg_receivable = mean(ColumnRole::Receivable);
        let avg_payable = mean(ColumnRole::Payable);

        FinancialRatios {
            total_revenue,
            total_expenses,
            profit,
            profit_margin: guarded_div(profit, total_revenue),
            cash_flow_ratio: guarded_div(total_revenue, total_expenses),
            debt_ratio,
            avg_receivable,
            avg_payable,
            working_capital_gap: avg_receivable - avg_payable,
            avg_inventory: mean(ColumnRole::Inventory),
        }
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::columns::ColumnAliases;

    fn dataset(columns: &[&str], rows: Vec<Vec<f64>>) -> Dataset {
        Dataset::new(columns.iter().map(|s| s.to_string()).collect(), rows)
    }

    fn ratios(ds: &Dataset) -> FinancialRatios {
        let resolved = ColumnAliases::default().resolve_all(ds);
        RatioCalculator::compute(ds, &resolved)
    }

    #[test]
    fn two_month_retail_example() {
        let ds = dataset(&["revenue", "expenses"], vec![vec![100.0, 80.0], vec![120.0, 90.0]]);
        let r = ratios(&ds);
        assert_eq!(r.total_revenue, 220.0);
        assert_eq!(r.total_expenses, 170.0);
        assert_eq!(r.profit, 50.0);
        assert!((r.profit_margin - 50.0 / 220.0).abs() < 1e-12);
        assert!((r.cash_flow_ratio - 220.0 / 170.0).abs() < 1e-12);
        assert_eq!(r.debt_ratio, 0.0);
        assert_eq!(r.working_capital_gap, 0.0);
    }

    #[test]
    fn zero_expenses_gives_zero_cash_flow_ratio() {
        let ds = dataset(&["revenue", "expenses"], vec![vec![500.0, 0.0]]);
        let r = ratios(&ds);
        assert_eq!(r.cash_flow_ratio, 0.0);
        assert_eq!(r.profit_margin, 1.0);
    }

    #[test]
    fn zero_revenue_gives_zero_margin_and_debt_ratio() {
        let ds = dataset(&["revenue", "expenses", "loan_amount"], vec![vec![0.0, 40.0, 900.0]]);
        let r = ratios(&ds);
        assert_eq!(r.profit_margin, 0.0);
        assert_eq!(r.debt_ratio, 0.0);
        assert_eq!(r.profit, -40.0);
    }

    #[test]
    fn debt_ratio_uses_mean_loan_over_total_revenue() {
        let ds = dataset(
            &["sales", "cost", "loan_balance"],
            vec![vec![100.0, 50.0, 200.0], vec![100.0, 50.0, 400.0]],
        );
        let r = ratios(&ds);
        // mean loan 300 / revenue 200
        assert_eq!(r.debt_ratio, 1.5);
    }

    #[test]
    fn working_capital_gap_defaults_each_side_to_zero() {
        let ds = dataset(&["receivables"], vec![vec![30.0], vec![50.0]]);
        let r = ratios(&ds);
        assert_eq!(r.avg_receivable, 40.0);
        assert_eq!(r.avg_payable, 0.0);
        assert_eq!(r.working_capital_gap, 40.0);

        let ds = dataset(
            &["accounts_receivable", "accounts_payable"],
            vec![vec![10.0, 25.0], vec![20.0, 35.0]],
        );
        assert_eq!(ratios(&ds).working_capital_gap, -15.0);
    }

    #[test]
    fn missing_columns_default_to_zero() {
        let ds = dataset(&["month", "notes"], vec![vec![1.0, 0.0]]);
        assert_eq!(ratios(&ds), FinancialRatios::default());
    }

    #[test]
    fn inventory_is_averaged() {
        let ds = dataset(&["inventory"], vec![vec![10.0], vec![15.0], vec![35.0]]);
        assert_eq!(ratios(&ds).avg_inventory, 20.0);
    }
}
