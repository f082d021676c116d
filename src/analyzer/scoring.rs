//! Health score calculation

use super::ratios::FinancialRatios;
use crate::CreditRating;

/// Weight of the profit margin term
const PROFIT_MARGIN_WEIGHT: f64 = 40.0;
/// Weight of the cash flow ratio term
const CASH_FLOW_WEIGHT: f64 = 30.0;
/// Weight of the inverse debt ratio term
const DEBT_WEIGHT: f64 = 30.0;

/// Calculator for the financial health score
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Weighted heuristic rounded to 2 decimals.
    ///
    /// The result is not clamped: a large cash flow ratio or a
    /// negative debt ratio pushes it outside 0-100.
    pub fn health_score(profit_margin: f64, cash_flow_ratio: f64, debt_ratio: f64) -> f64 {
        round2(
            profit_margin * PROFIT_MARGIN_WEIGHT
                + cash_flow_ratio * CASH_FLOW_WEIGHT
                + (1.0 - debt_ratio) * DEBT_WEIGHT,
        )
    }

    pub fn from_ratios(ratios: &FinancialRatios) -> f64 {
        Self::health_score(ratios.profit_margin, ratios.cash_flow_ratio, ratios.debt_ratio)
    }

    /// Get a description of the credit rating
    pub fn rating_description(rating: CreditRating) -> &'static str {
        match rating {
            CreditRating::LowRisk => "Healthy margins and cash cover - low lending risk",
            CreditRating::MediumRisk => "Adequate position with some pressure on cash or margins",
            CreditRating::HighRisk => "Weak cash cover or heavy leverage - high lending risk",
        }
    }
}

/// Round to 2 decimal places on the exact binary value, ties to even.
///
/// Scaling by 100 first would round the product instead, so `2.675`
/// (stored just below the tie) would come out as 2.68.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_month_retail_score() {
        let score = ScoreCalculator::health_score(50.0 / 220.0, 220.0 / 170.0, 0.0);
        assert_eq!(score, 77.91);
        assert_eq!(CreditRating::from_score(score), CreditRating::LowRisk);
    }

    #[test]
    fn all_zero_ratios_score_thirty() {
        assert_eq!(ScoreCalculator::health_score(0.0, 0.0, 0.0), 30.0);
    }

    #[test]
    fn engineered_threshold_scores() {
        // 30 + 1.5 * 30 = 75
        let low = ScoreCalculator::health_score(0.0, 1.5, 0.0);
        assert_eq!(low, 75.0);
        assert_eq!(CreditRating::from_score(low), CreditRating::LowRisk);

        // 30 + (2/3) * 30 = 50
        let medium = ScoreCalculator::health_score(0.0, 2.0 / 3.0, 0.0);
        assert_eq!(medium, 50.0);
        assert_eq!(CreditRating::from_score(medium), CreditRating::MediumRisk);

        // 50 - 0.01
        let high = ScoreCalculator::health_score(-0.01 / 40.0, 2.0 / 3.0, 0.0);
        assert_eq!(high, 49.99);
        assert_eq!(CreditRating::from_score(high), CreditRating::HighRisk);
    }

    #[test]
    fn score_is_unbounded() {
        // revenue 10x expenses, no debt
        assert!(ScoreCalculator::health_score(0.9, 10.0, 0.0) > 100.0);
        // heavy losses and leverage
        assert!(ScoreCalculator::health_score(-5.0, 0.1, 4.0) < 0.0);
        // negative debt ratio inflates the score
        assert_eq!(ScoreCalculator::health_score(0.0, 0.0, -1.0), 60.0);
    }

    #[test]
    fn round2_ties_go_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-568.125), -568.12);
    }

    #[test]
    fn round2_uses_exact_binary_value() {
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(12.0), 12.0);
    }

    #[test]
    fn rating_description_all_ratings() {
        assert!(ScoreCalculator::rating_description(CreditRating::LowRisk).contains("low"));
        assert!(ScoreCalculator::rating_description(CreditRating::MediumRisk).contains("Adequate"));
        assert!(ScoreCalculator::rating_description(CreditRating::HighRisk).contains("high"));
    }
}
