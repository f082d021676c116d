//! Investor summary sentence

use crate::{format_score, CreditRating};

/// Deterministic one-paragraph summary. Not localized.
pub fn investor_summary(
    industry: &str,
    total_revenue: i64,
    profit: i64,
    score: f64,
    rating: CreditRating,
) -> String {
    format!(
        "The {} business generated total revenue of {} with net profit of {}. \
         Health score {} indicating {}. Strong long-term potential.",
        industry,
        total_revenue,
        profit,
        format_score(score),
        rating
    )
}
