//! Leverage: average loan balance above 40% of total revenue.

use super::{Finding, RiskRule, RiskSignals};

pub const MAX_DEBT_RATIO: f64 = 0.4;

pub struct DebtRule;

impl RiskRule for DebtRule {
    fn name(&self) -> &'static str {
        "heavy-debt"
    }

    fn evaluate(&self, signals: &RiskSignals) -> Option<Finding> {
        (signals.debt_ratio > MAX_DEBT_RATIO).then_some(Finding {
            risk: "Heavy dependency on loans",
            recommendation: "Reduce debt and restructure liabilities",
        })
    }
}
