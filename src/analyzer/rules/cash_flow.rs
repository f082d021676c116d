//! Thin cash cover: revenue less than 1.2x expenses.

use super::{Finding, RiskRule, RiskSignals};

pub const MIN_CASH_FLOW_RATIO: f64 = 1.2;

pub struct CashFlowRule;

impl RiskRule for CashFlowRule {
    fn name(&self) -> &'static str {
        "low-cash-flow"
    }

    fn evaluate(&self, signals: &RiskSignals) -> Option<Finding> {
        (signals.cash_flow_ratio < MIN_CASH_FLOW_RATIO).then_some(Finding {
            risk: "Expenses approaching revenue levels",
            recommendation: "Reduce operational costs and boost sales",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(ratio: f64) -> RiskSignals {
        RiskSignals {
            cash_flow_ratio: ratio,
            ..RiskSignals::default()
        }
    }

    #[test]
    fn boundary_is_exclusive() {
        assert!(CashFlowRule.evaluate(&signals(1.19)).is_some());
        assert!(CashFlowRule.evaluate(&signals(1.2)).is_none());
        assert!(CashFlowRule.evaluate(&signals(3.0)).is_none());
    }
}
