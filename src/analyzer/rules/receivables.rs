//! Receivables locking up cash: average receivables exceed average payables.

use super::{Finding, RiskRule, RiskSignals};

/// Fires when the working capital gap is positive
pub struct ReceivablesRule;

impl RiskRule for ReceivablesRule {
    fn name(&self) -> &'static str {
        "high-receivables"
    }

    fn evaluate(&self, signals: &RiskSignals) -> Option<Finding> {
        (signals.working_capital_gap > 0.0).then_some(Finding {
            risk: "High receivables locking business cash flow",
            recommendation: "Improve collection cycle and invoice follow-ups",
        })
    }
}
