//! Risk and recommendation rules
//!
//! Rules run in a fixed order and each appends independently; there is no
//! early exit. When no rule fires, a single "stable" pair is injected so the
//! risk and recommendation lists are never empty.

pub mod cash_flow;
pub mod debt;
pub mod receivables;

pub use cash_flow::CashFlowRule;
pub use debt::DebtRule;
pub use receivables::ReceivablesRule;

use serde::Serialize;

pub const STABLE_RISK: &str = "Financial position is stable";
pub const STABLE_RECOMMENDATION: &str = "Maintain current performance strategy";

/// Inputs the rules look at
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskSignals {
    pub working_capital_gap: f64,
    pub cash_flow_ratio: f64,
    pub debt_ratio: f64,
}

/// A risk paired with the recommendation that addresses it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    pub risk: &'static str,
    pub recommendation: &'static str,
}

/// Trait for risk rules
pub trait RiskRule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Return a finding when the rule's condition holds
    fn evaluate(&self, signals: &RiskSignals) -> Option<Finding>;
}

/// Ordered risks and recommendations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Runs the rule set in order
pub struct RiskAssessor {
    rules: Vec<Box<dyn RiskRule>>,
}

impl RiskAssessor {
    /// Rule set in evaluation order: receivables, cash flow, debt
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(ReceivablesRule),
                Box::new(CashFlowRule),
                Box::new(DebtRule),
            ],
        }
    }

    pub fn assess(&self, signals: &RiskSignals) -> RiskAssessment {
        let mut assessment = RiskAssessment::default();
        for rule in &self.rules {
            if let Some(finding) = rule.evaluate(signals) {
                tracing::debug!(rule = rule.name(), "risk rule fired");
                assessment.risks.push(finding.risk.to_string());
                assessment
                    .recommendations
                    .push(finding.recommendation.to_string());
            }
        }

        if assessment.risks.is_empty() {
            assessment.risks.push(STABLE_RISK.to_string());
        }
        if assessment.recommendations.is_empty() {
            assessment
                .recommendations
                .push(STABLE_RECOMMENDATION.to_string());
        }
        assessment
    }
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure function form of the default rule set
pub fn assess_risks(working_capital_gap: f64, cash_flow_ratio: f64, debt_ratio: f64) -> RiskAssessment {
    RiskAssessor::new().assess(&RiskSignals {
        working_capital_gap,
        cash_flow_ratio,
        debt_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_signals_yield_stable_pair() {
        let a = assess_risks(0.0, 1.294, 0.0);
        assert_eq!(a.risks, vec![STABLE_RISK]);
        assert_eq!(a.recommendations, vec![STABLE_RECOMMENDATION]);
    }

    #[test]
    fn all_rules_fire_in_order() {
        let a = assess_risks(10.0, 0.9, 0.75);
        assert_eq!(
            a.risks,
            vec![
                "High receivables locking business cash flow",
                "Expenses approaching revenue levels",
                "Heavy dependency on loans",
            ]
        );
        assert_eq!(
            a.recommendations,
            vec![
                "Improve collection cycle and invoice follow-ups",
                "Reduce operational costs and boost sales",
                "Reduce debt and restructure liabilities",
            ]
        );
    }

    #[test]
    fn rules_do_not_short_circuit() {
        let a = assess_risks(5.0, 2.0, 0.5);
        assert_eq!(a.risks.len(), 2);
        assert_eq!(a.risks[1], "Heavy dependency on loans");
    }

    #[test]
    fn thresholds_are_strict() {
        // gap == 0, ratio == 1.2, debt == 0.4: nothing fires
        let a = assess_risks(0.0, 1.2, 0.4);
        assert_eq!(a.risks, vec![STABLE_RISK]);
    }

    #[test]
    fn zero_cash_flow_ratio_counts_as_low() {
        // no expenses column -> ratio 0 -> below 1.2
        let a = assess_risks(0.0, 0.0, 0.0);
        assert_eq!(a.risks, vec!["Expenses approaching revenue levels"]);
    }
}
