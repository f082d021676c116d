//! Fixed-rate tax estimate
//!
//! A heuristic, not a tax computation: flat GST on revenue minus a flat
//! deduction, with no jurisdiction logic.

use serde::Serialize;

pub const GST_RATE: f64 = 0.18;
pub const DEDUCTION_RATE: f64 = 0.02;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TaxEstimate {
    pub estimated_gst: f64,
    pub tax_deduction: f64,
    pub net_tax_payable: f64,
}

impl TaxEstimate {
    pub fn from_revenue(total_revenue: f64) -> Self {
        let estimated_gst = total_revenue * GST_RATE;
        let tax_deduction = total_revenue * DEDUCTION_RATE;
        Self {
            estimated_gst,
            tax_deduction,
            net_tax_payable: estimated_gst - tax_deduction,
        }
    }
}
