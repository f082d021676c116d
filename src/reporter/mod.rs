//! Reporter module for output formatting

pub mod console;
pub mod html;
pub mod i18n;
pub mod json;
pub mod pdf;

pub use console::ConsoleReporter;
pub use html::HtmlReporter;
pub use i18n::{narrative, Language, Narrative};
pub use json::JsonReporter;
pub use pdf::PdfReporter;

use crate::{format_score, AnalysisResult};

/// Financial highlight lines shared by the dashboard and the PDF report
pub fn highlights(result: &AnalysisResult) -> Vec<(&'static str, String)> {
    vec![
        ("Total Revenue", result.total_revenue.to_string()),
        ("Total Expenses", result.total_expenses.to_string()),
        ("Net Profit", result.profit.to_string()),
        (
            "Forecasted Revenue",
            result.forecasted_revenue_next_month.to_string(),
        ),
        ("Health Score", format_score(result.financial_health_score)),
        ("Credit Rating", result.credit_rating.to_string()),
    ]
}
