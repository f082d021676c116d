//! Finhealth: cash-flow health analysis for small-business spreadsheets
//!
//! This library loads a CSV or spreadsheet of cash-flow records, computes a
//! fixed set of financial ratios and a heuristic health score, and derives
//! the risks and recommendations presented on the dashboard and PDF report.

pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod history;
pub mod lookups;
pub mod reporter;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub use analyzer::columns::{ColumnAliases, ColumnRole, ResolvedColumns};
pub use analyzer::ratios::FinancialRatios;
pub use dataset::{CleaningStats, Dataset, DatasetLoadError};

/// Industry label used when none is supplied
pub const DEFAULT_INDUSTRY: &str = "Retail";

/// Compliance label attached to every result (the tax figures are estimates)
pub const TAX_COMPLIANCE_STATUS: &str = "Compliant (Estimated)";

/// The main result of analyzing one dataset.
///
/// Field names are part of the interchange format consumed by the dashboard,
/// the PDF report and the history store, so they are serialized verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub industry: String,
    pub total_revenue: i64,
    pub total_expenses: i64,
    pub profit: i64,
    /// Weighted heuristic, rounded to 2 decimals. Not clamped to 0-100.
    pub financial_health_score: f64,
    pub forecasted_revenue_next_month: i64,
    pub avg_inventory: i64,
    pub estimated_gst: i64,
    pub tax_deduction: i64,
    pub net_tax_payable: i64,
    pub tax_compliance_status: String,
    pub credit_rating: CreditRating,
    #[serde(default)]
    pub banking_api_data: Map<String, Value>,
    #[serde(default)]
    pub gst_filing_data: Map<String, Value>,
    pub investor_summary: String,
    /// Never empty
    pub risks: Vec<String>,
    /// Never empty
    pub recommendations: Vec<String>,
}

/// Three-tier risk label derived solely from the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditRating {
    #[serde(rename = "Low Risk")]
    LowRisk,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl CreditRating {
    /// Tier boundaries are inclusive on the lower side
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            CreditRating::LowRisk
        } else if score >= 50.0 {
            CreditRating::MediumRisk
        } else {
            CreditRating::HighRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditRating::LowRisk => "Low Risk",
            CreditRating::MediumRisk => "Medium Risk",
            CreditRating::HighRisk => "High Risk",
        }
    }
}

impl std::fmt::Display for CreditRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Full output of one engine run: the result plus the intermediate values
/// that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub ratios: FinancialRatios,
    pub columns: ResolvedColumns,
    pub cleaning: CleaningStats,
}

/// An analysis tied to the file it was loaded from
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub analysis: Analysis,
}

impl AnalyzedFile {
    pub fn result(&self) -> &AnalysisResult {
        &self.analysis.result
    }
}

/// Format a score the way it appears in summaries: at least one decimal
/// place, otherwise the shortest exact representation (`30.0`, `77.91`).
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}

/// Public API: analyze a single dataset file with the built-in column aliases
/// and no external lookups.
///
/// * `path` - CSV or spreadsheet file
/// * `industry` - free-text industry label; `None` means "Retail"
pub fn financial_analysis(
    path: &Path,
    industry: Option<&str>,
) -> Result<AnalysisResult, DatasetLoadError> {
    let engine = analyzer::AnalysisEngine::new();
    let analysis = engine.analyze(path, industry.unwrap_or(DEFAULT_INDUSTRY))?;
    Ok(analysis.result)
}
