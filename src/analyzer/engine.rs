//! Analysis engine - orchestrates loading, ratios, forecast, scoring and rules

use crate::config::Config;
use crate::dataset::{CleaningStats, Dataset, DatasetLoadError};
use crate::lookups::{fetch_or_empty, FinancialDataSource, HttpSource, NoopSource};
use crate::{
    Analysis, AnalysisResult, AnalyzedFile, CreditRating, TAX_COMPLIANCE_STATUS,
};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::columns::{ColumnAliases, ColumnRole};
use super::forecast::forecast_next;
use super::ratios::RatioCalculator;
use super::rules::{RiskAssessor, RiskSignals};
use super::summary::investor_summary;
use super::tax::TaxEstimate;
use super::ScoreCalculator;

/// Main analysis engine.
///
/// Stateless across calls: every analysis is independent, so one engine can
/// be shared between threads.
pub struct AnalysisEngine {
    aliases: ColumnAliases,
    assessor: RiskAssessor,
    bank: Box<dyn FinancialDataSource>,
    gst: Box<dyn FinancialDataSource>,
}

impl AnalysisEngine {
    /// Create an engine with built-in aliases and no external lookups
    pub fn new() -> Self {
        Self {
            aliases: ColumnAliases::default(),
            assessor: RiskAssessor::new(),
            bank: Box::new(NoopSource),
            gst: Box::new(NoopSource),
        }
    }

    /// Build an engine from config: extra column aliases and lookup endpoints
    pub fn from_config(config: &Config) -> Self {
        let mut engine = Self::new().with_aliases(config.column_aliases());
        let timeout = Duration::from_secs(config.lookups.timeout_secs());
        if let Some(ref url) = config.lookups.bank_url {
            engine = engine.with_bank_source(HttpSource::new("bank", url.clone()).timeout(timeout));
        }
        if let Some(ref url) = config.lookups.gst_url {
            engine = engine.with_gst_source(HttpSource::new("gst", url.clone()).timeout(timeout));
        }
        engine
    }

    /// Replace the column alias table
    pub fn with_aliases(mut self, aliases: ColumnAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Set the banking data source
    pub fn with_bank_source(mut self, source: impl FinancialDataSource + 'static) -> Self {
        self.bank = Box::new(source);
        self
    }

    /// Set the GST filing data source
    pub fn with_gst_source(mut self, source: impl FinancialDataSource + 'static) -> Self {
        self.gst = Box::new(source);
        self
    }

    /// Load a dataset file and analyze it
    pub fn analyze(&self, path: &Path, industry: &str) -> Result<Analysis, DatasetLoadError> {
        let (dataset, cleaning) = Dataset::load(path)?;
        debug!(
            path = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.columns().len(),
            "loaded dataset"
        );
        Ok(self.evaluate(&dataset, industry, cleaning))
    }

    /// Analyze a file and keep its path alongside the analysis
    pub fn analyze_file(&self, path: &Path, industry: &str) -> Result<AnalyzedFile, DatasetLoadError> {
        let analysis = self.analyze(path, industry)?;
        Ok(AnalyzedFile {
            path: path.to_path_buf(),
            analysis,
        })
    }

    /// Analyze an in-memory dataset
    pub fn analyze_dataset(&self, dataset: &Dataset, industry: &str) -> Analysis {
        self.evaluate(dataset, industry, CleaningStats::default())
    }

    fn evaluate(&self, dataset: &Dataset, industry: &str, cleaning: CleaningStats) -> Analysis {
        let columns = self.aliases.resolve_all(dataset);
        debug!(?columns, "resolved columns");

        let ratios = RatioCalculator::compute(dataset, &columns);
        debug!(?ratios, "computed ratios");

        let score = ScoreCalculator::from_ratios(&ratios);
        let credit_rating = CreditRating::from_score(score);

        let revenue_values = columns
            .get(ColumnRole::Revenue)
            .and_then(|name| dataset.column(name));
        let forecast = forecast_next(revenue_values.as_deref());

        let tax = TaxEstimate::from_revenue(ratios.total_revenue);

        let banking_api_data = fetch_or_empty(self.bank.as_ref());
        let gst_filing_data = fetch_or_empty(self.gst.as_ref());

        let assessment = self.assessor.assess(&RiskSignals {
            working_capital_gap: ratios.working_capital_gap,
            cash_flow_ratio: ratios.cash_flow_ratio,
            debt_ratio: ratios.debt_ratio,
        });

        let total_revenue = truncate(ratios.total_revenue);
        let total_expenses = truncate(ratios.total_expenses);
        // Keeps profit == total_revenue - total_expenses on the integer fields
        let profit = total_revenue.saturating_sub(total_expenses);

        let result = AnalysisResult {
            industry: industry.to_string(),
            total_revenue,
            total_expenses,
            profit,
            financial_health_score: score,
            forecasted_revenue_next_month: truncate(forecast),
            avg_inventory: truncate(ratios.avg_inventory),
            estimated_gst: truncate(tax.estimated_gst),
            tax_deduction: truncate(tax.tax_deduction),
            net_tax_payable: truncate(tax.net_tax_payable),
            tax_compliance_status: TAX_COMPLIANCE_STATUS.to_string(),
            credit_rating,
            banking_api_data,
            gst_filing_data,
            investor_summary: investor_summary(industry, total_revenue, profit, score, credit_rating),
            risks: assessment.risks,
            recommendations: assessment.recommendations,
        };

        Analysis {
            result,
            ratios,
            columns,
            cleaning,
        }
    }

    /// Calculate aggregate statistics across multiple files
    pub fn aggregate_stats(files: &[AnalyzedFile]) -> AggregateStats {
        if files.is_empty() {
            return AggregateStats::default();
        }

        let mut stats = AggregateStats {
            files_analyzed: files.len(),
            ..AggregateStats::default()
        };
        let mut score_sum = 0.0;
        for file in files {
            let result = file.result();
            score_sum += result.financial_health_score;
            stats.total_revenue = stats.total_revenue.saturating_add(result.total_revenue);
            match result.credit_rating {
                CreditRating::LowRisk => stats.low_risk += 1,
                CreditRating::MediumRisk => stats.medium_risk += 1,
                CreditRating::HighRisk => stats.high_risk += 1,
            }
        }
        stats.average_score = super::scoring::round2(score_sum / files.len() as f64);
        stats
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate toward zero. Non-finite values saturate (NaN becomes 0).
pub fn truncate(value: f64) -> i64 {
    value as i64
}

/// Aggregate statistics for multiple files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStats {
    pub files_analyzed: usize,
    pub average_score: f64,
    pub total_revenue: i64,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
}

impl AggregateStats {
    /// Rating of the average score
    pub fn average_rating(&self) -> CreditRating {
        CreditRating::from_score(self.average_score)
    }
}
