//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::{Analysis, AnalysisResult, AnalyzedFile};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single result with exactly the interchange field names
    pub fn report(&self, result: &AnalysisResult) -> String {
        self.to_json(result, "{}")
    }

    /// Report a result together with ratios, resolved columns and cleaning stats
    pub fn report_detailed(&self, analysis: &Analysis) -> String {
        self.to_json(analysis, "{}")
    }

    /// Report with summary
    pub fn report_with_summary(&self, files: &[AnalyzedFile], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results: files.iter().map(JsonFileResult::from).collect(),
            summary: JsonSummary {
                files_analyzed: stats.files_analyzed,
                average_score: stats.average_score,
                average_rating: stats.average_rating().to_string(),
                total_revenue: stats.total_revenue,
                low_risk: stats.low_risk,
                medium_risk: stats.medium_risk,
                high_risk: stats.high_risk,
            },
        };
        self.to_json(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonFileResult<'a> {
    file: String,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

impl<'a> From<&'a AnalyzedFile> for JsonFileResult<'a> {
    fn from(file: &'a AnalyzedFile) -> Self {
        Self {
            file: file.path.display().to_string(),
            result: file.result(),
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: Vec<JsonFileResult<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    files_analyzed: usize,
    average_score: f64,
    average_rating: String,
    total_revenue: i64,
    low_risk: usize,
    medium_risk: usize,
    high_risk: usize,
}
