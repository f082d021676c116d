//! Analysis history - persist results to .finhealth-history.json

use crate::analyzer::ratios::guarded_div;
use crate::analyzer::scoring::round2;
use crate::{format_score, AnalysisResult, AnalyzedFile, CreditRating};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const HISTORY_FILENAME: &str = ".finhealth-history.json";
const MAX_RUNS: usize = 50;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct HistoryFile {
    pub runs: Vec<StoredAnalysis>,
}

/// One persisted analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub timestamp: String,
    pub source_file: String,
    pub industry: String,
    pub total_revenue: i64,
    pub total_expenses: i64,
    pub profit: i64,
    pub profit_margin: f64,
    pub cash_flow_ratio: f64,
    /// Placeholder, always 0.0
    pub debt_ratio: f64,
    pub financial_health_score: f64,
    pub credit_rating: CreditRating,
}

impl StoredAnalysis {
    /// Build a record from a result; ratios are derived from the integer fields
    pub fn from_result(source_file: &Path, result: &AnalysisResult, timestamp: String) -> Self {
        let revenue = result.total_revenue as f64;
        Self {
            timestamp,
            source_file: source_file.to_string_lossy().to_string(),
            industry: result.industry.clone(),
            total_revenue: result.total_revenue,
            total_expenses: result.total_expenses,
            profit: result.profit,
            profit_margin: guarded_div(result.profit as f64, revenue),
            cash_flow_ratio: guarded_div(revenue, result.total_expenses as f64),
            debt_ratio: 0.0,
            financial_health_score: result.financial_health_score,
            credit_rating: result.credit_rating,
        }
    }
}

/// JSON-file backed history. A disabled store never touches the filesystem.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// Store at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store at the default file name inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(HISTORY_FILENAME))
    }

    /// No-op store
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load history (empty when disabled, missing or corrupt)
    pub fn load(&self) -> HistoryFile {
        let Some(ref path) = self.path else {
            return HistoryFile::default();
        };
        match read_history(path) {
            Ok(history) => history,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable history file");
                HistoryFile::default()
            }
        }
    }

    /// Most recent stored score for a file
    pub fn previous_score(&self, file: &Path) -> Option<f64> {
        previous_score(&self.load(), file)
    }

    /// Append analyses and save. Failures are logged, never returned.
    pub fn record(&self, files: &[AnalyzedFile]) {
        let Some(ref path) = self.path else {
            return;
        };
        // An unreadable file is left as is rather than replaced
        let mut history = match read_history(path) {
            Ok(history) => history,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "history file unreadable, not recording run");
                return;
            }
        };
        let timestamp = chrono::Utc::now().to_rfc3339();
        for file in files {
            history.runs.push(StoredAnalysis::from_result(
                &file.path,
                file.result(),
                timestamp.clone(),
            ));
        }
        if history.runs.len() > MAX_RUNS {
            history.runs.drain(0..history.runs.len() - MAX_RUNS);
        }

        let content = serde_json::to_string_pretty(&history).unwrap_or_else(|_| "{}".to_string());
        if let Err(e) = fs::write(path, content) {
            warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }
}

/// Parse the history file; a missing file is an empty history
fn read_history(path: &Path) -> anyhow::Result<HistoryFile> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HistoryFile::default()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

/// Latest stored score for a file
pub fn previous_score(history: &HistoryFile, file: &Path) -> Option<f64> {
    let key = file.to_string_lossy();
    history
        .runs
        .iter()
        .rev()
        .find(|run| run.source_file == key)
        .map(|run| run.financial_health_score)
}

/// Format delta for console: "[was 61.2, up 4.3]", "[was 61.2, down 3.0]" or ""
pub fn format_delta(previous: Option<f64>, current: f64) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    let diff = round2(current - prev);
    if diff == 0.0 {
        return format!(" [unchanged at {}]", format_score(current));
    }
    if diff > 0.0 {
        format!(" [was {}, up {}]", format_score(prev), format_score(diff))
    } else {
        format!(" [was {}, down {}]", format_score(prev), format_score(-diff))
    }
}
