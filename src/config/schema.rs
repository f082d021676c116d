//! Config schema and deserialization

use crate::analyzer::columns::{ColumnAliases, ColumnRole};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default timeout for external lookups, in seconds
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;

/// History store configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Record each run (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// History file location (default: next to the input)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl HistoryConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// External lookup endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl LookupConfig {
    pub fn is_empty(&self) -> bool {
        self.bank_url.is_none() && self.gst_url.is_none() && self.timeout_secs.is_none()
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS)
    }
}

/// Per-path override configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Industry label for matched files
    #[serde(default)]
    pub industry: Option<String>,

    /// Threshold for matched files
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Root config structure for .finhealthrc.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Default industry label. Default: "Retail"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// Default report language code. Default: "en"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Minimum acceptable health score (exit 1 if below)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Extra column aliases per role name, e.g. `{ "revenue": ["turnover"] }`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<String, Vec<String>>,

    /// Glob patterns for files/directories to exclude when scanning
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default, skip_serializing_if = "LookupConfig::is_empty")]
    pub lookups: LookupConfig,

    /// Per-path overrides, applied in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_industry: Option<&str>,
        cli_language: Option<&str>,
        cli_threshold: Option<f64>,
    ) -> Self {
        if let Some(industry) = cli_industry {
            self.industry = Some(industry.to_string());
            // An explicit industry beats per-file overrides too
            for override_cfg in &mut self.overrides {
                override_cfg.industry = None;
            }
        }
        if let Some(language) = cli_language {
            self.language = Some(language.to_string());
        }
        if let Some(threshold) = cli_threshold {
            self.threshold = Some(threshold);
            for override_cfg in &mut self.overrides {
                override_cfg.threshold = None;
            }
        }
        self
    }

    pub fn industry(&self) -> &str {
        self.industry.as_deref().unwrap_or(crate::DEFAULT_INDUSTRY)
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("en")
    }

    /// Built-in aliases followed by the configured extras.
    ///
    /// Unknown role names are skipped with a warning.
    pub fn column_aliases(&self) -> ColumnAliases {
        let mut aliases = ColumnAliases::default();
        for (name, extra) in &self.columns {
            match ColumnRole::from_name(name) {
                Some(role) => aliases = aliases.with_extra(role, extra.iter().cloned()),
                None => tracing::warn!(role = %name, "ignoring aliases for unknown column role"),
            }
        }
        aliases
    }

    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            industry: self.industry().to_string(),
            threshold: self.threshold,
        };

        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(ref industry) = override_cfg.industry {
                    effective.industry = industry.clone();
                }
                if let Some(threshold) = override_cfg.threshold {
                    effective.threshold = Some(threshold);
                }
            }
        }

        effective
    }

    /// Check if a file path matches any of the override patterns
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        for pattern in patterns {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(file_path)
                    || path_str.ends_with(pattern.trim_start_matches("**/"))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.industry.is_none() {
            self.industry = base.industry;
        }
        if self.language.is_none() {
            self.language = base.language;
        }
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        // Base aliases come first for each role
        for (role, mut base_aliases) in base.columns {
            let entry = self.columns.entry(role).or_default();
            for alias in entry.drain(..) {
                if !base_aliases.contains(&alias) {
                    base_aliases.push(alias);
                }
            }
            *entry = base_aliases;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.history.enabled.is_none() {
            self.history.enabled = base.history.enabled;
        }
        if self.history.path.is_none() {
            self.history.path = base.history.path;
        }

        if self.lookups.bank_url.is_none() {
            self.lookups.bank_url = base.lookups.bank_url;
        }
        if self.lookups.gst_url.is_none() {
            self.lookups.gst_url = base.lookups.gst_url;
        }
        if self.lookups.timeout_secs.is_none() {
            self.lookups.timeout_secs = base.lookups.timeout_secs;
        }

        // Prepend base overrides
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }
}

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub industry: String,
    pub threshold: Option<f64>,
}
