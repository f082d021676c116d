//! PDF investor report

pub mod layout;
pub mod writer;

use super::i18n::Language;
use crate::AnalysisResult;
use std::path::Path;

/// File name used when no output path is given
pub const REPORT_FILENAME: &str = "Investor_Financial_Report.pdf";

/// Reporter that renders the five-section investor report as PDF
pub struct PdfReporter {
    language: Language,
}

impl PdfReporter {
    pub fn new() -> Self {
        Self {
            language: Language::English,
        }
    }

    /// Set the narrative language
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Render the report to PDF bytes
    pub fn render(&self, result: &AnalysisResult) -> Vec<u8> {
        let pages = layout::layout_report(result, self.language);
        tracing::debug!(pages = pages.len(), language = %self.language, "laid out PDF report");
        writer::write_pdf(&pages)
    }

    /// Render and write the report to `path`
    pub fn write(&self, result: &AnalysisResult, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.render(result))
    }
}

impl Default for PdfReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisEngine;
    use crate::Dataset;

    fn retail() -> AnalysisResult {
        let ds = Dataset::new(
            vec!["revenue".into(), "expenses".into()],
            vec![vec![100.0, 80.0], vec![120.0, 90.0]],
        );
        AnalysisEngine::new().analyze_dataset(&ds, "Retail").result
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    #[test]
    fn english_report_contains_sections() {
        let bytes = PdfReporter::new().render(&retail());
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(contains(&bytes, "(Investor-Ready Financial Health Report) Tj"));
        assert!(contains(&bytes, "(1. Executive Summary) Tj"));
        assert!(contains(&bytes, "(Health Score: 77.91) Tj"));
        assert!(contains(&bytes, "(Credit Rating: Low Risk) Tj"));
        assert!(contains(&bytes, "(- Maintain current performance strategy) Tj"));
        assert!(contains(&bytes, "(5. Investment Outlook) Tj"));
    }

    #[test]
    fn hindi_title_degrades_but_sections_remain() {
        let bytes = PdfReporter::new().language(Language::Hindi).render(&retail());
        assert!(!contains(&bytes, "Investor-Ready Financial Health Report"));
        assert!(contains(&bytes, "(2. Financial Highlights) Tj"));
        assert!(contains(&bytes, "(Total Revenue: 220) Tj"));
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REPORT_FILENAME);
        PdfReporter::new().write(&retail(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.ends_with(b"%%EOF\n"));
    }
}
