//! HTML reporter: generates a self-contained financial health dashboard
//!
//! Everything is rendered server-side into one page with inline CSS. The
//! analysis results are also embedded as JSON so the page can be consumed
//! by scripts.

use super::i18n::{narrative, Language};
use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{format_score, AnalysisResult, AnalyzedFile, CreditRating};
use serde::Serialize;

/// Ensure no `</script>` can appear inside an embedded JSON block
fn escape_json_for_script(s: &str) -> String {
    s.replace("</", "<\\/")
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reporter that generates a self-contained HTML dashboard
pub struct HtmlReporter {
    language: Language,
}

#[derive(Serialize)]
struct JsFile<'a> {
    file: String,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

impl HtmlReporter {
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

    /// Dashboard for a single analysis
    pub fn report(&self, file: &AnalyzedFile) -> String {
        self.report_many(std::slice::from_ref(file), None)
    }

    /// Dashboard for several analyses, with an optional summary bar
    pub fn report_many(&self, files: &[AnalyzedFile], stats: Option<&AggregateStats>) -> String {
        let js_files: Vec<JsFile> = files
            .iter()
            .map(|f| JsFile {
                file: f.path.display().to_string(),
                result: f.result(),
            })
            .collect();
        let data_json = serde_json::to_string(&js_files).unwrap_or_else(|_| "[]".to_string());

        let title = files
            .first()
            .map(|f| narrative(self.language, &f.result().industry).title)
            .unwrap_or_else(|| narrative(self.language, crate::DEFAULT_INDUSTRY).title);

        let mut html = String::with_capacity(16_384);
        html.push_str("<!DOCTYPE html>\n<html lang=\"");
        html.push_str(self.language.code());
        html.push_str("\">\n<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>");
        html.push_str(&escape_html(&title));
        html.push_str("</title>\n");
        html.push_str(Self::template_style());
        html.push_str("</head>\n<body>\n<div class=\"shell\">\n<header><h1>");
        html.push_str(&escape_html(&title));
        html.push_str("</h1></header>\n");

        if let Some(stats) = stats {
            html.push_str(&self.render_stats(stats));
        }

        if files.is_empty() {
            html.push_str("<div class=\"empty\">No uploaded financial data found.</div>\n");
        }
        for file in files {
            html.push_str(&self.render_file(file));
        }

        html.push_str("</div>\n<script type=\"application/json\" id=\"analysis-data\">");
        html.push_str(&escape_json_for_script(&data_json));
        html.push_str("</script>\n</body>\n</html>\n");
        html
    }

    fn render_stats(&self, stats: &AggregateStats) -> String {
        let cells = [
            ("Files", stats.files_analyzed.to_string()),
            ("Average score", format_score(stats.average_score)),
            ("Total revenue", stats.total_revenue.to_string()),
            ("Low risk", stats.low_risk.to_string()),
            ("Medium risk", stats.medium_risk.to_string()),
            ("High risk", stats.high_risk.to_string()),
        ];
        let mut out = String::from("<div class=\"stats-bar\">");
        for (label, value) in cells {
            out.push_str(&format!(
                "<div class=\"stat\"><span class=\"val\">{}</span><span class=\"lbl\">{}</span></div>",
                escape_html(&value),
                label
            ));
        }
        out.push_str("</div>\n");
        out
    }

    fn render_file(&self, file: &AnalyzedFile) -> String {
        let result = file.result();
        let text = narrative(self.language, &result.industry);
        let mut out = String::with_capacity(4096);

        out.push_str("<section class=\"file\">\n");
        out.push_str(&format!(
            "<h2 class=\"fpath\">{}</h2>\n",
            escape_html(&file.path.display().to_string())
        ));

        // Score card
        out.push_str(&format!(
            "<div class=\"score-card {}\"><span class=\"score\">{}</span>\
             <span class=\"rating\">{}</span><p class=\"muted\">{}</p></div>\n",
            rating_class(result.credit_rating),
            escape_html(&format_score(result.financial_health_score)),
            escape_html(result.credit_rating.label()),
            escape_html(ScoreCalculator::rating_description(result.credit_rating))
        ));

        out.push_str("<div class=\"grid\">\n");

        out.push_str("<div class=\"panel\"><h3>Executive Summary</h3><p>");
        out.push_str(&escape_html(&text.executive_summary));
        out.push_str("</p></div>\n");

        out.push_str("<div class=\"panel\"><h3>Financial Highlights</h3><dl>");
        for (label, value) in super::highlights(result) {
            out.push_str(&format!(
                "<dt>{}</dt><dd>{}</dd>",
                label,
                escape_html(&value)
            ));
        }
        out.push_str("</dl></div>\n");

        out.push_str("<div class=\"panel\"><h3>Tax Estimate</h3><dl>");
        let tax = [
            ("Estimated GST", result.estimated_gst.to_string()),
            ("Tax Deduction", result.tax_deduction.to_string()),
            ("Net Tax Payable", result.net_tax_payable.to_string()),
            ("Status", result.tax_compliance_status.clone()),
        ];
        for (label, value) in tax {
            out.push_str(&format!(
                "<dt>{}</dt><dd>{}</dd>",
                label,
                escape_html(&value)
            ));
        }
        out.push_str("</dl></div>\n");

        out.push_str(&render_list("Risk Assessment", "risks", &result.risks));
        out.push_str(&render_list(
            "Strategic Recommendations",
            "recs",
            &result.recommendations,
        ));

        out.push_str("<div class=\"panel wide\"><h3>Investor Summary</h3><p>");
        out.push_str(&escape_html(&result.investor_summary));
        out.push_str("</p></div>\n");

        out.push_str("<div class=\"panel wide\"><h3>Investment Outlook</h3><p>");
        out.push_str(&escape_html(&text.investment_outlook));
        out.push_str("</p></div>\n");

        out.push_str("</div>\n</section>\n");
        out
    }

    fn template_style() -> &'static str {
        r##"<style>
:root{--bg:#0d0d11;--surface:#16161b;--surface2:#1e1e24;--border:#2a2a32;--text:#e4e4e7;--muted:#71717a;--green:#22c55e;--yellow:#eab308;--red:#ef4444;--cyan:#06b6d4;--radius:8px}
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,'Noto Sans','Noto Sans Devanagari','Noto Sans Tamil',sans-serif;background:var(--bg);color:var(--text);line-height:1.5;min-height:100vh}
.shell{max-width:1100px;margin:0 auto;padding:1.5rem}
header{padding-bottom:1rem;border-bottom:1px solid var(--border);margin-bottom:1rem}
header h1{font-size:1.25rem;font-weight:700}

/* ── Stats bar ── */
.stats-bar{display:flex;border:1px solid var(--border);border-radius:var(--radius);background:var(--surface);margin-bottom:1.5rem}
.stat{flex:1;padding:.875rem 1rem;border-right:1px solid var(--border);text-align:center}
.stat:last-child{border-right:none}
.stat .val{font-size:1.375rem;font-weight:700;display:block}
.stat .lbl{font-size:.75rem;color:var(--muted);text-transform:uppercase;letter-spacing:.5px}

/* ── File sections ── */
.file{margin-bottom:2rem}
.fpath{font-size:.875rem;color:var(--muted);font-weight:600;margin-bottom:.75rem;font-family:'SF Mono',Consolas,monospace}
.score-card{background:var(--surface);border:1px solid var(--border);border-left:4px solid var(--muted);border-radius:var(--radius);padding:1rem 1.25rem;margin-bottom:1rem}
.score-card .score{font-size:2.25rem;font-weight:800;margin-right:1rem;font-variant-numeric:tabular-nums}
.score-card .rating{font-size:1rem;font-weight:700}
.score-card.low{border-left-color:var(--green)}.score-card.low .rating{color:var(--green)}
.score-card.medium{border-left-color:var(--yellow)}.score-card.medium .rating{color:var(--yellow)}
.score-card.high{border-left-color:var(--red)}.score-card.high .rating{color:var(--red)}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(320px,1fr));gap:1rem}
.panel{background:var(--surface);border:1px solid var(--border);border-radius:var(--radius);padding:1rem}
.panel.wide{grid-column:1/-1}
.panel h3{font-size:.75rem;text-transform:uppercase;letter-spacing:.5px;color:var(--muted);margin-bottom:.5rem;padding-bottom:.375rem;border-bottom:1px solid var(--border)}
.panel p{font-size:.875rem}
dl{display:grid;grid-template-columns:auto 1fr;gap:.25rem 1rem;font-size:.875rem}
dt{color:var(--muted)}
dd{text-align:right;font-variant-numeric:tabular-nums}
ul{padding-left:1.1rem;font-size:.875rem}
ul.risks li::marker{color:var(--yellow)}
ul.recs li::marker{color:var(--cyan)}
.muted{color:var(--muted);font-size:.8125rem}
.empty{text-align:center;padding:3rem 1rem;color:var(--muted);font-size:.875rem}
</style>
"##
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn rating_class(rating: CreditRating) -> &'static str {
    match rating {
        CreditRating::LowRisk => "low",
        CreditRating::MediumRisk => "medium",
        CreditRating::HighRisk => "high",
    }
}

fn render_list(title: &str, class: &str, items: &[String]) -> String {
    let mut out = format!("<div class=\"panel\"><h3>{}</h3><ul class=\"{}\">", title, class);
    for item in items {
        out.push_str("<li>");
        out.push_str(&escape_html(item));
        out.push_str("</li>");
    }
    out.push_str("</ul></div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisEngine;
    use crate::Dataset;
    use std::path::PathBuf;

    fn analyzed(path: &str, industry: &str) -> AnalyzedFile {
        let ds = Dataset::new(
            vec!["revenue".into(), "expenses".into()],
            vec![vec![100.0, 80.0], vec![120.0, 90.0]],
        );
        AnalyzedFile {
            path: PathBuf::from(path),
            analysis: AnalysisEngine::new().analyze_dataset(&ds, industry),
        }
    }

    fn embedded_json(html: &str) -> serde_json::Value {
        let start_tag = "<script type=\"application/json\" id=\"analysis-data\">";
        let start = html.find(start_tag).unwrap() + start_tag.len();
        let end = start + html[start..].find("</script>").unwrap();
        serde_json::from_str(&html[start..end].replace("<\\/", "</")).unwrap()
    }

    #[test]
    fn report_contains_structure() {
        let html = HtmlReporter::new().report(&analyzed("jan.csv", "Retail"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Investor-Ready Financial Health Report</title>"));
        assert!(html.contains("score-card low"));
        assert!(html.contains("77.91"));
        assert!(html.contains("Financial position is stable"));
        assert!(html.contains("Maintain current performance strategy"));
        assert!(html.contains("Estimated GST"));
        assert!(html.contains("Investment Outlook"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn embedded_json_matches_result() {
        let file = analyzed("jan.csv", "Retail");
        let html = HtmlReporter::new().report(&file);
        let data = embedded_json(&html);
        assert_eq!(data[0]["file"], "jan.csv");
        assert_eq!(data[0]["total_revenue"], 220);
        assert_eq!(data[0]["credit_rating"], "Low Risk");
    }

    #[test]
    fn industry_text_is_escaped() {
        let html = HtmlReporter::new().report(&analyzed("jan.csv", "<script>alert(1)</script>"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        // The JSON block cannot be closed early either
        let data = embedded_json(&html);
        assert_eq!(data[0]["industry"], "<script>alert(1)</script>");
    }

    #[test]
    fn localized_narrative() {
        let html = HtmlReporter::new()
            .language(Language::Tamil)
            .report(&analyzed("jan.csv", "Retail"));
        assert!(html.contains("<html lang=\"ta\">"));
        assert!(html.contains("முதலீட்டாளர் நிதி ஆரோக்கிய அறிக்கை"));
        // Highlight labels stay in English
        assert!(html.contains("Total Revenue"));
    }

    #[test]
    fn empty_results() {
        let html = HtmlReporter::new().report_many(&[], Some(&AggregateStats::default()));
        assert!(html.contains("No uploaded financial data found."));
        assert_eq!(embedded_json(&html), serde_json::json!([]));
    }

    #[test]
    fn escape_html_special_characters() {
        assert_eq!(escape_html("a & b < c > \"d\" 'e'"), "a &amp; b &lt; c &gt; &quot;d&quot; &#39;e&#39;");
    }

    #[test]
    fn escape_json_for_script_blocks_closing_tags() {
        assert_eq!(escape_json_for_script("\"</script>\""), "\"<\\/script>\"");
    }
}
