//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::lookups::is_remote_lookup_available;
use crate::{format_score, AnalyzedFile, CreditRating};
use colored::Colorize;
use std::fmt::Write;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output (ratios, resolved columns, cleaning stats)
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis; `delta` is the history suffix (may be empty)
    pub fn report(&self, file: &AnalyzedFile, delta: &str) {
        print!("{}", self.render(file, delta));
    }

    /// Report multiple analyses with summary. `deltas` pairs up with `files`.
    pub fn report_many(&self, files: &[AnalyzedFile], deltas: &[String], stats: &AggregateStats) {
        for (i, file) in files.iter().enumerate() {
            let delta = deltas.get(i).map(String::as_str).unwrap_or("");
            self.report(file, delta);
            println!("{}", "─".repeat(60));
        }
        print!("{}", self.render_summary(stats));
    }

    /// Report in quiet mode (one line)
    pub fn report_quiet(&self, file: &AnalyzedFile, delta: &str) {
        println!("{}", self.render_quiet(file, delta));
    }

    pub fn render_quiet(&self, file: &AnalyzedFile, delta: &str) -> String {
        let result = file.result();
        format!(
            "{}: {} ({}){}",
            file.path.display(),
            format_score(result.financial_health_score),
            self.colorize_rating(result.credit_rating),
            delta
        )
    }

    /// Render the full report for one file
    pub fn render(&self, file: &AnalyzedFile, delta: &str) -> String {
        let mut out = String::new();
        self.render_header(&mut out, file);
        self.render_score(&mut out, file, delta);
        self.render_highlights(&mut out, file);
        if self.verbose {
            self.render_details(&mut out, file);
        }
        self.render_risks(&mut out, file);
        let _ = writeln!(out, "   {}", "Investor Summary:".bold());
        let _ = writeln!(out, "   {}", file.result().investor_summary);
        let _ = writeln!(out);
        out
    }

    fn render_header(&self, out: &mut String, file: &AnalyzedFile) {
        let result = file.result();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            format!("Financial Health Analysis: {}", file.path.display()).bold()
        );
        let _ = writeln!(
            out,
            "   Industry: {} | Rows: {}",
            result.industry, file.analysis.cleaning.rows_read
        );
        let _ = writeln!(out);
    }

    fn render_score(&self, out: &mut String, file: &AnalyzedFile, delta: &str) {
        let result = file.result();
        let score_bar = self.create_score_bar(result.financial_health_score);
        let _ = writeln!(
            out,
            "   Score: {} {}{}",
            score_bar,
            self.colorize_rating(result.credit_rating).bold(),
            delta.dimmed()
        );
        let _ = writeln!(
            out,
            "   {}",
            ScoreCalculator::rating_description(result.credit_rating).dimmed()
        );
        let _ = writeln!(out);
    }

    fn render_highlights(&self, out: &mut String, file: &AnalyzedFile) {
        let result = file.result();
        let _ = writeln!(out, "   {}", "Financial Highlights:".bold());
        for (label, value) in super::highlights(result) {
            let _ = writeln!(out, "   {:<20} {}", format!("{}:", label), value);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "   {}", "Tax Estimate:".bold());
        let _ = writeln!(out, "   {:<20} {}", "Estimated GST:", result.estimated_gst);
        let _ = writeln!(out, "   {:<20} {}", "Tax Deduction:", result.tax_deduction);
        let _ = writeln!(out, "   {:<20} {}", "Net Tax Payable:", result.net_tax_payable);
        let _ = writeln!(out, "   {:<20} {}", "Status:", result.tax_compliance_status);
        let _ = writeln!(out);
    }

    fn render_details(&self, out: &mut String, file: &AnalyzedFile) {
        let ratios = &file.analysis.ratios;
        let _ = writeln!(out, "   {}", "Ratios:".bold());
        let rows = [
            ("Profit margin", ratios.profit_margin),
            ("Cash flow ratio", ratios.cash_flow_ratio),
            ("Debt ratio", ratios.debt_ratio),
            ("Avg receivable", ratios.avg_receivable),
            ("Avg payable", ratios.avg_payable),
            ("Working capital gap", ratios.working_capital_gap),
            ("Avg inventory", ratios.avg_inventory),
        ];
        for (name, value) in rows {
            let _ = writeln!(out, "   {:<20} {:.4}", format!("{}:", name), value);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "   {}", "Columns:".bold());
        for role in crate::ColumnRole::ALL {
            let column = match file.analysis.columns.get(role) {
                Some(name) => name.to_string(),
                None => "(not found, defaults to 0)".dimmed().to_string(),
            };
            let _ = writeln!(out, "   {:<20} {}", format!("{}:", role), column);
        }
        let cleaning = &file.analysis.cleaning;
        let _ = writeln!(
            out,
            "   {}",
            format!(
                "{} rows read, {} dropped, {} cells filled, {} coerced",
                cleaning.rows_read,
                cleaning.rows_dropped,
                cleaning.cells_filled,
                cleaning.cells_coerced
            )
            .dimmed()
        );
        let lookups = if is_remote_lookup_available() {
            "remote lookups enabled"
        } else {
            "remote lookups not compiled in (bank and GST data stay empty)"
        };
        let _ = writeln!(out, "   {}", lookups.dimmed());
        let _ = writeln!(out);
    }

    fn render_risks(&self, out: &mut String, file: &AnalyzedFile) {
        let result = file.result();
        let _ = writeln!(out, "   {}", "Risks:".bold());
        for risk in &result.risks {
            let _ = writeln!(out, "   {} {}", "!".yellow(), risk);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "   {}", "Recommendations:".bold());
        for rec in &result.recommendations {
            let _ = writeln!(out, "   {} {}", "→".cyan(), rec);
        }
        let _ = writeln!(out);
    }

    /// Render the multi-file summary block
    pub fn render_summary(&self, stats: &AggregateStats) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "═".repeat(60));
        let _ = writeln!(out, "{}", "Summary".bold());
        let _ = writeln!(out, "{}", "═".repeat(60));
        let _ = writeln!(
            out,
            "   Files analyzed: {}",
            stats.files_analyzed.to_string().bold()
        );
        let _ = writeln!(
            out,
            "   Average score:  {} ({})",
            format_score(stats.average_score).bold(),
            self.colorize_rating(stats.average_rating())
        );
        let _ = writeln!(out, "   Total revenue:  {}", stats.total_revenue);
        let _ = writeln!(
            out,
            "   Ratings:        {} low / {} medium / {} high risk",
            stats.low_risk, stats.medium_risk, stats.high_risk
        );
        let _ = writeln!(out);
        out
    }

    fn colorize_rating(&self, rating: CreditRating) -> colored::ColoredString {
        let s = rating.to_string();
        if !self.use_colors {
            return s.normal();
        }
        match rating {
            CreditRating::LowRisk => s.green(),
            CreditRating::MediumRisk => s.yellow(),
            CreditRating::HighRisk => s.red(),
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let clamped = score.clamp(0.0, 100.0);
        let filled = (clamped * 20.0 / 100.0) as usize;
        let empty = 20 - filled;

        let bar = format!(
            "[{}{}] {:>6}",
            "█".repeat(filled),
            "░".repeat(empty),
            format_score(score)
        );

        if self.use_colors {
            match CreditRating::from_score(score) {
                CreditRating::LowRisk => bar.green().to_string(),
                CreditRating::MediumRisk => bar.yellow().to_string(),
                CreditRating::HighRisk => bar.red().to_string(),
            }
        } else {
            bar
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
