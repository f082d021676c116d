//! Library-level analysis of the fixture datasets under test-data/.

use finhealth::analyzer::AnalysisEngine;
use finhealth::lookups::StaticSource;
use finhealth::{financial_analysis, ColumnAliases, ColumnRole, CreditRating};
use serde_json::json;
use std::path::Path;

const RETAIL: &str = "test-data/uploads/2024-01_retail.csv";
const FULL: &str = "test-data/uploads/2024-02_full.csv";
const ALIASES: &str = "test-data/aliases.csv";
const MESSY: &str = "test-data/messy.csv";
const NO_ROLES: &str = "test-data/no_roles.csv";
const DISTRESSED: &str = "test-data/distressed.csv";

#[test]
fn retail_two_month_example() {
    let result = financial_analysis(Path::new(RETAIL), Some("Retail")).unwrap();

    assert_eq!(result.industry, "Retail");
    assert_eq!(result.total_revenue, 220);
    assert_eq!(result.total_expenses, 170);
    assert_eq!(result.profit, 50);
    assert_eq!(result.financial_health_score, 77.91);
    assert_eq!(result.credit_rating, CreditRating::LowRisk);
    assert_eq!(result.forecasted_revenue_next_month, 140);
    assert_eq!(result.avg_inventory, 0);
    assert_eq!(result.estimated_gst, 39);
    assert_eq!(result.tax_deduction, 4);
    assert_eq!(result.net_tax_payable, 35);
    assert_eq!(result.tax_compliance_status, "Compliant (Estimated)");
    assert_eq!(result.risks, vec!["Financial position is stable"]);
    assert_eq!(
        result.recommendations,
        vec!["Maintain current performance strategy"]
    );
    assert!(result.banking_api_data.is_empty());
    assert!(result.gst_filing_data.is_empty());
}

#[test]
fn industry_defaults_to_retail() {
    let result = financial_analysis(Path::new(RETAIL), None).unwrap();
    assert_eq!(result.industry, "Retail");
    assert!(result
        .investor_summary
        .starts_with("The Retail business generated total revenue of 220"));
}

#[test]
fn full_schema_fires_receivable_and_cash_flow_rules() {
    let result = financial_analysis(Path::new(FULL), Some("Manufacturing")).unwrap();

    assert_eq!(result.total_revenue, 157_000);
    assert_eq!(result.total_expenses, 132_000);
    assert_eq!(result.profit, 25_000);
    assert_eq!(result.financial_health_score, 66.7);
    assert_eq!(result.credit_rating, CreditRating::MediumRisk);
    assert_eq!(result.forecasted_revenue_next_month, 57_333);
    assert_eq!(result.avg_inventory, 15_000);
    assert_eq!(result.estimated_gst, 28_260);
    assert_eq!(result.tax_deduction, 3_140);
    assert_eq!(result.net_tax_payable, 25_120);
    assert_eq!(
        result.risks,
        vec![
            "High receivables locking business cash flow",
            "Expenses approaching revenue levels",
        ]
    );
    assert_eq!(
        result.recommendations,
        vec![
            "Improve collection cycle and invoice follow-ups",
            "Reduce operational costs and boost sales",
        ]
    );
    assert_eq!(
        result.investor_summary,
        "The Manufacturing business generated total revenue of 157000 with net profit of 25000. \
         Health score 66.7 indicating Medium Risk. Strong long-term potential."
    );
}

#[test]
fn alias_columns_resolve() {
    let analysis = AnalysisEngine::new()
        .analyze(Path::new(ALIASES), "Services")
        .unwrap();

    assert_eq!(analysis.columns.get(ColumnRole::Revenue), Some("sales"));
    assert_eq!(analysis.columns.get(ColumnRole::Expense), Some("cost"));
    assert_eq!(analysis.columns.get(ColumnRole::Receivable), Some("receivables"));
    assert_eq!(analysis.columns.get(ColumnRole::Payable), Some("payables"));
    assert_eq!(analysis.columns.get(ColumnRole::Loan), Some("debt"));
    assert_eq!(analysis.columns.get(ColumnRole::Inventory), Some("inventory"));

    let result = analysis.result;
    assert_eq!(result.total_revenue, 2400);
    assert_eq!(result.total_expenses, 1400);
    assert_eq!(result.profit, 1000);
    assert_eq!(result.financial_health_score, 96.85);
    assert_eq!(result.credit_rating, CreditRating::LowRisk);
    assert_eq!(result.forecasted_revenue_next_month, 1800);
    assert_eq!(result.avg_inventory, 60);
    assert_eq!(result.estimated_gst, 432);
    assert_eq!(result.risks, vec!["Financial position is stable"]);
}

#[test]
fn messy_rows_are_cleaned() {
    let analysis = AnalysisEngine::new()
        .analyze(Path::new(MESSY), "Retail")
        .unwrap();

    assert_eq!(analysis.cleaning.rows_read, 5);
    assert_eq!(analysis.cleaning.rows_dropped, 1);
    assert_eq!(analysis.cleaning.cells_filled, 1);
    assert_eq!(analysis.cleaning.cells_coerced, 5);

    let result = analysis.result;
    assert_eq!(result.total_revenue, 300);
    assert_eq!(result.total_expenses, 160);
    assert_eq!(result.forecasted_revenue_next_month, 150);
    // Scores are not clamped
    assert_eq!(result.financial_health_score, 104.92);
    assert_eq!(result.credit_rating, CreditRating::LowRisk);
}

#[test]
fn dataset_without_known_columns_scores_thirty() {
    let analysis = AnalysisEngine::new()
        .analyze(Path::new(NO_ROLES), "Retail")
        .unwrap();

    assert_eq!(analysis.columns.missing().len(), 6);
    let result = analysis.result;
    assert_eq!(result.total_revenue, 0);
    assert_eq!(result.profit, 0);
    assert_eq!(result.financial_health_score, 30.0);
    assert_eq!(result.credit_rating, CreditRating::HighRisk);
    assert_eq!(result.forecasted_revenue_next_month, 0);
    assert_eq!(result.risks, vec!["Expenses approaching revenue levels"]);
}

#[test]
fn loss_making_business_is_high_risk() {
    let result = financial_analysis(Path::new(DISTRESSED), Some("Logistics")).unwrap();

    assert_eq!(result.profit, -200);
    assert_eq!(result.financial_health_score, 38.72);
    assert_eq!(result.credit_rating, CreditRating::HighRisk);
    assert_eq!(
        result.risks,
        vec![
            "Expenses approaching revenue levels",
            "Heavy dependency on loans",
        ]
    );
    assert_eq!(
        result.recommendations,
        vec![
            "Reduce operational costs and boost sales",
            "Reduce debt and restructure liabilities",
        ]
    );
}

#[test]
fn custom_aliases_extend_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    std::fs::write(&path, "turnover,outgoings\n500,200\n700,300\n").unwrap();

    let default = AnalysisEngine::new().analyze(&path, "Retail").unwrap();
    assert_eq!(default.result.total_revenue, 0);

    let aliases = ColumnAliases::new()
        .with_extra(ColumnRole::Revenue, ["turnover"])
        .with_extra(ColumnRole::Expense, ["outgoings"]);
    let custom = AnalysisEngine::new()
        .with_aliases(aliases)
        .analyze(&path, "Retail")
        .unwrap();
    assert_eq!(custom.result.total_revenue, 1200);
    assert_eq!(custom.result.total_expenses, 500);
}

#[test]
fn lookup_payloads_are_attached() {
    let bank = json!({ "balance": 1200, "bank": "Demo" });
    let gst = json!({ "filings": 4 });
    let result = AnalysisEngine::new()
        .with_bank_source(StaticSource::new(bank.as_object().unwrap().clone()))
        .with_gst_source(StaticSource::new(gst.as_object().unwrap().clone()))
        .analyze(Path::new(RETAIL), "Retail")
        .unwrap()
        .result;

    assert_eq!(result.banking_api_data["bank"], "Demo");
    assert_eq!(result.gst_filing_data["filings"], 4);
    assert_eq!(result.financial_health_score, 77.91);
}

#[test]
fn aggregate_over_fixture_directory() {
    let engine = AnalysisEngine::new();
    let files: Vec<_> = [RETAIL, FULL, NO_ROLES]
        .iter()
        .map(|p| engine.analyze_file(Path::new(p), "Retail").unwrap())
        .collect();

    let stats = AnalysisEngine::aggregate_stats(&files);
    assert_eq!(stats.files_analyzed, 3);
    assert_eq!(stats.total_revenue, 157_220);
    assert_eq!(stats.low_risk, 1);
    assert_eq!(stats.medium_risk, 1);
    assert_eq!(stats.high_risk, 1);
    assert!((stats.average_score - 58.2).abs() < 0.01);
    assert_eq!(stats.average_rating(), CreditRating::MediumRisk);
}
