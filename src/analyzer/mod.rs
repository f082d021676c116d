//! Analyzer module - financial health analysis engine

pub mod columns;
pub mod engine;
pub mod forecast;
pub mod ratios;
pub mod rules;
pub mod scoring;
pub mod summary;
pub mod tax;

pub use engine::{AggregateStats, AnalysisEngine};
pub use scoring::ScoreCalculator;
