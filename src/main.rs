//! finhealth: Financial Health Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use finhealth::analyzer::AnalysisEngine;
use finhealth::config::{
    build_ignore_set, is_ignored, load_config, starter_config, Config, CONFIG_FILENAME,
};
use finhealth::dataset::is_dataset_file;
use finhealth::history::{format_delta, previous_score, HistoryStore};
use finhealth::reporter::pdf::REPORT_FILENAME;
use finhealth::reporter::{ConsoleReporter, HtmlReporter, JsonReporter, Language, PdfReporter};
use finhealth::{format_score, AnalyzedFile};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// finhealth: cash-flow health analysis for small-business spreadsheets
#[derive(Parser, Debug)]
#[command(name = "finhealth")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dataset file or directory to analyze (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Industry label (default: from config, else "Retail")
    #[arg(long, short)]
    industry: Option<String>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum health score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Quiet mode (one line per file)
    #[arg(long, short)]
    quiet: bool,

    /// Show ratios, resolved columns and cleaning stats (also in single-file JSON)
    #[arg(long)]
    verbose: bool,

    /// Write an HTML dashboard to FILE
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Write the PDF investor report to FILE (single dataset only)
    #[arg(long, value_name = "FILE")]
    pdf: Option<PathBuf>,

    /// Report language: en, hi, ta
    #[arg(long, value_name = "CODE")]
    lang: Option<String>,

    /// Path to config file (default: search .finhealthrc.json in the input dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not read or write the history file
    #[arg(long)]
    no_history: bool,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,

    /// Log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    log_verbosity: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the PDF investor report from the latest upload in a directory
    Report {
        /// Directory holding uploaded datasets
        uploads: PathBuf,

        /// Report language: en, hi, ta
        #[arg(long, value_name = "CODE")]
        lang: Option<String>,

        /// Output file (default: Investor_Financial_Report.pdf)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create .finhealthrc.json with sensible defaults
    Init {
        /// Default industry label
        #[arg(long)]
        industry: Option<String>,

        /// Minimum health score (e.g. 50)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// Initialize tracing on stderr so stdout stays machine-readable
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .with_line_number(verbosity >= 3)
        .init();

    debug!("finhealth started with verbosity level: {}", verbosity);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

fn run() -> Result<ExitCode> {
    let mut args = Args::parse();
    init_logging(args.log_verbosity);

    if let Some(cmd) = args.command.take() {
        return match cmd {
            Commands::Report {
                uploads,
                lang,
                output,
                config,
            } => run_report(&uploads, lang.as_deref(), output, config.as_deref()),
            Commands::Init {
                industry,
                threshold,
                dir,
            } => run_init(industry.as_deref(), threshold, dir.as_deref()),
        };
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("A dataset file or directory is required");
    };

    // Resolve work directory for config and history
    let work_dir = if path.is_file() {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    } else {
        path.as_path()
    };

    // Load config (CLI flags override config file)
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(
        args.industry.as_deref(),
        args.lang.as_deref(),
        args.threshold,
    );

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let files = collect_dataset_files(&path, ignore_set.as_ref())?;
    if files.is_empty() {
        eprintln!("{}: No dataset files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let engine = AnalysisEngine::from_config(&config);
    let use_parallel = args.parallel || files.len() > 10;
    let (results, had_errors) = if use_parallel {
        analyze_files_parallel(&engine, &files, &config, args.quiet)
    } else {
        analyze_files_sequential(&engine, &files, &config, args.quiet)
    };

    if results.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&results);

    let store = history_store(&args, &config, work_dir);
    let history = store.load();
    let deltas: Vec<String> = results
        .iter()
        .map(|f| {
            format_delta(
                previous_score(&history, &f.path),
                f.result().financial_health_score,
            )
        })
        .collect();

    // Output results
    if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 && args.verbose {
            println!("{}", reporter.report_detailed(&results[0].analysis));
        } else if results.len() == 1 {
            println!("{}", reporter.report(results[0].result()));
        } else {
            println!("{}", reporter.report_with_summary(&results, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for (file, delta) in results.iter().zip(&deltas) {
            reporter.report_quiet(file, delta);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        if results.len() == 1 {
            reporter.report(&results[0], &deltas[0]);
        } else {
            reporter.report_many(&results, &deltas, &stats);
        }
    }

    let language = Language::from_code(config.language());

    if let Some(ref html_path) = args.html {
        let reporter = HtmlReporter::new().language(language);
        let stats_bar = (results.len() > 1).then_some(&stats);
        std::fs::write(html_path, reporter.report_many(&results, stats_bar))
            .with_context(|| format!("Failed to write dashboard to {}", html_path.display()))?;
        if !args.quiet {
            eprintln!(
                "{}: Dashboard written to {}",
                "Info".blue(),
                html_path.display()
            );
        }
    }

    if let Some(ref pdf_path) = args.pdf {
        if results.len() > 1 {
            eprintln!(
                "{}: --pdf only works with a single dataset",
                "Warning".yellow()
            );
        } else {
            PdfReporter::new()
                .language(language)
                .write(results[0].result(), pdf_path)
                .with_context(|| format!("Failed to write report to {}", pdf_path.display()))?;
            if !args.quiet {
                eprintln!(
                    "{}: Report written to {}",
                    "Info".blue(),
                    pdf_path.display()
                );
            }
        }
    }

    store.record(&results);

    // Check each file against its effective threshold (CLI > override > config)
    let mut below_threshold = false;
    for file in &results {
        let Some(threshold) = config.effective_for_file(&file.path).threshold else {
            continue;
        };
        let score = file.result().financial_health_score;
        if score < threshold {
            below_threshold = true;
            if !args.quiet && !args.json {
                eprintln!(
                    "\n{}: {} score {} is below threshold {}",
                    "Failed".red().bold(),
                    file.path.display(),
                    format_score(score),
                    format_score(threshold)
                );
            }
        }
    }
    if below_threshold {
        return Ok(ExitCode::from(1));
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn history_store(args: &Args, config: &Config, work_dir: &Path) -> HistoryStore {
    if args.no_history || !config.history.is_enabled() {
        return HistoryStore::disabled();
    }
    match config.history.path {
        Some(ref path) if path.is_absolute() => HistoryStore::new(path.clone()),
        Some(ref path) => HistoryStore::new(work_dir.join(path)),
        None => HistoryStore::in_dir(work_dir),
    }
}

fn run_report(
    uploads: &Path,
    lang: Option<&str>,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<ExitCode> {
    if !uploads.is_dir() {
        anyhow::bail!("Uploads directory not found: {}", uploads.display());
    }

    let config = load_config(uploads, config_path)?.merge_with_cli(None, lang, None);

    let Some(latest) = latest_upload(uploads)? else {
        eprintln!("No uploaded financial data found.");
        return Ok(ExitCode::from(2));
    };
    debug!(file = %latest.display(), "latest upload");

    let engine = AnalysisEngine::from_config(&config);
    let analysis = engine
        .analyze(&latest, config.industry())
        .with_context(|| format!("Failed to analyze {}", latest.display()))?;

    let output = output.unwrap_or_else(|| PathBuf::from(REPORT_FILENAME));
    PdfReporter::new()
        .language(Language::from_code(config.language()))
        .write(&analysis.result, &output)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    println!(
        "{}: Wrote {} from {}",
        "Done".green().bold(),
        output.display(),
        latest.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_init(industry: Option<&str>, threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let config = starter_config(industry, threshold);
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;

    std::fs::write(&config_path, json + "\n").with_context(|| {
        format!("Failed to write config to {}", config_path.display())
    })?;

    println!(
        "{}: Created {} with industry={}, threshold={}",
        "Done".green().bold(),
        config_path.display(),
        config.industry(),
        config.threshold.map(format_score).unwrap_or_default()
    );
    Ok(ExitCode::SUCCESS)
}

/// The lexicographically last dataset file directly inside `dir`
fn latest_upload(dir: &Path) -> Result<Option<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && is_dataset_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files.pop())
}

fn collect_dataset_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if entry.file_type().is_file() && is_dataset_file(file_path) && !is_lock_file(file_path) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

/// Office lock files (`~$budget.xlsx`) share the real file's extension
fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("~$"))
        .unwrap_or(false)
}

/// Analyze files sequentially
fn analyze_files_sequential(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    quiet: bool,
) -> (Vec<AnalyzedFile>, bool) {
    let mut results = Vec::new();
    let mut had_errors = false;

    for file in files {
        let industry = config.effective_for_file(file).industry;
        match engine.analyze_file(file, &industry) {
            Ok(result) => results.push(result),
            Err(e) => {
                if !quiet {
                    eprintln!("{}: Failed to analyze {}: {}", "Error".red(), file.display(), e);
                }
                had_errors = true;
            }
        }
    }

    (results, had_errors)
}

/// Analyze files in parallel; each analysis stays independent
fn analyze_files_parallel(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    quiet: bool,
) -> (Vec<AnalyzedFile>, bool) {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    let had_errors = AtomicBool::new(false);

    let results: Vec<_> = files
        .par_iter()
        .filter_map(|file| {
            let industry = config.effective_for_file(file).industry;
            match engine.analyze_file(file, &industry) {
                Ok(result) => Some(result),
                Err(e) => {
                    had_errors.store(true, Ordering::Relaxed);
                    if !quiet {
                        eprintln!("{}: Failed to analyze {}: {}", "Error".red(), file.display(), e);
                    }
                    None
                }
            }
        })
        .collect();

    (results, had_errors.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_dataset_files_recursively_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("2024")).unwrap();
        fs::write(dir.path().join("b.csv"), "revenue\n1\n").unwrap();
        fs::write(dir.path().join("2024").join("a.XLSX"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("~$b.xlsx"), "").unwrap();

        let files = collect_dataset_files(dir.path(), None).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.XLSX", "b.csv"]);
    }

    #[test]
    fn collect_honors_ignore_globs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        fs::write(dir.path().join("archive").join("old.csv"), "").unwrap();
        fs::write(dir.path().join("new.csv"), "").unwrap();
        let set = build_ignore_set(&["**/archive/**".to_string()]).unwrap();
        let files = collect_dataset_files(dir.path(), Some(&set)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("new.csv"));
    }

    #[test]
    fn collect_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_dataset_files(&dir.path().join("nope"), None).is_err());
    }

    #[test]
    fn latest_upload_is_lexicographically_last() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_upload(dir.path()).unwrap(), None);
        fs::write(dir.path().join("2024-01.csv"), "").unwrap();
        fs::write(dir.path().join("2024-03.xlsx"), "").unwrap();
        fs::write(dir.path().join("2024-02.csv"), "").unwrap();
        fs::write(dir.path().join("zz-readme.txt"), "").unwrap();
        let latest = latest_upload(dir.path()).unwrap().unwrap();
        assert!(latest.ends_with("2024-03.xlsx"));
    }

    #[test]
    fn lock_files_detected() {
        assert!(is_lock_file(Path::new("dir/~$budget.xlsx")));
        assert!(!is_lock_file(Path::new("dir/budget.xlsx")));
    }
}
