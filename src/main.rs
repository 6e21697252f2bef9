//! treewise - project structure analyzer.
//!
//! Usage:
//!   treewise [PATH]                  Analyze and write both report files
//!   treewise analyze [PATH] -o DIR   Same, into DIR
//!   treewise export [PATH]           JSON report to stdout or a file
//!   treewise render REPORT.json      Markdown tree from a saved report
//!   treewise --help                  Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use treewise_analyze::{Analyzer, Report, Severity};
use treewise_report::{
    JSON_FILE_NAME, MARKDOWN_FILE_NAME, MarkdownRenderer, read_json, to_json, write_json,
};
use treewise_scan::{ScanConfig, TreeScanner};

#[derive(Parser)]
#[command(
    name = "treewise",
    version,
    about = "Analyze the directory structure of a source project",
    long_about = "treewise scans a project, reports statistics, duplicate names and \
                  structural issues, and writes a JSON report plus a markdown tree.\n\n\
                  Run `treewise [PATH]` to analyze PATH and write both files into the \
                  current directory."
)]
struct Cli {
    /// Path to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a project and write the JSON report and markdown tree
    Analyze {
        /// Path to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Directory receiving the report files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Extra directory names to skip (repeatable)
        #[arg(short, long = "ignore", value_name = "NAME")]
        ignore: Vec<String>,
    },

    /// Print or save the JSON report only
    Export {
        /// Path to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extra directory names to skip (repeatable)
        #[arg(short, long = "ignore", value_name = "NAME")]
        ignore: Vec<String>,
    },

    /// Render the markdown tree from a saved JSON report
    Render {
        /// Saved JSON report
        report: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Analyze {
            path,
            output_dir,
            ignore,
        }) => run_analyze(&path, &output_dir, ignore)?,
        Some(Command::Export {
            path,
            output,
            ignore,
        }) => run_export(&path, output, ignore)?,
        Some(Command::Render { report, output }) => run_render(&report, output)?,
        None => run_analyze(&cli.path, Path::new("."), Vec::new())?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default `info` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Scan and analyze a project.
fn build_report(path: &Path, ignore: Vec<String>) -> Result<Report> {
    let path = path.canonicalize().context("Invalid path")?;
    info!("Analyzing project at {}", path.display());

    let config = ScanConfig::new(&path).with_extra_ignores(ignore);
    info!("Scanning project structure");
    let tree = TreeScanner::new().scan(&config).context("Scan failed")?;

    if tree.has_warnings() {
        info!("{} entries could not be fully read", tree.warnings.len());
    }

    Analyzer::new()
        .analyze(&tree)
        .context("Analysis aborted")
}

/// Analyze and write both documents.
fn run_analyze(path: &Path, output_dir: &Path, ignore: Vec<String>) -> Result<()> {
    let report = build_report(path, ignore)?;

    write_json(&report, &output_dir.join(JSON_FILE_NAME)).context("Failed to save JSON report")?;
    MarkdownRenderer::new()
        .write(&report, &output_dir.join(MARKDOWN_FILE_NAME))
        .context("Failed to save markdown tree")?;

    print_summary(&report);
    Ok(())
}

/// Export the JSON report.
fn run_export(path: &Path, output: Option<PathBuf>, ignore: Vec<String>) -> Result<()> {
    let report = build_report(path, ignore)?;

    match output {
        Some(output_path) => {
            write_json(&report, &output_path).context("Failed to save JSON report")?;
        }
        None => {
            println!("{}", to_json(&report)?);
        }
    }

    Ok(())
}

/// Re-render the markdown tree from a saved report.
fn run_render(report_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let report = read_json(report_path).context("Failed to load report")?;
    report
        .validate()
        .with_context(|| format!("Report {} has an inconsistent tree", report_path.display()))?;

    let renderer = MarkdownRenderer::new();
    match output {
        Some(output_path) => renderer
            .write(&report, &output_path)
            .context("Failed to save markdown tree")?,
        None => println!("{}", renderer.render(&report)),
    }

    Ok(())
}

/// Print the run summary.
fn print_summary(report: &Report) {
    let stats = &report.statistics;

    println!();
    println!("{}", "─".repeat(60));
    println!(" Summary: {}", report.root);
    println!("{}", "─".repeat(60));
    println!("  Files:         {}", stats.total_files);
    println!("  Directories:   {}", stats.total_directories);
    println!("  Total Size:    {}", format_size(stats.total_size));
    println!(
        "  Lines of Code: {}",
        treewise_report::group_thousands(stats.total_lines)
    );

    if !report.issues.is_empty() {
        println!();
        println!(" Found {} issues", report.issues.len());
        let critical = report.count_severity(Severity::Critical);
        if critical > 0 {
            println!("  {critical} critical issues require immediate attention");
        }
    }
    println!();
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
