use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use deadscan::config::{AnalyzerConfig, EntryPolicy};
use deadscan::export::{self, ExportData, ExportFormat};
use deadscan::logging;
use deadscan::Analyzer;

#[derive(Parser)]
#[command(name = "deadscan")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Find JavaScript/TypeScript files unreachable from a project's entry points", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report dead files in a project
    Analyze {
        /// Path to analyze (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Output format: json, csv or markdown
        #[arg(short, long, default_value = "markdown")]
        format: ExportFormat,

        /// Maximum number of dead files listed in markdown output
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Additional directory name to skip (repeatable)
        #[arg(long = "exclude", value_name = "DIR")]
        exclude: Vec<String>,

        /// Additional entry file, relative to the project root (repeatable)
        #[arg(long = "entry", value_name = "FILE")]
        entry: Vec<String>,

        /// Fail instead of guessing when no entry point is found
        #[arg(long)]
        strict_entry: bool,

        /// Number of parser threads
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Exit with status 1 if any dead file is found
        #[arg(long)]
        fail_on_dead: bool,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Analyze {
            path,
            format,
            limit,
            config,
            exclude,
            entry,
            strict_entry,
            jobs,
            fail_on_dead,
        }) => {
            let mut analyzer_config = match config {
                Some(file) => AnalyzerConfig::from_file(&file)
                    .with_context(|| format!("loading config {}", file.display()))?,
                None => AnalyzerConfig::default(),
            };
            analyzer_config.excluded_dirs.extend(exclude);
            analyzer_config.entry_patterns.extend(entry);
            if strict_entry {
                analyzer_config.entry_policy = EntryPolicy::Strict;
            }
            if jobs.is_some() {
                analyzer_config.concurrency = jobs;
            }
            analyzer_config.validate().context("invalid options")?;

            let analysis = Analyzer::new(analyzer_config)
                .analyze(&path)
                .with_context(|| format!("analyzing {}", path.display()))?;

            let data = ExportData::new(&analysis).with_display_limit(limit);
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            export::export(format, &data, &mut out).context("writing report")?;
            out.flush().context("writing report")?;

            if fail_on_dead && analysis.dead_count() > 0 {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Some(Commands::Version) => {
            println!("deadscan v{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("deadscan - Dead File Finder");
            println!("Run 'deadscan analyze' to analyze the current project");
            println!("Run 'deadscan --help' for more information");
            Ok(ExitCode::SUCCESS)
        }
    }
}
