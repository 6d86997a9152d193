//! Command-line interface for treedump.
//!
//! Walks a directory, writes its tree and the contents of matching files into
//! one text document, and reports where the document went.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::{ExitCode, exit};
use treedump::{DumpBuilder, DumpError, DumpOptions, scan_folder};

/// treedump — dump a directory tree and its files into one document
#[derive(Parser)]
#[command(name = "treedump", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    root: Option<PathBuf>,

    /// Output file, `-` for stdout (default OUTPUT.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exclusion pattern file (default .gitignore)
    #[arg(short, long)]
    exclude_file: Option<PathBuf>,

    /// Do not read any exclusion file
    #[arg(long, conflicts_with = "exclude_file")]
    no_exclude_file: bool,

    /// Only dump files whose name ends with this suffix (can be repeated)
    #[arg(short = 't', long = "type")]
    file_types: Vec<String>,

    /// Dump every file, ignoring suffixes from the config file
    #[arg(long, conflicts_with = "file_types")]
    all_types: bool,

    /// Extra exclusion patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// JSON file with default options; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not print the completion message
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON instead of the completion message
    #[arg(long)]
    json_summary: bool,

    /// More log output (needs the `logging` feature)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_options(self) -> Result<DumpOptions, DumpError> {
        let base = match &self.config {
            Some(path) => DumpOptions::from_json_file(path)?,
            None => DumpOptions::default(),
        };
        let mut extra_patterns = base.extra_patterns.clone();
        extra_patterns.extend(self.ignore_patterns);

        let mut builder = DumpBuilder::from_options(base).extra_patterns(extra_patterns);
        if let Some(root) = self.root {
            builder = builder.root(root);
        }
        if let Some(output) = self.output {
            builder = builder.output(output);
        }
        if self.no_exclude_file {
            builder = builder.no_exclusion_file();
        } else if let Some(path) = self.exclude_file {
            builder = builder.exclusion_file(path);
        }
        if self.all_types {
            builder = builder.all_file_types();
        } else if !self.file_types.is_empty() {
            builder = builder.file_types(self.file_types);
        }
        Ok(builder.build())
    }
}

#[cfg(feature = "logging")]
fn init_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = match verbose {
        0 => "treedump=info",
        _ => "treedump=debug",
    };
    let filter =
        EnvFilter::try_from_env("TREEDUMP_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let report = if cli.json_summary {
        Report::Json
    } else if cli.quiet {
        Report::Quiet
    } else {
        Report::Message
    };
    #[cfg(feature = "logging")]
    init_logging(cli.verbose);
    #[cfg(not(feature = "logging"))]
    let _ = cli.verbose;

    match cli.into_options().and_then(|options| run(&options, report)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Report {
    Message,
    Quiet,
    Json,
}

fn run(options: &DumpOptions, report: Report) -> Result<(), DumpError> {
    let summary = scan_folder(options)?;
    #[cfg(feature = "logging")]
    tracing::info!(
        "{} tree entries, {} files dumped",
        summary.tree_entries,
        summary.files_written
    );
    match report {
        Report::Quiet => {}
        Report::Json => {
            let json = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| {
                eprintln!("JSON serialization error: {}", e);
                exit(1);
            });
            if options.writes_to_stdout() {
                eprintln!("{}", json);
            } else {
                println!("{}", json);
            }
        }
        Report::Message if options.writes_to_stdout() => {
            eprintln!("Content dumped to stdout");
        }
        Report::Message => {
            println!("Content dumped to {}", options.output.display());
        }
    }
    Ok(())
}
