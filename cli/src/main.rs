//! docstrip CLI - safe document text extraction and cleanup
//!
//! A command-line tool for extracting and cleaning text from DOCX and TXT files.

mod batch;
mod logger;

use batch::{BatchConfig, BatchReport, OutputNamer, Status};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::*;
use docstrip::{CleanOptions, CleanPreset, CleanStats};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Safe text extraction and cleanup for DOCX and TXT files
#[derive(Parser)]
#[command(
    name = "docstrip",
    version,
    about = "Extract and clean text from documents",
    long_about = "docstrip - safe text extraction from DOCX and TXT files.\n\n\
                  Rejects archives with path-escaping entries, then normalizes \
                  whitespace, drops page numbers and other artifacts, and reports \
                  what changed."
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean files and directories, writing one .txt per input
    Clean {
        /// Input files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: beside each input as <name>.clean.txt)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        cleaning: CleanArgs,
    },

    /// Print the text of a single document
    Extract {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Apply cleanup before printing
        #[arg(long)]
        clean: bool,

        #[command(flatten)]
        cleaning: CleanArgs,
    },

    /// Show version information
    Version,
}

/// Cleanup flags shared by subcommands
#[derive(Args, Clone)]
struct CleanArgs {
    /// Cleanup preset
    #[arg(long, value_enum, default_value = "standard")]
    preset: PresetMode,

    /// Join the lines of each paragraph
    #[arg(short, long)]
    merge_lines: bool,

    /// Keep lines that look like page numbers
    #[arg(long)]
    keep_page_numbers: bool,

    /// Keep lines made only of punctuation
    #[arg(long)]
    keep_punctuation: bool,

    /// Keep consecutive duplicate lines
    #[arg(long)]
    keep_duplicates: bool,

    /// Apply Unicode NFC normalization
    #[arg(long)]
    nfc: bool,
}

/// Cleanup preset
#[derive(Clone, Copy, ValueEnum)]
enum PresetMode {
    /// Whitespace only
    Minimal,
    /// Whitespace plus artifact removal
    Standard,
    /// Standard plus paragraph merging and NFC
    Aggressive,
}

impl From<PresetMode> for CleanPreset {
    fn from(mode: PresetMode) -> Self {
        match mode {
            PresetMode::Minimal => CleanPreset::Minimal,
            PresetMode::Standard => CleanPreset::Standard,
            PresetMode::Aggressive => CleanPreset::Aggressive,
        }
    }
}

impl From<&CleanArgs> for CleanOptions {
    fn from(args: &CleanArgs) -> Self {
        let mut options = CleanOptions::from_preset(args.preset.into());
        if args.merge_lines {
            options.merge_lines = true;
        }
        if args.keep_page_numbers {
            options.remove_page_numbers = false;
        }
        if args.keep_punctuation {
            options.remove_punctuation_lines = false;
        }
        if args.keep_duplicates {
            options.remove_duplicates = false;
        }
        if args.nfc {
            options.normalize_unicode = true;
        }
        options
    }
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when some input could not be processed.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Clean {
            inputs,
            output_dir,
            recursive,
            dry_run,
            json,
            cleaning,
        } => {
            let files = batch::collect_inputs(&inputs, recursive);
            if files.is_empty() {
                println!("{} No .docx or .txt files found", "!".yellow().bold());
                return Ok(true);
            }

            let config = BatchConfig {
                output_dir,
                options: CleanOptions::from(&cleaning),
                dry_run,
            };
            let report = clean_files(&files, &config, json);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report, dry_run);
            }
            Ok(report.failed == 0)
        }

        Commands::Extract {
            input,
            output,
            clean,
            cleaning,
        } => {
            let Some(raw) = docstrip::extract_text(&input) else {
                eprintln!(
                    "{} Could not extract text from {}",
                    "✗".red().bold(),
                    input.display()
                );
                return Ok(false);
            };

            let text = if clean {
                let (cleaned, stats) = docstrip::clean_text(&raw, &CleanOptions::from(&cleaning));
                log::info!("{} changes applied", stats.total_changes());
                cleaned
            } else {
                raw
            };

            write_output(output.as_ref(), &text)?;
            if let Some(path) = output {
                println!("{} Extracted text: {}", "✓".green().bold(), path.display());
            }
            Ok(true)
        }

        Commands::Version => {
            print_version();
            Ok(true)
        }
    }
}

fn clean_files(files: &[PathBuf], config: &BatchConfig, quiet_progress: bool) -> BatchReport {
    let pb = if quiet_progress {
        ProgressBar::hidden()
    } else {
        create_progress(files.len() as u64)
    };

    let mut namer = OutputNamer::default();
    let mut report = BatchReport::default();

    for path in files {
        pb.set_message(path.display().to_string());
        let file_report = batch::process_file(path, config, &mut namer);

        if !quiet_progress {
            match file_report.status {
                Status::Cleaned => {
                    let changes = file_report
                        .stats
                        .map(|s| s.total_changes())
                        .unwrap_or_default();
                    pb.println(format!(
                        "{} {} ({} changes)",
                        "✓".green().bold(),
                        path.display(),
                        changes
                    ));
                }
                Status::Failed => {
                    pb.println(format!(
                        "{} {} ({}, skipped)",
                        "✗".red().bold(),
                        path.display(),
                        file_report.error.as_deref().unwrap_or("failed")
                    ));
                }
            }
        }

        report.push(file_report);
        pb.inc(1);
    }

    pb.finish_and_clear();
    report
}

fn print_summary(report: &BatchReport, dry_run: bool) {
    println!();
    println!("{}", "Cleaning Statistics".cyan().bold());
    println!("{}", "─".repeat(40));
    print_stats(&report.totals);
    println!("{}", "─".repeat(40));

    let verb = if dry_run { "Would clean" } else { "Cleaned" };
    println!(
        "{} {} {} file(s), {} failed",
        if report.failed == 0 {
            "✓".green().bold()
        } else {
            "!".yellow().bold()
        },
        verb,
        report.cleaned,
        report.failed
    );
}

fn print_stats(stats: &CleanStats) {
    println!("{}: {}", "Lines merged".bold(), stats.lines_merged);
    println!("{}: {}", "Blank regions removed".bold(), stats.blank_lines_removed);
    println!("{}: {}", "Whitespace runs collapsed".bold(), stats.whitespace_collapsed);
    println!("{}: {}", "Lines trimmed".bold(), stats.lines_trimmed);
    println!("{}: {}", "Page numbers removed".bold(), stats.page_numbers_removed);
    println!(
        "{}: {}",
        "Punctuation lines removed".bold(),
        stats.punctuation_lines_removed
    );
    println!("{}: {}", "Duplicates removed".bold(), stats.duplicates_removed);
}

fn print_version() {
    println!("{} {}", "docstrip".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Safe text extraction and cleanup for documents");
    println!();
    println!("Supported formats: DOCX, TXT");
}

fn create_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_clean_args_override_preset() {
        let cli = Cli::parse_from([
            "docstrip",
            "clean",
            "docs",
            "--preset",
            "minimal",
            "--merge-lines",
            "--nfc",
        ]);
        let Commands::Clean { cleaning, .. } = cli.command else {
            panic!("expected clean subcommand");
        };
        let options = CleanOptions::from(&cleaning);
        assert!(options.merge_lines);
        assert!(options.normalize_unicode);
        assert!(!options.remove_page_numbers);
    }

    #[test]
    fn test_keep_flags() {
        let cli = Cli::parse_from(["docstrip", "extract", "a.txt", "--clean", "--keep-duplicates"]);
        let Commands::Extract { cleaning, clean, .. } = cli.command else {
            panic!("expected extract subcommand");
        };
        assert!(clean);
        let options = CleanOptions::from(&cleaning);
        assert!(!options.remove_duplicates);
        assert!(options.remove_page_numbers);
    }
}
