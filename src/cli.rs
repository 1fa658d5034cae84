//! Command-line interface module for edgeflip.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and config-file resolution
//! - Orchestration of the directory reversal run
//! - Dry-run previewing
//! - Progress and summary reporting

use crate::config::{CompiledSelect, ReverseConfig};
use crate::edge_reverser::EdgeReverser;
use crate::output::OutputFormatter;
use crate::report::RunReport;
use clap::Parser;
use std::path::PathBuf;

/// Reverse a directory of tab-delimited edge lists.
///
/// Reads every file in the source directory, swaps the two tab-separated
/// fields of each well-formed line, and writes the result to a same-named
/// file in the destination directory. Malformed lines are copied through
/// unchanged.
#[derive(Debug, Parser)]
#[command(name = "edgeflip", version)]
pub struct Cli {
    /// Directory containing tab-delimited edge files (default: edges).
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Directory to write reversed edge files into (default: edges_reversed).
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List the files that would be processed without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs the CLI application with the given arguments.
///
/// This is the main entry point for CLI operations. Configuration is loaded
/// from file (or defaults), command-line flags override the configured
/// source and destination directories, and the run either previews
/// (`--dry-run`) or performs the reversal.
///
/// # Examples
///
/// ```no_run
/// use edgeflip::cli::{Cli, run_cli};
/// use clap::Parser;
///
/// let cli = Cli::parse_from(["edgeflip", "--source", "edges"]);
/// match run_cli(cli) {
///     Ok(()) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: Cli) -> Result<(), String> {
    let mut config = ReverseConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;

    if let Some(source) = cli.source {
        config.source_dir = source;
    }
    if let Some(dest) = cli.dest {
        config.dest_dir = dest;
    }

    let select = config
        .select
        .clone()
        .compile()
        .map_err(|e| format!("Error compiling selection rules: {}", e))?;

    if cli.dry_run {
        dry_run(&config, &select)
    } else {
        reverse_run(&config, &select)
    }
}

/// Performs the reversal run and prints progress and a summary.
fn reverse_run(config: &ReverseConfig, select: &CompiledSelect) -> Result<(), String> {
    OutputFormatter::info(&format!(
        "Reversing edges: {} -> {}",
        config.source_dir.display(),
        config.dest_dir.display()
    ));

    EdgeReverser::ensure_dest_dir(&config.dest_dir).map_err(|e| format!("Error: {}", e))?;
    let files = EdgeReverser::collect_files(&config.source_dir, select, config.sorted)
        .map_err(|e| format!("Error: {}", e))?;

    if files.is_empty() {
        OutputFormatter::warning("No files found in the source directory.");
    }

    let pb = OutputFormatter::create_progress_bar(files.len() as u64);
    let mut summary = crate::edge_reverser::RunSummary::default();

    for input_path in &files {
        let file_name = match input_path.file_name() {
            Some(name) => name,
            None => continue,
        };
        pb.set_message(file_name.to_string_lossy().to_string());
        let output_path = config.dest_dir.join(file_name);
        let stats = EdgeReverser::reverse_file(input_path, &output_path)
            .map_err(|e| format!("Error: {}", e))?;
        summary.files.push(stats);
        pb.inc(1);
    }
    pb.finish_and_clear();

    OutputFormatter::summary_table(&summary);

    if config.report {
        let report = RunReport::new(&summary, &config.source_dir, &config.dest_dir);
        if let Err(e) = report.save(&config.dest_dir) {
            OutputFormatter::warning(&format!("Could not save run report: {}", e));
        }
    }

    OutputFormatter::success("Processing complete!");
    Ok(())
}

/// Previews a run: lists the files that would be processed, with their line
/// counts, without creating the destination or writing anything.
fn dry_run(config: &ReverseConfig, select: &CompiledSelect) -> Result<(), String> {
    OutputFormatter::dry_run_notice(&format!(
        "Analyzing contents of: {}",
        config.source_dir.display()
    ));

    let files = EdgeReverser::collect_files(&config.source_dir, select, config.sorted)
        .map_err(|e| format!("Error: {}", e))?;

    if files.is_empty() {
        OutputFormatter::plain("No files found to process.");
        return Ok(());
    }

    let mut total_lines = 0;
    for input_path in &files {
        let lines = EdgeReverser::count_lines(input_path).map_err(|e| format!("Error: {}", e))?;
        total_lines += lines;
        let file_name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        OutputFormatter::plain(&format!(
            " - {} ({} {})",
            file_name,
            lines,
            if lines == 1 { "line" } else { "lines" }
        ));
        OutputFormatter::plain(&format!(
            "   → Would write {}",
            config.dest_dir.join(&file_name).display()
        ));
    }

    OutputFormatter::plain(&format!(
        "\nTotal: {} files, {} lines",
        files.len(),
        total_lines
    ));
    OutputFormatter::success("Dry run complete. No files were modified.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_arguments() {
        let cli = Cli::parse_from(["edgeflip"]);
        assert!(cli.source.is_none());
        assert!(cli.dest.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from([
            "edgeflip",
            "--source",
            "in",
            "--dest",
            "out",
            "--dry-run",
        ]);
        assert_eq!(cli.source, Some(PathBuf::from("in")));
        assert_eq!(cli.dest, Some(PathBuf::from("out")));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_run_cli_missing_source_fails() {
        let cli = Cli {
            source: Some(PathBuf::from("/no/such/source/dir")),
            dest: Some(std::env::temp_dir().join("edgeflip_cli_test_dest")),
            config: None,
            dry_run: true,
        };
        // Dry run touches nothing, so the missing source surfaces as an error.
        assert!(run_cli(cli).is_err());
    }
}
