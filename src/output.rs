//! Output formatting and styling module.
//!
//! Centralizes all CLI output: colored status messages, a progress bar for
//! file processing, and the per-file summary table printed after a run.

use crate::edge_reverser::RunSummary;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar sized for the number of files to process.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use edgeflip::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(12);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the per-file summary table for a completed run.
    pub fn summary_table(summary: &RunSummary) {
        Self::header("SUMMARY");

        let max_name_len = summary
            .files
            .iter()
            .map(|stats| stats.file_name.len())
            .max()
            .unwrap_or(0)
            .max(4); // At least "File" width

        println!(
            "{:<width$} | {:>8} | {:>8} | {:>8}",
            "File".bold(),
            "Lines".bold(),
            "Swapped".bold(),
            "Passed".bold(),
            width = max_name_len
        );
        println!("{}", "-".repeat(max_name_len + 34));

        for stats in &summary.files {
            println!(
                "{:<width$} | {:>8} | {:>8} | {:>8}",
                stats.file_name,
                stats.lines,
                stats.swapped.to_string().green(),
                stats.passed_through,
                width = max_name_len
            );
        }

        println!("{}", "-".repeat(max_name_len + 34));
        println!(
            "{:<width$} | {:>8} | {:>8} | {:>8}",
            "Total".bold(),
            summary.total_lines(),
            summary.total_swapped().to_string().green().bold(),
            summary.total_passed_through(),
            width = max_name_len
        );
    }
}
