//! Summary output formatting for the CLI.

use clap::ValueEnum;
use colored::Colorize;
use preview_core::RunStatistics;

/// How the run summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print the end-of-run summary in the requested format.
pub fn print_summary(stats: &RunStatistics, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }

    match format {
        OutputFormat::Text => print_text(stats),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(stats) {
                println!("{}", json);
            }
        }
    }
}

fn print_text(stats: &RunStatistics) {
    println!();
    println!("Processing summary:");
    println!("  Total files:  {}", stats.total);
    println!(
        "  {} {}",
        "Generated:".green(),
        stats.success.to_string().green().bold()
    );

    let failed = stats.failure.to_string();
    println!(
        "  {} {}",
        "Failed:".red(),
        if stats.failure > 0 {
            failed.red().bold()
        } else {
            failed.normal()
        }
    );

    println!(
        "  {} {}",
        "Skipped:".yellow(),
        stats.skipped.to_string().yellow()
    );
    println!("  Elapsed:      {:.2}s", stats.elapsed_seconds);

    if stats.failure > 0 {
        eprintln!(
            "{} {} file(s) could not be rendered by any strategy",
            "⚠".yellow().bold(),
            stats.failure
        );
    } else if stats.total > 0 {
        println!("{} all previews up to date", "✓".green().bold());
    }
}
