//! stl-preview — batch PNG preview generation for STL files.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use preview_core::{BatchRunner, RenderOptions};
use tracing_subscriber::EnvFilter;

mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "stl-preview")]
#[command(version, about = "Generate PNG previews from STL files")]
struct Cli {
    /// Directory containing STL files (searched recursively).
    input_dir: PathBuf,

    /// Directory to save PNG previews.
    output_dir: PathBuf,

    /// Image size in pixels (width height).
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [512, 512])]
    size: Vec<u32>,

    /// Output format for the run summary.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Suppress the run summary.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options = RenderOptions::with_size(cli.size[0], cli.size[1]);

    let runner = BatchRunner::new(cli.input_dir, cli.output_dir, options);
    match runner.run() {
        Ok(stats) => {
            output::print_summary(&stats, cli.format, cli.quiet);
            process::exit(stats.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
