//! bench-report command line
//!
//! With no arguments, reads `bench/out/results.csv` and writes charts and the
//! summary table to `bench/out/`, both relative to the working directory.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bench_report::config::{ReportConfig, ReportConfigBuilder};
use bench_report::logging;
use bench_report::pipeline::{ReportPipeline, RunReport};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate charts and a summary table from HNSW benchmark results", long_about = None)]
struct Args {
    /// Results CSV (default: bench/out/results.csv)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory (default: bench/out)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory relative paths are resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Do not echo the summary table to the console
    #[arg(long)]
    no_console: bool,

    /// Also print the artifact inventory as JSON
    #[arg(long)]
    inventory_json: bool,
}

impl Args {
    fn into_config(self) -> Result<(ReportConfig, PathBuf, bool)> {
        let base = match &self.config {
            Some(path) => ReportConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ReportConfig::default(),
        };

        let mut builder = ReportConfigBuilder::from_config(base);
        if let Some(input) = self.input {
            builder = builder.input(input);
        }
        if let Some(dir) = self.output_dir {
            builder = builder.output_dir(dir);
        }
        if self.no_console {
            builder = builder.console_summary(false);
        }

        Ok((builder.build(), self.root, self.inventory_json))
    }
}

fn print_report(report: &RunReport, inventory_json: bool) -> Result<()> {
    println!("Loaded {} rows", report.rows_loaded);

    for notice in &report.skipped {
        println!("{notice}");
    }

    if let Some(summary) = &report.console_summary {
        println!();
        print!("{summary}");
    }

    for artifact in &report.artifacts {
        println!("Saved: {}", artifact.path().display());
    }
    println!("\nDone! All outputs saved to: {}", report.output_dir.display());

    if inventory_json {
        let json = serde_json::to_string_pretty(&report.artifacts)
            .context("serializing artifact inventory")?;
        println!("{json}");
    }
    Ok(())
}

fn run() -> Result<()> {
    let args = Args::parse();
    logging::init_subscriber().context("installing log subscriber")?;

    let (config, root, inventory_json) = args.into_config()?;

    println!("Loading benchmark results...");
    let report = ReportPipeline::new(config).with_root(root).run()?;
    print_report(&report, inventory_json)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
