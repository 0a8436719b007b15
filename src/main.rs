use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

mod config;
mod error;
mod logging;
mod pipeline;
mod report;

use crate::config::ReportConfig;
use crate::pipeline::aggregate::{partition, SummaryStats};
use crate::pipeline::reconstruct::split_by_field_count;
use crate::pipeline::{Pipeline, PipelineResult};
use crate::report::{build_sheets, xlsx, ReportLayout};

#[derive(Parser)]
#[command(name = "accme_report")]
#[command(about = "ACCME provider data report builder")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct record boundaries from space-joined scraped text
    Split {
        /// Joined text file produced by the scrape step
        input: PathBuf,
        /// Output file, one tilde-delimited record per line
        output: PathBuf,
        /// Append to the output file instead of overwriting it
        #[arg(long)]
        append: bool,
    },
    /// Build the xlsx report from clean one-record-per-line data
    Report {
        /// Record file, one tilde-delimited record per line
        input: PathBuf,
        /// Destination workbook (.xlsx)
        output: PathBuf,
        /// Path to report.toml (defaults to ./report.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Reconstruct boundaries and build the report in one pass
    Run {
        /// Joined text file produced by the scrape step
        input: PathBuf,
        /// Destination workbook (.xlsx)
        output: PathBuf,
        /// Path to report.toml (defaults to ./report.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> error::Result<ReportConfig> {
    match path {
        Some(p) => ReportConfig::load_from(p),
        None => ReportConfig::load(),
    }
}

fn run_split(input: &PathBuf, output: &PathBuf, append: bool) -> error::Result<()> {
    let text = fs::read_to_string(input)?;
    let outcome = split_by_field_count(text.trim());

    let mut file = OpenOptions::new()
        .create(true)
        .append(append)
        .write(!append)
        .truncate(!append)
        .open(output)?;
    for record in &outcome.records {
        writeln!(file, "{}", record)?;
    }

    info!(
        records = outcome.records.len(),
        short_records = outcome.short_records,
        "split complete"
    );
    println!(
        "{} {} records to {}",
        if append { "Appended" } else { "Wrote" },
        outcome.records.len(),
        output.display()
    );
    // Sanity peek at the head and tail of the reconstruction.
    for (i, record) in outcome.records.iter().take(3).enumerate() {
        let fields: Vec<&str> = record.split('~').collect();
        let name: String = fields[0].chars().take(50).collect();
        println!(
            "  Rec {}: {} fields, name='{}', id='{}'",
            i,
            fields.len(),
            name,
            fields.last().unwrap_or(&"").trim()
        );
    }
    if outcome.records.len() > 3 {
        let last = outcome.records.last().unwrap();
        let fields: Vec<&str> = last.split('~').collect();
        let name: String = fields[0].chars().take(50).collect();
        println!(
            "  Last rec: {} fields, name='{}', id='{}'",
            fields.len(),
            name,
            fields.last().unwrap_or(&"").trim()
        );
    }
    Ok(())
}

fn write_report(result: &PipelineResult, output: &PathBuf, config: &ReportConfig) -> error::Result<()> {
    let parts = partition(&result.records);
    let sheets = build_sheets(&result.records, &parts);
    let layout = ReportLayout::new(config.include_mh_columns);
    xlsx::write_workbook(output, &sheets, &layout)?;
    println!("Saved to {}", output.display());
    Ok(())
}

fn print_summary(stats: &SummaryStats) {
    println!("\n📊 Report Summary");
    println!("   Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("   Total records: {}", stats.total);
    println!(
        "   Tier 1: {}, Tier 2: {}, Tier 3: {}",
        stats.tier_counts[0], stats.tier_counts[1], stats.tier_counts[2]
    );
    println!(
        "   Spanish Market: {}, High Volume: {}, Commendation: {}, MH Relevant: {}",
        stats.spanish, stats.high_volume, stats.commendation, stats.mh_relevant
    );

    println!("\nTop 10 states:");
    for (state, count) in &stats.top_states {
        println!("  {}: {}", state, count);
    }

    println!("\nBy accreditation type:");
    for (acc_type, count) in &stats.by_accreditation_type {
        println!("  {}: {}", acc_type, count);
    }

    println!("\nData completeness:");
    println!("  Contact names: {}%", stats.contact_pct);
    println!("  Websites: {}%", stats.website_pct);
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            output,
            append,
        } => {
            println!("🔄 Reconstructing record boundaries...");
            run_split(&input, &output, append)?;
        }
        Commands::Report {
            input,
            output,
            config,
        } => {
            println!("📑 Building provider report...");
            let config = load_config(config)?;
            let text = fs::read_to_string(&input)?;
            let result = Pipeline::new(config.clone()).run_from_lines(&text);
            write_report(&result, &output, &config)?;
            print_summary(&result.stats);
        }
        Commands::Run {
            input,
            output,
            config,
        } => {
            println!("🚀 Running full pipeline (split + report)...");
            let config = load_config(config)?;
            let text = fs::read_to_string(&input)?;
            let result = Pipeline::new(config.clone()).run_from_blob(&text);
            write_report(&result, &output, &config)?;
            print_summary(&result.stats);
        }
    }
    Ok(())
}
