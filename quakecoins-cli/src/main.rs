//! QuakeCoins CLI — one-shot snapshot of the quakes-vs-coins pipeline.
//!
//! Commands:
//! - `snapshot` — fetch both series, align, correlate, print the table
//!   and the two coefficients; optionally export the aligned rows as CSV

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use quakecoins_core::pipeline::{
    self, DashboardSnapshot, RefreshOptions, DEFAULT_DAYS, DEFAULT_MIN_MAGNITUDE, MAX_DAYS,
    MIN_DAYS, MIN_MAGNITUDE_CEIL, MIN_MAGNITUDE_FLOOR,
};

#[derive(Parser)]
#[command(
    name = "quakecoins",
    about = "Quakes & Coins — Bitcoin prices vs global earthquakes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, align, and correlate once; print the result.
    Snapshot {
        /// Lookback window in days (7-90).
        #[arg(long, default_value_t = DEFAULT_DAYS)]
        days: u32,

        /// Minimum earthquake magnitude (2.5-7.0).
        #[arg(long = "min-mag", default_value_t = DEFAULT_MIN_MAGNITUDE)]
        min_magnitude: f64,

        /// Skip the live providers entirely; generate synthetic data.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Master seed for the synthetic fallback (implies reproducible output
        /// when combined with --offline).
        #[arg(long)]
        seed: Option<u64>,

        /// Export the aligned rows to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Snapshot {
            days,
            min_magnitude,
            offline,
            seed,
            csv,
        } => snapshot(days, min_magnitude, offline, seed, csv.as_deref()),
    }
}

fn snapshot(
    days: u32,
    min_magnitude: f64,
    offline: bool,
    seed: Option<u64>,
    csv_path: Option<&Path>,
) -> Result<()> {
    if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
        bail!("--days must be between {MIN_DAYS} and {MAX_DAYS}");
    }
    if !(MIN_MAGNITUDE_FLOOR..=MIN_MAGNITUDE_CEIL).contains(&min_magnitude) {
        bail!("--min-mag must be between {MIN_MAGNITUDE_FLOOR} and {MIN_MAGNITUDE_CEIL}");
    }

    let snapshot = pipeline::refresh(RefreshOptions {
        days,
        min_magnitude,
        offline,
        master_seed: seed,
    });

    print_snapshot(&snapshot);

    if let Some(path) = csv_path {
        export_csv(&snapshot, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nWrote {} rows to {}", snapshot.aligned.len(), path.display());
    }
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    println!(
        "Range {} .. {} | min magnitude {:.1} | prices: {} | quakes: {}",
        snapshot.start,
        snapshot.end,
        snapshot.options.min_magnitude,
        snapshot.prices.origin.label(),
        snapshot.quakes.origin.label(),
    );
    println!();
    println!("{:<12} {:>12} {:>7} {:>8}", "date", "btc_usd", "quakes", "avg_mag");
    for row in &snapshot.aligned {
        println!(
            "{:<12} {:>12.2} {:>7} {:>8.2}",
            row.date, row.price_usd, row.eq_count, row.avg_mag
        );
    }

    println!();
    println!("Correlation snapshot (naive Pearson):");
    println!("  price vs quake count:   {}", fmt_coefficient(snapshot.correlations.price_vs_count));
    println!("  price vs avg magnitude: {}", fmt_coefficient(snapshot.correlations.price_vs_mag));
}

fn fmt_coefficient(value: Option<f64>) -> String {
    match value {
        Some(r) => format!("{r:+.4}"),
        None => "undefined".to_string(),
    }
}

fn export_csv(snapshot: &DashboardSnapshot, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "price_usd", "eq_count", "avg_mag"])?;
    for row in &snapshot.aligned {
        writer.write_record([
            row.date.to_string(),
            format!("{:.2}", row.price_usd),
            row.eq_count.to_string(),
            format!("{:.4}", row.avg_mag),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_snapshot_exports_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aligned.csv");

        let snapshot = pipeline::refresh(RefreshOptions {
            days: 10,
            min_magnitude: 3.0,
            offline: true,
            master_seed: Some(42),
        });
        export_csv(&snapshot, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "date,price_usd,eq_count,avg_mag");
        assert_eq!(lines.count(), 10);
    }

    #[test]
    fn coefficient_formatting() {
        assert_eq!(fmt_coefficient(Some(0.1234567)), "+0.1235");
        assert_eq!(fmt_coefficient(Some(-0.5)), "-0.5000");
        assert_eq!(fmt_coefficient(None), "undefined");
    }

    #[test]
    fn cli_parses_snapshot_flags() {
        let cli = Cli::try_parse_from([
            "quakecoins",
            "snapshot",
            "--days",
            "14",
            "--min-mag",
            "4.5",
            "--offline",
            "--seed",
            "7",
        ])
        .unwrap();
        let Commands::Snapshot {
            days,
            min_magnitude,
            offline,
            seed,
            csv,
        } = cli.command;
        assert_eq!(days, 14);
        assert_eq!(min_magnitude, 4.5);
        assert!(offline);
        assert_eq!(seed, Some(7));
        assert!(csv.is_none());
    }
}
