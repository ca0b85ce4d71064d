use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "multidigraph workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the graph benchmarks and write a report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCHES: &[&str] = &["graph_benchmark"];

/// Subset of criterion's `estimates.json`.
#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Subset of criterion's `benchmark.json`.
#[derive(Deserialize)]
struct BenchmarkInfo {
    #[serde(default)]
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
enum Throughput {
    Elements(u64),
    Bytes(u64),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    for bench in BENCHES {
        println!(">>> Running {}", bench);
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.args(["bench", "--bench", bench, "--"]);
        if quick {
            cmd.args(["--measurement-time", "0.1", "--sample-size", "10"]);
            cmd.arg("--noplot");
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to run bench {}", bench))?;
        if !status.success() {
            anyhow::bail!("benchmark {} failed", bench);
        }
        println!("Finished {} in {:.2?}", bench, start.elapsed());
    }
    Ok(())
}

fn generate_report() -> Result<()> {
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = BTreeMap::new();
    collect_results(criterion_dir, criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Graph Benchmark Report")?;
    writeln!(file)?;
    writeln!(file, "| Workload | Mean time | Throughput |")?;
    writeln!(file, "|---|---|---|")?;
    for (workload, (time_ns, rate)) in &results {
        let rate = match rate {
            Some((per_sec, unit)) => format_rate(*per_sec, unit),
            None => "-".to_string(),
        };
        let micros = time_ns / 1_000.0;
        writeln!(file, "| {} | {:.1} µs | {} |", workload, micros, rate)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_rate(per_sec: f64, unit: &str) -> String {
    if per_sec > 1_000_000.0 {
        format!("{:.2}M {}/s", per_sec / 1_000_000.0, unit)
    } else if per_sec > 1_000.0 {
        format!("{:.2}K {}/s", per_sec / 1_000.0, unit)
    } else {
        format!("{:.0} {}/s", per_sec, unit)
    }
}

impl Throughput {
    fn per_iteration(&self) -> (f64, &'static str) {
        match *self {
            Throughput::Elements(n) => (n as f64, "elem"),
            Throughput::Bytes(n) => (n as f64, "B"),
        }
    }
}

/// Walks criterion's output tree collecting `new/estimates.json` files.
///
/// Keys are workload paths relative to `root`; values are the mean time in
/// nanoseconds and, when the bench declared a throughput, its rate per second.
fn collect_results(
    root: &Path,
    dir: &Path,
    results: &mut BTreeMap<String, (f64, Option<(f64, &'static str)>)>,
) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) == Some("report") {
            continue;
        }

        let estimates_path = path.join("new").join("estimates.json");
        if !estimates_path.exists() {
            collect_results(root, &path, results)?;
            continue;
        }

        let raw = fs::read_to_string(&estimates_path)?;
        let estimates: Estimates = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", estimates_path.display()))?;
        let time_ns = estimates.mean.point_estimate;

        let info_path = path.join("new").join("benchmark.json");
        let throughput = fs::read_to_string(&info_path)
            .ok()
            .and_then(|content| serde_json::from_str::<BenchmarkInfo>(&content).ok())
            .and_then(|info| info.throughput);

        let workload = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .display()
            .to_string();
        let rate = throughput.filter(|_| time_ns > 0.0).map(|t| {
            let (amount, unit) = t.per_iteration();
            (amount * 1e9 / time_ns, unit)
        });
        results.insert(workload, (time_ns, rate));
    }
    Ok(())
}
