use std::{fmt::Write, path::Path};

use chrono::Local;
use common::{KB_PER_MB, NS_PER_US};
use default_benches::ScenarioResults;
use eyre::{Context, Result};
use fio::as_f64;
use itertools::Itertools;
use tokio::fs::write;
use tracing::debug;

const TITLE: &str = "# Storage Benchmark Comparison Report";

const FIO_HEADER: &str = "| Scenario | Profile | Read IOPS | Write IOPS | Read BW (MB/s) | Write BW (MB/s) | Read p99 (µs) | Write p99 (µs) |\n\
    |----------|---------|-----------|------------|----------------|-----------------|---------------|----------------|";
const PGBENCH_HEADER: &str = "| Scenario | Test | TPS | Latency |\n\
    |----------|------|-----|----------|";
const MLPERF_HEADER: &str = "| Scenario | Test | Throughput (MB/s) | Samples/s |\n\
    |----------|------|-------------------|----------|";

/// Local time in ISO-8601 with microseconds
pub fn generation_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Renders the comparison report. Everything except the `Generated:` line is
/// fully determined by `results`.
pub fn render_markdown(results: &ScenarioResults, generated: &str) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{TITLE}\n")?;
    writeln!(out, "Generated: {generated}\n")?;
    writeln!(out, "Scenarios compared: {}\n", results.keys().join(", "))?;

    writeln!(out, "## FIO Results\n")?;
    writeln!(out, "{FIO_HEADER}")?;
    for (scenario, bundle) in results {
        for (profile, jobs) in &bundle.fio {
            for job in jobs.iter().filter_map(|entry| entry.job()) {
                writeln!(
                    out,
                    "| {scenario} | {profile} | {:.0} | {:.0} | {:.1} | {:.1} | {:.1} | {:.1} |",
                    as_f64(&job.read_iops),
                    as_f64(&job.write_iops),
                    as_f64(&job.read_bw_kbps) / KB_PER_MB,
                    as_f64(&job.write_bw_kbps) / KB_PER_MB,
                    as_f64(&job.read_lat_p99_ns) / NS_PER_US,
                    as_f64(&job.write_lat_p99_ns) / NS_PER_US,
                )?;
            }
        }
    }

    writeln!(out, "\n## PGBench Results\n")?;
    writeln!(out, "{PGBENCH_HEADER}")?;
    for (scenario, bundle) in results {
        for (test, data) in &bundle.pgbench {
            writeln!(out, "| {scenario} | {test} | {} | {} |", data.tps, data.latency)?;
        }
    }

    writeln!(out, "\n## MLPerf Storage Results\n")?;
    writeln!(out, "{MLPERF_HEADER}")?;
    for (scenario, bundle) in results {
        for test in bundle.mlperf.tests() {
            writeln!(
                out,
                "| {scenario} | {} | {} | {} |",
                test.name_cell(),
                test.throughput_cell(),
                test.samples_cell()
            )?;
        }
    }

    Ok(out)
}

pub async fn write_report(results: &ScenarioResults, path: &Path) -> Result<()> {
    let markdown = render_markdown(results, &generation_timestamp())?;
    write(path, markdown)
        .await
        .context(format!("Write report {}", path.display()))?;
    debug!("Wrote report for {} scenarios", results.len());
    Ok(())
}

/// Dumps the aggregated results as JSON indented by 2 spaces
pub async fn write_json(results: &ScenarioResults, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    write(path, json)
        .await
        .context(format!("Write raw data {}", path.display()))?;
    Ok(())
}
