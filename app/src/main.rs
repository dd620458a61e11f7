use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use tracing::error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod collect;

/// Crates whose log level follows RUST_LOG unless overridden with --log
const MODULES: &[&str] = &[
    "common",
    "default_benches",
    "fio",
    "ioping",
    "pgbench",
    "mlperf",
    "report",
];

/// Collect and compare storage benchmark results
#[derive(Parser)]
struct Cli {
    /// Base directory containing scenario subdirectories
    results_dir: PathBuf,
    /// Output report file
    #[arg(short, long, default_value = "benchmark-report.md")]
    output: String,
    #[arg(short, long)]
    log: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();

    let mut env_filter = EnvFilter::new(format!("bench_report={log_level}"));
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }
    for module in MODULES {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    if let Err(err) = collect::run(&args.results_dir, &args.output).await {
        error!("{err:#?}");
        return Err(err);
    }
    Ok(())
}
