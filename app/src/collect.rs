use std::path::Path;

use common::util::{file_name_str, latest_subdir, report_json_path, sorted_subdirs};
use default_benches::{ScenarioResults, collect_scenario};
use eyre::{Result, bail};
use tracing::{debug, warn};

/// Collects every scenario under `results_dir` and writes the report and its raw JSON
pub async fn run(results_dir: &Path, output: &str) -> Result<()> {
    if !results_dir.is_dir() {
        bail!("{} does not exist", results_dir.display());
    }

    let results = collect_results(results_dir).await?;
    if results.is_empty() {
        bail!("No results found in {}", results_dir.display());
    }

    report::write_report(&results, Path::new(output)).await?;
    println!("Report written to: {output}");

    let json_path = report_json_path(output);
    report::write_json(&results, Path::new(&json_path)).await?;
    println!("Raw data: {json_path}");
    Ok(())
}

/// Every subdirectory of `results_dir` is a scenario. A scenario holding
/// timestamped runs is collected from its latest run only.
pub async fn collect_results(results_dir: &Path) -> Result<ScenarioResults> {
    let mut results = ScenarioResults::new();
    for scenario_dir in sorted_subdirs(results_dir).await? {
        let Some(name) = file_name_str(&scenario_dir) else {
            warn!("Skipping non UTF-8 scenario {}", scenario_dir.display());
            continue;
        };

        let run_dir = match latest_subdir(&scenario_dir).await? {
            Some(latest) => {
                println!(
                    "Collecting: {name} ({})",
                    latest.file_name().unwrap_or_default().to_string_lossy()
                );
                latest
            }
            None => {
                println!("Collecting: {name}");
                scenario_dir.clone()
            }
        };
        debug!("scenario={name} run_dir={}", run_dir.display());
        results.insert(name.to_owned(), collect_scenario(&run_dir).await);
    }
    Ok(results)
}
