use core::fmt::Debug;
use std::{collections::BTreeMap, path::Path};

use tokio::fs::read_dir;
use tracing::{debug, warn};

#[async_trait::async_trait]
pub trait ResultParser: Debug + Send + Sync {
    /// Parsed record for a single result file
    type Output: Send;

    /// Name of the tool, also the name of its subdirectory in a scenario
    fn name(&self) -> &'static str;
    /// Extension of the result files, without the dot
    fn extension(&self) -> &'static str;
    /// Parses a single result file
    ///
    /// Must not fail: read or parse errors are turned into a placeholder
    /// record so one bad file never hides its siblings.
    async fn parse(&self, path: &Path) -> Self::Output;
}

/// Parses every result file in `<scenario_dir>/<tool>/`, keyed by file stem.
///
/// Files sharing a stem overwrite each other.
pub async fn parse_tool_dir<P: ResultParser>(
    parser: &P,
    scenario_dir: &Path,
) -> BTreeMap<String, P::Output> {
    let mut results = BTreeMap::new();
    let tool_dir = scenario_dir.join(parser.name());
    if !tool_dir.is_dir() {
        return results;
    }

    let mut items = match read_dir(&tool_dir).await {
        Ok(items) => items,
        Err(err) => {
            warn!("Could not list {}: {err}", tool_dir.display());
            return results;
        }
    };

    loop {
        let entry = match items.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(err) => {
                warn!("Could not list {}: {err}", tool_dir.display());
                break;
            }
        };
        let path = entry.path();
        if !path.is_file()
            || path.extension().and_then(|x| x.to_str()) != Some(parser.extension())
        {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|x| x.to_str()) else {
            warn!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        let stem = stem.to_owned();
        debug!("Parsing {} result {}", parser.name(), path.display());
        results.insert(stem, parser.parse(&path).await);
    }

    debug!(
        "Parsed {} {} results in {}",
        results.len(),
        parser.name(),
        scenario_dir.display()
    );
    results
}
