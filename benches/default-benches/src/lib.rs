use std::{collections::BTreeMap, path::Path};

use common::parser::parse_tool_dir;
use fio::{Fio, FioJobEntry};
use ioping::{Ioping, IopingSummary};
use mlperf::result::MlperfResults;
use pgbench::{Pgbench, PgbenchResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Scenario name to its collected results, ordered by scenario name
pub type ScenarioResults = BTreeMap<String, MetricsBundle>;

/// Everything collected for one scenario, keyed by tool and then file stem.
///
/// `dd`, `bonnie` and `sysbench` have no parser yet and are always empty.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub fio: BTreeMap<String, Vec<FioJobEntry>>,
    pub ioping: BTreeMap<String, IopingSummary>,
    pub dd: BTreeMap<String, Value>,
    pub bonnie: BTreeMap<String, Value>,
    pub pgbench: BTreeMap<String, PgbenchResult>,
    pub sysbench: BTreeMap<String, Value>,
    pub mlperf: MlperfResults,
}

pub async fn collect_scenario(run_dir: &Path) -> MetricsBundle {
    debug!("Collecting results from {}", run_dir.display());
    MetricsBundle {
        fio: parse_tool_dir(&Fio, run_dir).await,
        ioping: parse_tool_dir(&Ioping, run_dir).await,
        pgbench: parse_tool_dir(&Pgbench, run_dir).await,
        mlperf: mlperf::load(run_dir).await,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_collect_scenario() {
        let temp = tempfile::tempdir().unwrap();
        let run = temp.path();
        for dir in ["fio", "ioping", "pgbench", "mlperf"] {
            create_dir_all(run.join(dir)).unwrap();
        }
        write(
            run.join("fio/randread.json"),
            json!({ "jobs": [{ "jobname": "randread", "read": { "iops": 100 } }] }).to_string(),
        )
        .unwrap();
        write(run.join("fio/broken.json"), "not json").unwrap();
        write(run.join("fio/notes.txt"), "ignored").unwrap();
        write(run.join("ioping/latency.txt"), "a\nb\nc\nd\n").unwrap();
        write(run.join("pgbench/rw.txt"), "tps = 10 (x)\n").unwrap();
        write(
            run.join("mlperf/results.json"),
            json!({ "tests": [{ "name": "unet3d" }] }).to_string(),
        )
        .unwrap();

        let bundle = collect_scenario(run).await;
        assert_eq!(bundle.fio.keys().collect::<Vec<_>>(), vec!["broken", "randread"]);
        assert_eq!(bundle.fio["randread"][0].job().unwrap().read_iops, serde_json::Number::from(100));
        assert!(bundle.fio["broken"][0].job().is_none());
        assert_eq!(bundle.ioping["latency"].summary, vec!["b", "c", "d"]);
        assert_eq!(bundle.pgbench["rw"].tps, "tps = 10 (x)");
        assert_eq!(bundle.mlperf.tests().count(), 1);
        assert!(bundle.dd.is_empty() && bundle.bonnie.is_empty() && bundle.sysbench.is_empty());
    }

    #[tokio::test]
    async fn test_collect_empty_scenario() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(collect_scenario(temp.path()).await, MetricsBundle::default());
    }

    #[test]
    fn test_bundle_key_order() {
        let json = serde_json::to_string(&MetricsBundle::default()).unwrap();
        assert_eq!(
            json,
            r#"{"fio":{},"ioping":{},"dd":{},"bonnie":{},"pgbench":{},"sysbench":{},"mlperf":{}}"#
        );
    }
}
