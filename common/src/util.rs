use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::de::DeserializeOwned;
use tokio::fs::{read_dir, read_to_string};

use crate::error::ParseError;

pub async fn read_text_file(path: impl AsRef<Path>) -> Result<String, ParseError> {
    let path = path.as_ref();
    read_to_string(path).await.map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ParseError> {
    let path = path.as_ref();
    let data = read_text_file(path).await?;
    serde_json::from_str(&data).map_err(|source| ParseError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Immediate subdirectories of `dir`, sorted by name
pub async fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut items = read_dir(dir)
        .await
        .context(format!("List directory {}", dir.display()))?;
    let mut dirs = Vec::new();
    while let Some(entry) = items.next_entry().await? {
        // follows symlinks, a linked run directory counts as a run
        if tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir())
        {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// The lexicographically last subdirectory, ie. the most recent timestamped run
pub async fn latest_subdir(dir: &Path) -> Result<Option<PathBuf>> {
    Ok(sorted_subdirs(dir).await?.pop())
}

pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|x| x.to_str())
}

/// Path of the raw JSON dump written next to the markdown report
pub fn report_json_path(output: &str) -> String {
    match output.strip_suffix(".md") {
        Some(base) => format!("{base}.json"),
        None => format!("{output}.json"),
    }
}
