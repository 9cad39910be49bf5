//! Dataset loading and source resolution.
//!
//! The problem list is read from a problems.json file found in order of
//! priority:
//! 1. An explicit path from the command line
//! 2. ./problems.json (local project customization)
//! 3. <config dir>/grind-tui/problems.json (global user config)
//! 4. Embedded sample dataset (with a user-visible notice)
//!
//! Any read or parse failure falls back to the embedded dataset so the UI
//! stays usable; the failure is logged and surfaced as a dismissible notice.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{normalize, DatasetSection, Problem};

/// Embedded sample dataset used when no problems.json can be loaded
const EMBEDDED_DATASET: &str = include_str!("../data/fallback.json");

/// File name probed in the working directory and the config directory
const DATASET_FILE_NAME: &str = "problems.json";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A loaded and flattened dataset, ready for the views
#[derive(Debug)]
pub struct LoadedDataset {
    pub problems: Vec<Problem>,
    pub topics: Vec<String>,
    /// The file the dataset came from; `None` when the embedded sample is in use
    pub source: Option<PathBuf>,
    /// Dismissible notice explaining degraded data, if any
    pub notice: Option<String>,
}

impl LoadedDataset {
    fn from_sections(sections: Vec<DatasetSection>, source: Option<PathBuf>) -> Self {
        let (problems, topics) = normalize(sections);
        Self {
            problems,
            topics,
            source,
            notice: None,
        }
    }
}

/// Load the dataset, falling back to the embedded sample on any failure.
/// Never errors: the UI must stay usable with degraded data.
pub fn load(explicit: Option<&Path>) -> LoadedDataset {
    match resolve_source(explicit) {
        Some(path) => match read_sections(&path) {
            Ok(sections) => {
                info!(path = %path.display(), "loaded dataset");
                LoadedDataset::from_sections(sections, Some(path))
            }
            Err(e) => {
                warn!("{e}; falling back to embedded sample dataset");
                let mut loaded = embedded();
                loaded.notice = Some(format!(
                    "Could not load {}; showing built-in sample data.",
                    path.display()
                ));
                loaded
            }
        },
        None => {
            let mut loaded = embedded();
            loaded.notice = Some(format!(
                "No {DATASET_FILE_NAME} found; showing built-in sample data."
            ));
            loaded
        }
    }
}

/// Read and parse a dataset file
pub fn read_sections(path: &Path) -> Result<Vec<DatasetSection>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Find the dataset file in order of priority. Returns `None` when nothing
/// exists, in which case the embedded sample is used.
fn resolve_source(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        // An explicit path is used even if missing, so the failure surfaces
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(DATASET_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join("grind-tui").join(DATASET_FILE_NAME);
        if global.exists() {
            return Some(global);
        }
    }

    None
}

fn embedded() -> LoadedDataset {
    let sections: Vec<DatasetSection> =
        serde_json::from_str(EMBEDDED_DATASET).unwrap_or_else(|e| {
            warn!("embedded dataset is invalid: {e}");
            Vec::new()
        });
    LoadedDataset::from_sections(sections, None)
}
