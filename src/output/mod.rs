//! Harvest artifacts and terminal output

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

pub mod flat_file;
pub mod json;
pub mod table;

/// Prefix shared by every artifact file name
const ARTIFACT_PREFIX: &str = "contributors";

/// Locations of the two files produced by one harvest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Verbatim API response
    pub raw: PathBuf,
    /// Flattened contributor table
    pub flat: PathBuf,
}

impl ArtifactPaths {
    /// Dated artifact paths inside `dir`
    pub fn for_date(dir: &Path, date: NaiveDate) -> Self {
        let stamp = date.format("%Y-%m-%d");
        Self {
            raw: dir.join(format!("{ARTIFACT_PREFIX}-raw-{stamp}.json")),
            flat: dir.join(format!("{ARTIFACT_PREFIX}-{stamp}.csv")),
        }
    }
}
