//! Harvest pipeline: fetch, archive, flatten, persist
//!
//! The raw response is archived before flattening so that a structurally
//! broken tree can still be inspected. The flat CSV is only written once
//! the whole tree has flattened successfully.

use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;

use crate::client::ContributorApi;
use crate::error::Result;
use crate::flatten::{self, FlatRecord};
use crate::output::{ArtifactPaths, flat_file, json};

/// Outcome of a successful harvest
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestSummary {
    pub harvest_date: NaiveDate,
    pub root_count: usize,
    pub record_count: usize,
    pub raw_path: String,
    pub flat_path: String,
    pub records: Vec<FlatRecord>,
}

/// Run one harvest into `output_dir`, naming artifacts after `date`
pub async fn harvest<A: ContributorApi + ?Sized>(
    api: &A,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<HarvestSummary> {
    let paths = ArtifactPaths::for_date(output_dir, date);

    let fetched = api.fetch_contributors().await?;
    let node_count: usize = fetched.roots.iter().map(flatten::count_nodes).sum();
    info!(
        "Fetched {} contributors under {} top-level organisations",
        node_count,
        fetched.roots.len()
    );

    json::write_snapshot(&paths.raw, &fetched.raw)?;

    let records = flatten::flatten_all(&fetched.roots)?;
    debug!("Flattened {} records", records.len());

    flat_file::write_csv(&paths.flat, &records)?;

    Ok(HarvestSummary {
        harvest_date: date,
        root_count: fetched.roots.len(),
        record_count: records.len(),
        raw_path: paths.raw.display().to_string(),
        flat_path: paths.flat.display().to_string(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockContributorClient;
    use crate::error::{Error, FetchError, FlattenError};
    use serde_json::json;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn listing() -> serde_json::Value {
        json!({
            "contributor": [
                {
                    "id": "1",
                    "name": "Adelaide City Libraries",
                    "totalHoldings": "100",
                    "nucCode": ["SACL"],
                    "children": [
                        { "id": "2", "name": "City Library", "totalHoldings": "60" },
                        { "id": "3", "name": "Adelaide City Libraries Archive", "totalHoldings": 40 }
                    ]
                },
                { "id": "4", "name": "State Library", "totalHoldings": "7" }
            ]
        })
    }

    #[tokio::test]
    async fn test_harvest_writes_both_artifacts() {
        let temp = tempdir().unwrap();
        let mock = MockContributorClient::new().with_body(listing());

        let summary = harvest(&mock, temp.path(), date()).await.unwrap();

        assert_eq!(mock.call_count().await, 1);
        assert_eq!(summary.root_count, 2);
        assert_eq!(summary.record_count, 4);

        let paths = ArtifactPaths::for_date(temp.path(), date());
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.raw).unwrap()).unwrap();
        assert_eq!(raw, listing());

        let csv = std::fs::read_to_string(&paths.flat).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id,nucCode,name,parentId,totalItems",
                "1,SACL,Adelaide City Libraries,,100",
                "2,,Adelaide City Libraries City Library,1,60",
                "3,,Adelaide City Libraries Archive,1,40",
                "4,,State Library,,7",
            ]
        );
    }

    #[tokio::test]
    async fn test_flatten_failure_leaves_no_flat_file() {
        let temp = tempdir().unwrap();
        let body = json!({
            "contributor": [
                { "id": "1", "name": "Root", "totalHoldings": "1",
                  "children": [ { "id": "2", "totalHoldings": "1" } ] }
            ]
        });
        let mock = MockContributorClient::new().with_body(body);

        let err = harvest(&mock, temp.path(), date()).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Flatten(FlattenError::MissingField { ref node_id, field: "name" }) if node_id == "2"
        ));
        let paths = ArtifactPaths::for_date(temp.path(), date());
        assert!(paths.raw.exists(), "raw snapshot is archived regardless");
        assert!(!paths.flat.exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let temp = tempdir().unwrap();
        let mock = MockContributorClient::new().with_error(FetchError::Forbidden);

        let err = harvest(&mock, temp.path(), date()).await.unwrap_err();

        assert!(matches!(err, Error::Fetch(FetchError::Forbidden)));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_listing_writes_header_only() {
        let temp = tempdir().unwrap();
        let mock = MockContributorClient::new().with_body(json!({ "contributor": [] }));

        let summary = harvest(&mock, temp.path(), date()).await.unwrap();

        assert_eq!(summary.record_count, 0);
        let csv = std::fs::read_to_string(&summary.flat_path).unwrap();
        assert_eq!(csv, "id,nucCode,name,parentId,totalItems\n");
    }
}
