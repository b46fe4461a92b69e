//! Trove API client

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::flatten::OrgNode;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod retry;
pub mod trove;

#[cfg(test)]
pub use mock::MockContributorClient;
pub use retry::RetryPolicy;
pub use trove::TroveClient;

/// Source of the contributor hierarchy
#[async_trait]
pub trait ContributorApi: Send + Sync {
    /// Fetch the complete contributor tree
    async fn fetch_contributors(&self) -> Result<ContributorHarvest>;
}

/// A fetched contributor listing
#[derive(Debug, Clone)]
pub struct ContributorHarvest {
    /// Response body exactly as received, kept for archival
    pub raw: Value,

    /// Root contributors parsed from `raw`
    pub roots: Vec<OrgNode>,
}

impl ContributorHarvest {
    /// Parse a raw response body into a harvest
    pub fn from_raw(raw: Value) -> Result<Self> {
        let roots = models::parse_contributors(&raw)?;
        Ok(Self { raw, roots })
    }
}
