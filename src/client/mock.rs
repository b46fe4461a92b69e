//! Mock contributor client for testing
//!
//! Provides a mock implementation of [`ContributorApi`] for unit testing
//! the harvest pipeline without making real API calls.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{ContributorApi, ContributorHarvest};
use crate::error::{FetchError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockContributorClient::new().with_body(json!({ "contributor": [] }));
/// let harvest = mock.fetch_contributors().await?;
/// assert!(harvest.roots.is_empty());
/// ```
#[derive(Default)]
pub struct MockContributorClient {
    /// Body returned from fetch_contributors
    body: Arc<Mutex<Option<Value>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<FetchError>>>,
    /// Number of fetch calls made
    calls: Arc<Mutex<usize>>,
}

impl MockContributorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with this body
    pub fn with_body(self, body: Value) -> Self {
        *self.body.try_lock().expect("mock not shared yet") = Some(body);
        self
    }

    /// Fail the next call with this error
    pub fn with_error(self, error: FetchError) -> Self {
        *self.error.try_lock().expect("mock not shared yet") = Some(error);
        self
    }

    pub async fn call_count(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl ContributorApi for MockContributorClient {
    async fn fetch_contributors(&self) -> Result<ContributorHarvest> {
        *self.calls.lock().await += 1;

        if let Some(error) = self.error.lock().await.take() {
            return Err(error.into());
        }

        let body = self
            .body
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        ContributorHarvest::from_raw(body)
    }
}
