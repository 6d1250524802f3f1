//! Best-effort object storage cleanup.
//!
//! The only object this layer ever touches is the AI video artifact keyed by
//! `vehicles/{stock_number}/ai-video.mp4`. Deletion is decoupled from the
//! database mutation: a dangling orphaned object is recoverable, but a stuck
//! "has video" flag blocks regeneration, so the field update never waits on
//! storage. The three outcomes (deleted, skipped, failed) are reported
//! distinctly to the caller.

use std::time::Duration;
use tracing::{info, warn};
use url::Url;

const STORAGE_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and location of the object storage bucket.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base endpoint of the storage API, e.g. `https://host/storage/v1`.
    pub endpoint: Url,
    /// Bucket holding media artifacts.
    pub bucket: String,
    /// Bearer token for the storage API.
    pub token: String,
}

/// Outcome of a cleanup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The object was deleted.
    Deleted,
    /// Storage is not configured; no call was made.
    Skipped,
    /// The delete call failed; the message explains why.
    Failed(String),
}

/// Object storage client. Constructed once at startup; credentials are
/// optional and their absence degrades every cleanup to `Skipped`.
#[derive(Debug, Clone)]
pub struct ObjectStorage {
    client: reqwest::Client,
    config: Option<StorageConfig>,
}

impl ObjectStorage {
    pub fn new(config: Option<StorageConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// An unconfigured client that skips every cleanup.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Storage key of a vehicle's AI video artifact.
    pub fn ai_video_key(stock_number: &str) -> String {
        format!("vehicles/{}/ai-video.mp4", stock_number)
    }

    /// Attempt to delete the object at `key`. Never returns an error: the
    /// caller folds the outcome into its report and proceeds regardless.
    pub async fn delete_object(&self, key: &str) -> CleanupOutcome {
        let Some(config) = &self.config else {
            info!(key = %key, "Object storage not configured, skipping cleanup");
            return CleanupOutcome::Skipped;
        };

        let url = format!(
            "{}/object/{}/{}",
            config.endpoint.as_str().trim_end_matches('/'),
            config.bucket,
            key
        );

        let result = self
            .client
            .delete(&url)
            .bearer_auth(&config.token)
            .timeout(STORAGE_REQUEST_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                info!(key = %key, "Deleted storage object");
                CleanupOutcome::Deleted
            }
            Ok(resp) => {
                let message = format!("storage returned status {}", resp.status());
                warn!(key = %key, status = %resp.status(), "Storage delete failed");
                CleanupOutcome::Failed(message)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Storage delete failed");
                CleanupOutcome::Failed(e.to_string())
            }
        }
    }
}
