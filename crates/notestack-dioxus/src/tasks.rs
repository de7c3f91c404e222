//! Runs the async work blocks hand back to the host.
//!
//! Everything here awaits on the UI executor; completions happen on the same
//! thread that owns the session, so block state never crosses threads.

use notestack_engine::Task;
use notestack_engine::blocks::LinkMetadata;
use notestack_engine::blocks::link_preview::{FetchError, parse_metadata_response};
use reqwest::Client;
use std::time::Duration;

/// Fetch metadata for a pasted URL from the preview endpoint
pub async fn fetch_preview(
    client: &Client,
    endpoint: reqwest::Url,
    timeout: Duration,
) -> Result<LinkMetadata, FetchError> {
    let response = client
        .get(endpoint)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;
    parse_metadata_response(&body)
}

/// Run one task to completion. Returns whether the owning block's data changed.
pub async fn run(task: Task, client: &Client, timeout: Duration) -> bool {
    if !task.is_live() {
        log::debug!("Skipping task for a block that is gone: {task:?}");
        return false;
    }

    match task {
        Task::FetchPreview(request) => {
            let outcome = match request.endpoint_url() {
                Ok(endpoint) => fetch_preview(client, endpoint, timeout).await,
                Err(e) => Err(FetchError::Request(e.to_string())),
            };
            request.complete(outcome)
        }
        Task::ReadFile(request) => {
            log::info!("Reading image file {}", request.path().display());
            let outcome = tokio::fs::read(request.path()).await;
            request.complete(outcome)
        }
    }
}
