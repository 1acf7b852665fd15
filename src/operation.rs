//! Operation handle
//!
//! Project creation is asynchronous server-side; the API answers with an
//! operation document whose `name` can be polled until `done`.

use crate::client::ClientContext;
use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Poll backoff ladder in seconds; the last entry repeats
const POLL_DELAYS: &[u64] = &[1, 2, 4, 8, 16, 30];

/// Polls before `wait` gives up
const MAX_POLLS: usize = 120;

/// Handle on a server-side long-running operation
pub struct Operation {
    ctx: Arc<ClientContext>,
    name: String,
    /// Raw operation document from the creating call or the last poll
    pub metadata: Option<Value>,
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl Operation {
    pub(crate) fn new(ctx: Arc<ClientContext>, name: String) -> Self {
        Self { ctx, name, metadata: None }
    }

    /// Full operation name, e.g. `operations/cp.1234567890`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch the current operation document, refreshing
    /// [`metadata`](Self::metadata)
    pub async fn get(&mut self) -> Result<Value> {
        let raw = self.ctx.get(&self.ctx.url(&self.name), &[]).await?;
        self.metadata = Some(raw.clone());
        Ok(raw)
    }

    /// Poll until the operation reports `done`, then return its
    /// `response` document
    ///
    /// A failed operation surfaces its embedded error envelope as
    /// [`Error::Api`]. Polling is strictly sequential with a capped
    /// backoff ladder.
    pub async fn wait(&mut self) -> Result<Value> {
        for (i, &delay) in POLL_DELAYS.iter().cycle().take(MAX_POLLS).enumerate() {
            let doc = self.get().await?;

            if doc["done"].as_bool().unwrap_or(false) {
                if let Some(err) = doc.get("error") {
                    return Err(Error::from_api_envelope(0, &json!({ "error": err })));
                }
                return Ok(doc["response"].clone());
            }

            let poll = i + 1;
            if poll % 10 == 0 {
                tracing::info!(poll, name = %self.name, "still waiting for operation");
            } else {
                tracing::debug!(poll, name = %self.name, delay, "operation pending, waiting");
            }
            tokio::time::sleep(Duration::from_secs(delay)).await;
        }

        Err(Error::OperationTimedOut {
            name: self.name.clone(),
            polls: MAX_POLLS,
        })
    }
}
