//! Project handle
//!
//! A [`Project`] is a locally constructed handle on one project resource.
//! It carries the project id, a clone of the shared request context, and
//! whatever metadata the last `get`/`create`/listing call populated.
//! Deleting the remote project leaves the handle valid but stale.

use crate::client::{self, ClientContext, CreatedProject};
use crate::error::{Error, Result};
use crate::types::{
    Ancestor, Constraint, GetIamPolicyOptions, ListConstraintsOptions, OrgPolicy, PageLimits,
    Policy,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// One page of available org policy constraints
#[derive(Debug)]
pub struct ConstraintsPage {
    pub constraints: Vec<Constraint>,
    /// Options for the next page; `None` signals end of pagination
    pub next: Option<ListConstraintsOptions>,
    /// The raw list response
    pub raw: Value,
}

/// Handle on a single project
pub struct Project {
    ctx: Arc<ClientContext>,
    id: String,
    /// Raw project document from the last `get`/`create`/listing call
    pub metadata: Option<Value>,
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.id)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl Project {
    pub(crate) fn new(ctx: Arc<ClientContext>, id: String) -> Self {
        Self { ctx, id, metadata: None }
    }

    pub(crate) fn with_metadata(ctx: Arc<ClientContext>, id: String, metadata: Value) -> Self {
        Self { ctx, id, metadata: Some(metadata) }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name from the last fetched metadata
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("name")?.as_str()
    }

    /// Numeric project number from the last fetched metadata
    pub fn project_number(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("projectNumber")?.as_str()
    }

    /// Lifecycle state (`ACTIVE`, `DELETE_REQUESTED`, ...) from the last
    /// fetched metadata
    pub fn lifecycle_state(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("lifecycleState")?.as_str()
    }

    fn resource_url(&self) -> String {
        self.ctx.url(&format!("projects/{}", self.id))
    }

    /// URL for a custom-verb RPC, e.g. `projects/{id}:getAncestry`
    fn action_url(&self, verb: &str) -> String {
        self.ctx.url(&format!("projects/{}:{}", self.id, verb))
    }

    // ── Generic CRUD ─────────────────────────────────────────────────────

    /// Create this project on the server
    ///
    /// `options` follows
    /// [`create_project`](crate::ResourceManager::create_project); the
    /// body's `projectId` is this handle's id.
    pub async fn create(&self, options: Option<Value>) -> Result<CreatedProject> {
        client::create_project(&self.ctx, &self.id, options).await
    }

    /// Request deletion of the project (30-day hold server-side; see
    /// [`restore`](Self::restore))
    pub async fn delete(&self) -> Result<()> {
        self.ctx.delete(&self.resource_url()).await?;
        Ok(())
    }

    /// Check whether the project exists and is visible to the caller
    ///
    /// Only NOT_FOUND maps to `Ok(false)`; permission errors and the like
    /// surface as errors.
    pub async fn exists(&self) -> Result<bool> {
        match self.ctx.get(&self.resource_url(), &[]).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Fetch the project document, refreshing [`metadata`](Self::metadata)
    pub async fn get(&mut self) -> Result<Value> {
        self.get_metadata().await
    }

    /// Fetch the project document, refreshing [`metadata`](Self::metadata)
    pub async fn get_metadata(&mut self) -> Result<Value> {
        let raw = self.ctx.get(&self.resource_url(), &[]).await?;
        self.metadata = Some(raw.clone());
        Ok(raw)
    }

    /// Replace the project document (PUT); the server's updated document
    /// becomes the new [`metadata`](Self::metadata)
    pub async fn set_metadata(&mut self, metadata: Value) -> Result<Value> {
        let raw = self.ctx.put(&self.resource_url(), &metadata).await?;
        self.metadata = Some(raw.clone());
        Ok(raw)
    }

    // ── Project-scoped RPCs ──────────────────────────────────────────────

    /// Get the project's IAM policy, verbatim from the server
    pub async fn get_iam_policy(&self, options: Option<GetIamPolicyOptions>) -> Result<Policy> {
        let body = json!({ "options": options.unwrap_or_default() });
        let raw = self
            .ctx
            .post(&self.action_url("getIamPolicy"), &[], Some(&body))
            .await?;
        serde_json::from_value(raw).map_err(Error::Decode)
    }

    /// Undelete a project that is still within its deletion hold
    pub async fn restore(&self) -> Result<Value> {
        self.ctx.post(&self.action_url("undelete"), &[], None).await
    }

    /// Get the ordered ancestor chain, from this project up through its
    /// folders to the organization
    pub async fn get_ancestry(&self) -> Result<Vec<Ancestor>> {
        let raw = self
            .ctx
            .post(&self.action_url("getAncestry"), &[], None)
            .await?;
        match raw.get("ancestor") {
            Some(chain) => serde_json::from_value(chain.clone()).map_err(Error::Decode),
            None => Ok(Vec::new()),
        }
    }

    /// Get the effective org policy for `constraint`, evaluated through
    /// the resource hierarchy
    pub async fn get_effective_org_policy(&self, constraint: &str) -> Result<OrgPolicy> {
        let body = json!({ "constraint": constraint });
        let raw = self
            .ctx
            .post(&self.action_url("getEffectiveOrgPolicy"), &[], Some(&body))
            .await?;
        serde_json::from_value(raw).map_err(Error::Decode)
    }

    /// Get the org policy configured directly on this project for
    /// `constraint`
    pub async fn get_org_policy(&self, constraint: &str) -> Result<OrgPolicy> {
        let body = json!({ "constraint": constraint });
        let raw = self
            .ctx
            .post(&self.action_url("getOrgPolicy"), &[], Some(&body))
            .await?;
        serde_json::from_value(raw).map_err(Error::Decode)
    }

    /// List one page of constraints that could carry an org policy on
    /// this project
    pub async fn list_available_org_policy_constraints(
        &self,
        options: &ListConstraintsOptions,
    ) -> Result<ConstraintsPage> {
        let raw = self
            .ctx
            .post(
                &self.action_url("listAvailableOrgPolicyConstraints"),
                &options.as_query(),
                None,
            )
            .await?;

        let constraints: Vec<Constraint> = match raw.get("constraints") {
            Some(records) => serde_json::from_value(records.clone()).map_err(Error::Decode)?,
            None => Vec::new(),
        };

        let next = raw["nextPageToken"]
            .as_str()
            .map(|token| options.with_page_token(token));

        Ok(ConstraintsPage { constraints, next, raw })
    }

    /// List available constraints across pages, sequentially, until
    /// exhausted or a cap in `limits` is reached
    pub async fn list_all_available_org_policy_constraints(
        &self,
        options: &ListConstraintsOptions,
        limits: PageLimits,
    ) -> Result<Vec<Constraint>> {
        let mut collected = Vec::new();
        let mut options = options.clone();
        let mut calls = 0usize;

        loop {
            let page = self.list_available_org_policy_constraints(&options).await?;
            calls += 1;
            collected.extend(page.constraints);

            if let Some(max) = limits.max_results {
                if collected.len() >= max {
                    collected.truncate(max);
                    break;
                }
            }
            if let Some(max) = limits.max_api_calls {
                if calls >= max {
                    break;
                }
            }
            match page.next {
                Some(next) => options = next,
                None => break,
            }
        }

        Ok(collected)
    }
}
