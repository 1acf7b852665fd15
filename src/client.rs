//! Resource Manager client
//!
//! [`ResourceManager`] is the root handle: it owns configuration, builds
//! the shared request context, and hands out [`Project`] and [`Operation`]
//! handles. Constructing a handle never touches the network.

use crate::auth::{AdcCredentials, TokenProvider};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::operation::Operation;
use crate::project::Project;
use crate::types::{ListProjectsOptions, PageLimits};
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;

/// Shared request context behind every handle
///
/// Project and Operation handles hold an `Arc` clone of this instead of a
/// back-reference to the client that created them; the context strictly
/// outlives the handles in practice and requests route through it.
pub(crate) struct ClientContext {
    http: HttpClient,
    token: Arc<dyn TokenProvider>,
    endpoint: String,
    pub(crate) config: ClientConfig,
}

impl ClientContext {
    /// Build a `/v1` API URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.endpoint, path)
    }

    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let token = self.token.token().await?;
        self.http.get(url, &token, query).await
    }

    pub async fn post(
        &self,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let token = self.token.token().await?;
        self.http.post(url, &token, query, body).await
    }

    pub async fn put(&self, url: &str, body: &Value) -> Result<Value> {
        let token = self.token.token().await?;
        self.http.put(url, &token, body).await
    }

    pub async fn delete(&self, url: &str) -> Result<Value> {
        let token = self.token.token().await?;
        self.http.delete(url, &token).await
    }
}

/// Result of a project creation call: the local handle, the server-side
/// operation tracking the creation, and the raw API response
#[derive(Debug)]
pub struct CreatedProject {
    pub project: Project,
    pub operation: Operation,
    pub raw: Value,
}

/// One page of a project listing
#[derive(Debug)]
pub struct ProjectsPage {
    /// Projects with metadata pre-populated from the listing records
    pub projects: Vec<Project>,
    /// Options for the next page; `None` signals end of pagination
    pub next: Option<ListProjectsOptions>,
    /// The raw list response
    pub raw: Value,
}

/// Root client for the Resource Manager API
#[derive(Clone)]
pub struct ResourceManager {
    ctx: Arc<ClientContext>,
}

impl ResourceManager {
    /// Create a client using Application Default Credentials
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let credentials = AdcCredentials::new(&config.scopes).await?;
        Self::with_token_provider(config, Arc::new(credentials))
    }

    /// Create a client with an explicit token source
    ///
    /// This is the injection seam for tests: pair it with
    /// [`StaticToken`](crate::auth::StaticToken) and an `endpoint`
    /// pointing at a mock server.
    pub fn with_token_provider(
        config: ClientConfig,
        provider: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        Url::parse(&endpoint)
            .map_err(|e| Error::InvalidArgument(format!("invalid endpoint '{}': {e}", endpoint)))?;

        let http = HttpClient::new(&config.user_agent)?;

        Ok(Self {
            ctx: Arc::new(ClientContext {
                http,
                token: provider,
                endpoint,
                config,
            }),
        })
    }

    /// Get a handle on a project
    ///
    /// With `None`, falls back to the configured default project id (or
    /// the environment/gcloud default). No network call is made; the
    /// project is not checked for existence.
    pub fn project(&self, id: Option<&str>) -> Result<Project> {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            Some(_) | None => self.ctx.config.effective_project().ok_or_else(|| {
                Error::InvalidArgument(
                    "a project id is required; pass one or configure a default project".into(),
                )
            })?,
        };
        Ok(Project::new(self.ctx.clone(), id))
    }

    /// Get a handle on a server-side operation by its full name, e.g.
    /// `operations/cp.1234567890`
    pub fn operation(&self, name: &str) -> Result<Operation> {
        if name.is_empty() {
            return Err(Error::InvalidArgument("an operation name is required".into()));
        }
        Ok(Operation::new(self.ctx.clone(), name.to_string()))
    }

    /// Create a project
    ///
    /// `options` is merged into the request body with `projectId` forced
    /// to `id` (e.g. `{"name": ..., "parent": ..., "labels": ...}`).
    pub async fn create_project(&self, id: &str, options: Option<Value>) -> Result<CreatedProject> {
        create_project(&self.ctx, id, options).await
    }

    /// List one page of projects visible to the caller
    pub async fn list_projects(&self, options: &ListProjectsOptions) -> Result<ProjectsPage> {
        let raw = self
            .ctx
            .get(&self.ctx.url("projects"), &options.as_query())
            .await?;

        let projects = raw["projects"]
            .as_array()
            .map(|records| {
                records
                    .iter()
                    .map(|record| {
                        let id = record["projectId"].as_str().unwrap_or("").to_string();
                        Project::with_metadata(self.ctx.clone(), id, record.clone())
                    })
                    .collect()
            })
            .unwrap_or_default();

        let next = raw["nextPageToken"]
            .as_str()
            .map(|token| options.with_page_token(token));

        Ok(ProjectsPage { projects, next, raw })
    }

    /// List projects across pages, sequentially, until exhausted or a cap
    /// in `limits` is reached
    pub async fn list_all_projects(
        &self,
        options: &ListProjectsOptions,
        limits: PageLimits,
    ) -> Result<Vec<Project>> {
        let mut collected = Vec::new();
        let mut options = options.clone();
        let mut calls = 0usize;

        loop {
            let page = self.list_projects(&options).await?;
            calls += 1;
            collected.extend(page.projects);

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

/// Shared creation path: `POST /v1/projects`, then handles built from the
/// response. `Project::create` routes here as well.
pub(crate) async fn create_project(
    ctx: &Arc<ClientContext>,
    id: &str,
    options: Option<Value>,
) -> Result<CreatedProject> {
    if id.is_empty() {
        return Err(Error::InvalidArgument("a project id is required".into()));
    }

    let mut body = options.unwrap_or_else(|| json!({}));
    let Some(fields) = body.as_object_mut() else {
        return Err(Error::InvalidArgument(
            "project creation options must be a JSON object".into(),
        ));
    };
    fields.insert("projectId".into(), json!(id));

    let raw = ctx.post(&ctx.url("projects"), &[], Some(&body)).await?;

    let project_id = raw["projectId"].as_str().unwrap_or(id).to_string();
    let project = Project::with_metadata(ctx.clone(), project_id, raw.clone());

    let operation_name = raw["name"].as_str().unwrap_or_default().to_string();
    let mut operation = Operation::new(ctx.clone(), operation_name);
    operation.metadata = Some(raw.clone());

    Ok(CreatedProject { project, operation, raw })
}
