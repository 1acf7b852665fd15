//! Client for the Google Cloud Resource Manager API
//!
//! This crate wraps the Resource Manager v1 REST surface: creating,
//! listing, deleting, and restoring projects, reading IAM policies,
//! project ancestry, and org policy constraints.
//!
//! # Module Structure
//!
//! - [`auth`] - Application Default Credentials and the token seam
//! - [`client`] - Root [`ResourceManager`] client
//! - [`config`] - Client configuration and default-project resolution
//! - [`project`] - Per-project handle and project-scoped RPCs
//! - [`operation`] - Long-running operation handle
//! - [`types`] - Wire types (policies, ancestry, constraints)
//!
//! # Example
//!
//! ```ignore
//! use gcrm::{ClientConfig, ResourceManager};
//!
//! async fn example() -> gcrm::Result<()> {
//!     let manager = ResourceManager::new(ClientConfig::default()).await?;
//!     let project = manager.project(Some("my-project"))?;
//!     let policy = project.get_iam_policy(None).await?;
//!     for binding in policy.bindings {
//!         println!("{}: {} members", binding.role, binding.members.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
mod http;
pub mod operation;
pub mod project;
pub mod types;

pub use auth::{AdcCredentials, StaticToken, TokenProvider};
pub use client::{CreatedProject, ProjectsPage, ResourceManager};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use operation::Operation;
pub use project::{ConstraintsPage, Project};
pub use types::{
    Ancestor, Binding, BooleanPolicy, Constraint, GetIamPolicyOptions, ListConstraintsOptions,
    ListProjectsOptions, OrgPolicy, PageLimits, Policy, ResourceId,
};
