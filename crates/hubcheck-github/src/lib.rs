//! # hubcheck GitHub access
//!
//! Typed access to the parts of the GitHub REST API that an organization
//! audit needs.
//!
//! ## Features
//!
//! - **Client**: authenticated [`GitHubClient`] with `Link`-header pagination
//!   and GitHub error documents decoded into [`GitHubError`]
//! - **Content cache**: the recursive file tree of each repository is walked
//!   at most once per client ([`ContentCache`])
//! - **Domain model**: [`Organization`] and [`Repository`] snapshots whose
//!   sub-resources are fetched lazily through a shared [`GitHubApi`] handle
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hubcheck_github::{GitHubApi, GitHubClient, Organization};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api: Arc<dyn GitHubApi> = Arc::new(GitHubClient::github("ghp_xxx")?);
//!     let org = Organization::fetch(api, "acme").await?;
//!
//!     for repo in org.list_repositories().await? {
//!         let tree = repo.list_contents().await?;
//!         println!("{}: {} entries", repo.name(), tree.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod client;
pub mod contents;
pub mod error;
pub mod model;
pub mod pagination;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod types;

pub use api::GitHubApi;
pub use cache::{ContentCache, ContentTree};
pub use client::{GitHubClient, DEFAULT_API_URL};
pub use contents::{ContentType, RepoDirEntry};
pub use error::{GitHubError, Result};
pub use model::{Organization, Repository};
pub use pagination::PaginationLinks;
pub use types::*;
