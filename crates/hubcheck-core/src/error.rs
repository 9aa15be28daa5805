//! Error types for the audit engine.

use hubcheck_github::GitHubError;
use thiserror::Error;

use crate::result::AuditResults;

/// Fatal audit errors.
#[derive(Debug, Error)]
pub enum AuditError {
    /// No API token was configured.
    #[error("no GitHub token configured (set GITHUB_TOKEN or pass --token)")]
    MissingToken,

    /// The credential sees no organization and none was selected.
    #[error("no organization is visible to the token; pass --org")]
    NoOrganization,

    /// The credential sees several organizations and none was selected.
    #[error("token has access to multiple organizations ({}); pass --org", .0.join(", "))]
    AmbiguousOrganization(Vec<String>),

    /// GitHub API failure.
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

/// A run that stopped after the organization rules.
///
/// Carries the results gathered before the failure so they can still be
/// reported.
#[derive(Debug, Error)]
#[error("audit aborted: {source}")]
pub struct AuditAborted {
    /// Results recorded before the abort.
    pub partial: AuditResults,
    /// Cause of the abort.
    #[source]
    pub source: AuditError,
}
