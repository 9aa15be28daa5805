//! The API surface the audit engine consumes.

use async_trait::async_trait;

use crate::cache::ContentTree;
use crate::error::Result;
use crate::types::{ActionsPermissions, OrgMember, OrganizationData, RepositoryData};

/// GitHub operations needed to audit an organization.
///
/// [`GitHubClient`](crate::GitHubClient) is the production implementation;
/// the domain model holds an `Arc<dyn GitHubApi>` so tests can substitute
/// their own.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Organizations visible to the credential.
    async fn list_organizations(&self) -> Result<Vec<OrganizationData>>;

    /// Settings of one organization.
    async fn get_organization(&self, login: &str) -> Result<OrganizationData>;

    /// Members of an organization holding the admin role.
    async fn list_org_admins(&self, login: &str) -> Result<Vec<OrgMember>>;

    /// All repositories of an organization, in listing order.
    async fn list_org_repositories(&self, login: &str) -> Result<Vec<RepositoryData>>;

    /// Organization-wide GitHub Actions permissions.
    async fn org_actions_permissions(&self, login: &str) -> Result<ActionsPermissions>;

    /// GitHub Actions permissions of one repository.
    async fn repo_actions_permissions(&self, owner: &str, repo: &str)
        -> Result<ActionsPermissions>;

    /// Whether Dependabot vulnerability alerts are enabled on a repository.
    async fn vulnerability_alerts_enabled(&self, owner: &str, repo: &str) -> Result<bool>;

    /// Full recursive file tree of a repository.
    async fn list_contents(&self, owner: &str, repo: &str) -> Result<ContentTree>;

    /// Raw bytes of one file.
    async fn file_contents(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<u8>>;
}
