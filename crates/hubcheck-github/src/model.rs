//! Organization and repository snapshots with lazy accessors.

use std::fmt;
use std::sync::Arc;

use crate::api::GitHubApi;
use crate::cache::ContentTree;
use crate::error::Result;
use crate::types::{ActionsPermissions, OrgMember, OrganizationData, RepositoryData};

/// Point-in-time snapshot of an organization.
///
/// Sub-resources are fetched on demand through the API handle given at
/// construction; nothing is stored back into the snapshot.
#[derive(Clone)]
pub struct Organization {
    api: Arc<dyn GitHubApi>,
    data: OrganizationData,
}

impl Organization {
    /// Wrap fetched organization settings.
    pub fn new(api: Arc<dyn GitHubApi>, data: OrganizationData) -> Self {
        Self { api, data }
    }

    /// Fetch an organization by login.
    pub async fn fetch(api: Arc<dyn GitHubApi>, login: &str) -> Result<Self> {
        let data = api.get_organization(login).await?;
        Ok(Self::new(api, data))
    }

    /// All organizations visible to the credential.
    pub async fn list_visible(api: Arc<dyn GitHubApi>) -> Result<Vec<Self>> {
        let orgs = api.list_organizations().await?;
        Ok(orgs
            .into_iter()
            .map(|data| Self::new(Arc::clone(&api), data))
            .collect())
    }

    /// Organization login.
    pub fn login(&self) -> &str {
        &self.data.login
    }

    /// The settings snapshot.
    pub fn data(&self) -> &OrganizationData {
        &self.data
    }

    /// Members holding the admin role.
    pub async fn list_admins(&self) -> Result<Vec<OrgMember>> {
        self.api.list_org_admins(self.login()).await
    }

    /// Organization-wide GitHub Actions permissions.
    pub async fn actions_permissions(&self) -> Result<ActionsPermissions> {
        self.api.org_actions_permissions(self.login()).await
    }

    /// All repositories of the organization, in listing order.
    pub async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let repos = self.api.list_org_repositories(self.login()).await?;
        Ok(repos
            .into_iter()
            .map(|data| Repository::new(Arc::clone(&self.api), self.login(), data))
            .collect())
    }
}

impl fmt::Debug for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Organization")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// Point-in-time snapshot of a repository.
#[derive(Clone)]
pub struct Repository {
    api: Arc<dyn GitHubApi>,
    org_login: String,
    data: RepositoryData,
}

impl Repository {
    /// Wrap fetched repository metadata belonging to `org_login`.
    pub fn new(api: Arc<dyn GitHubApi>, org_login: impl Into<String>, data: RepositoryData) -> Self {
        Self {
            api,
            org_login: org_login.into(),
            data,
        }
    }

    /// Repository name (without owner).
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Login of the owning organization.
    pub fn org_login(&self) -> &str {
        &self.org_login
    }

    /// The metadata snapshot.
    pub fn data(&self) -> &RepositoryData {
        &self.data
    }

    /// GitHub Actions permissions of this repository.
    pub async fn actions_permissions(&self) -> Result<ActionsPermissions> {
        self.api
            .repo_actions_permissions(&self.org_login, self.name())
            .await
    }

    /// Whether vulnerability alerts are enabled.
    pub async fn vulnerability_alerts_enabled(&self) -> Result<bool> {
        self.api
            .vulnerability_alerts_enabled(&self.org_login, self.name())
            .await
    }

    /// Full recursive file tree (cached by the client).
    pub async fn list_contents(&self) -> Result<ContentTree> {
        self.api.list_contents(&self.org_login, self.name()).await
    }

    /// Raw contents of one file.
    pub async fn file_contents(&self, path: &str) -> Result<Vec<u8>> {
        self.api
            .file_contents(&self.org_login, self.name(), path)
            .await
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("org_login", &self.org_login)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
