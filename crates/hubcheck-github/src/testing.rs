//! In-memory [`GitHubApi`] for tests.
//!
//! Enabled with the `test-util` feature.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::GitHubApi;
use crate::cache::ContentTree;
use crate::contents::RepoDirEntry;
use crate::error::{GitHubError, Result};
use crate::types::{ActionsPermissions, OrgMember, OrganizationData, RepositoryData};

/// Minimal organization settings with the given login.
pub fn org_data(login: &str) -> OrganizationData {
    OrganizationData {
        login: login.to_string(),
        ..Default::default()
    }
}

/// Minimal public repository metadata with the given name.
pub fn repo_data(name: &str) -> RepositoryData {
    RepositoryData {
        name: name.to_string(),
        visibility: Some("public".to_string()),
        default_branch: "main".to_string(),
        ..Default::default()
    }
}

fn not_found(what: &str) -> GitHubError {
    GitHubError::api(404, format!(r#"{{"message":"Not Found: {what}"}}"#))
}

/// Canned GitHub data keyed by organization / repository.
///
/// Every call is recorded as `"<method> <key>"` so tests can assert which
/// requests were (not) made. Unknown keys answer with a 404 `Api` error.
#[derive(Debug, Default)]
pub struct StaticApi {
    orgs: Vec<OrganizationData>,
    admins: HashMap<String, Vec<OrgMember>>,
    repos: HashMap<String, Vec<RepositoryData>>,
    org_actions: HashMap<String, ActionsPermissions>,
    repo_actions: HashMap<String, ActionsPermissions>,
    vulnerability_alerts: HashMap<String, bool>,
    contents: HashMap<String, Vec<RepoDirEntry>>,
    files: HashMap<String, Vec<u8>>,
    failures: HashMap<String, GitHubError>,
    calls: Mutex<Vec<String>>,
}

impl StaticApi {
    /// Create an API with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an organization visible to the credential.
    pub fn with_organization(mut self, data: OrganizationData) -> Self {
        self.orgs.push(data);
        self
    }

    /// Set the admins of an organization.
    pub fn with_admins(mut self, org: &str, logins: &[&str]) -> Self {
        let members = logins
            .iter()
            .map(|login| OrgMember {
                login: (*login).to_string(),
                id: 0,
                site_admin: false,
            })
            .collect();
        self.admins.insert(org.to_string(), members);
        self
    }

    /// Append a repository to an organization's listing.
    pub fn with_repository(mut self, org: &str, data: RepositoryData) -> Self {
        self.repos.entry(org.to_string()).or_default().push(data);
        self
    }

    /// Set organization-wide Actions permissions.
    pub fn with_org_actions(mut self, org: &str, permissions: ActionsPermissions) -> Self {
        self.org_actions.insert(org.to_string(), permissions);
        self
    }

    /// Set a repository's Actions permissions.
    pub fn with_repo_actions(mut self, owner: &str, repo: &str, permissions: ActionsPermissions) -> Self {
        self.repo_actions.insert(format!("{owner}/{repo}"), permissions);
        self
    }

    /// Set a repository's vulnerability alert status.
    pub fn with_vulnerability_alerts(mut self, owner: &str, repo: &str, enabled: bool) -> Self {
        self.vulnerability_alerts
            .insert(format!("{owner}/{repo}"), enabled);
        self
    }

    /// Set a repository's full content tree.
    pub fn with_contents(mut self, owner: &str, repo: &str, entries: Vec<RepoDirEntry>) -> Self {
        self.contents.insert(format!("{owner}/{repo}"), entries);
        self
    }

    /// Set the bytes of one file.
    pub fn with_file(mut self, owner: &str, repo: &str, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.files
            .insert(format!("{owner}/{repo}/{path}"), bytes.into());
        self
    }

    /// Make `method` fail with `error` for `key` (an org login, `owner/repo`
    /// or `owner/repo/path`; empty for `list_organizations`).
    pub fn failing(mut self, method: &str, key: &str, error: GitHubError) -> Self {
        self.failures.insert(format!("{method} {key}"), error);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of calls made to `method`.
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.split(' ').next() == Some(method))
            .count()
    }

    fn record(&self, method: &str, key: &str) -> Result<()> {
        let call = format!("{method} {key}");
        self.calls.lock().push(call.clone());
        match self.failures.get(&call) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GitHubApi for StaticApi {
    async fn list_organizations(&self) -> Result<Vec<OrganizationData>> {
        self.record("list_organizations", "")?;
        Ok(self.orgs.clone())
    }

    async fn get_organization(&self, login: &str) -> Result<OrganizationData> {
        self.record("get_organization", login)?;
        self.orgs
            .iter()
            .find(|org| org.login == login)
            .cloned()
            .ok_or_else(|| not_found(login))
    }

    async fn list_org_admins(&self, login: &str) -> Result<Vec<OrgMember>> {
        self.record("list_org_admins", login)?;
        Ok(self.admins.get(login).cloned().unwrap_or_default())
    }

    async fn list_org_repositories(&self, login: &str) -> Result<Vec<RepositoryData>> {
        self.record("list_org_repositories", login)?;
        Ok(self.repos.get(login).cloned().unwrap_or_default())
    }

    async fn org_actions_permissions(&self, login: &str) -> Result<ActionsPermissions> {
        self.record("org_actions_permissions", login)?;
        self.org_actions
            .get(login)
            .cloned()
            .ok_or_else(|| not_found(login))
    }

    async fn repo_actions_permissions(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<ActionsPermissions> {
        let key = format!("{owner}/{repo}");
        self.record("repo_actions_permissions", &key)?;
        self.repo_actions
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found(&key))
    }

    async fn vulnerability_alerts_enabled(&self, owner: &str, repo: &str) -> Result<bool> {
        let key = format!("{owner}/{repo}");
        self.record("vulnerability_alerts_enabled", &key)?;
        self.vulnerability_alerts
            .get(&key)
            .copied()
            .ok_or_else(|| not_found(&key))
    }

    async fn list_contents(&self, owner: &str, repo: &str) -> Result<ContentTree> {
        let key = format!("{owner}/{repo}");
        self.record("list_contents", &key)?;
        Ok(self
            .contents
            .get(&key)
            .cloned()
            .unwrap_or_default()
            .into())
    }

    async fn file_contents(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<u8>> {
        let key = format!("{owner}/{repo}/{path}");
        self.record("file_contents", &key)?;
        self.files.get(&key).cloned().ok_or_else(|| not_found(&key))
    }
}
