//! GitHub REST client with pagination and a content tree cache.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, LINK};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::GitHubApi;
use crate::cache::{ContentCache, ContentTree};
use crate::contents::{FileContent, RepoDirEntry};
use crate::error::{GitHubError, Result};
use crate::pagination::{PaginationLinks, PER_PAGE};
use crate::types::{ActionsPermissions, OrgMember, OrganizationData, RepositoryData};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version sent with every request.
pub const API_VERSION: &str = "2022-11-28";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A response whose status has not been classified yet.
struct RawResponse {
    status: u16,
    link: Option<String>,
    body: String,
}

/// Authenticated client for the GitHub REST API.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: String,
    cache: ContentCache,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url.as_str())
            .field("cached_trees", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a new GitHub client against `base_url`.
    pub fn new(token: impl Into<String>, base_url: &str) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(GitHubError::InvalidConfig(
                "no access token provided".to_string(),
            ));
        }

        let base_url = Url::parse(base_url)
            .map_err(|e| GitHubError::InvalidConfig(format!("invalid API URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidConfig(format!(
                "invalid API URL {base_url}: not a base URL"
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("hubcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GitHubError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token,
            cache: ContentCache::new(),
        })
    }

    /// Create a client for the public GitHub API.
    pub fn github(token: impl Into<String>) -> Result<Self> {
        Self::new(token, DEFAULT_API_URL)
    }

    /// Replace the content cache, e.g. with a pre-seeded one.
    pub fn with_cache(mut self, cache: ContentCache) -> Self {
        self.cache = cache;
        self
    }

    /// The content tree cache owned by this client.
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Build an endpoint URL from unescaped path segments.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidConfig(format!("invalid API URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<Url> {
        let segments = ["repos", owner, repo, "contents"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        self.endpoint(segments)
    }

    /// Send a GET request without interpreting the status code.
    async fn request(&self, url: Url) -> Result<RawResponse> {
        debug!(method = "GET", url = %url, "HTTP -->");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        let status = response.status().as_u16();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| GitHubError::Network(format!("failed to read response body: {e}")))?;

        debug!(status, url = %url, "HTTP <--");

        Ok(RawResponse { status, link, body })
    }

    fn decode<T: DeserializeOwned>(body: String) -> Result<T> {
        serde_json::from_str(&body).map_err(|e| GitHubError::Decode {
            reason: e.to_string(),
            body,
        })
    }

    /// Make a GET request and decode a 200 response.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.request(url).await?;
        if response.status != 200 {
            return Err(GitHubError::api(response.status, response.body));
        }
        Self::decode(response.body)
    }

    /// Fetch every page of a listing by following `rel="next"` links.
    ///
    /// Stops on an empty page or when no further link is returned.
    async fn get_paginated<T: DeserializeOwned>(&self, mut url: Url) -> Result<Vec<T>> {
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string());

        let mut all_items = Vec::new();
        let mut pages = 0usize;

        loop {
            let response = self.request(url).await?;
            if response.status != 200 {
                return Err(GitHubError::api(response.status, response.body));
            }
            pages += 1;

            let next = response
                .link
                .as_deref()
                .map(PaginationLinks::parse)
                .and_then(|links| links.next);

            let items: Vec<T> = Self::decode(response.body)?;
            if items.is_empty() {
                break;
            }
            all_items.extend(items);

            match next {
                Some(next) => {
                    url = self.base_url.join(&next).map_err(|e| GitHubError::Decode {
                        reason: format!("invalid pagination link: {e}"),
                        body: next.clone(),
                    })?;
                }
                None => break,
            }
        }

        debug!(pages, items = all_items.len(), "Fetched paginated listing");
        Ok(all_items)
    }

    /// Walk the contents API breadth-first, listing every directory once.
    ///
    /// Entries come back in breadth-first order: the whole root listing, then
    /// each subdirectory in the order it was discovered.
    async fn walk_contents(&self, owner: &str, repo: &str) -> Result<Vec<RepoDirEntry>> {
        let mut entries = Vec::new();
        let mut pending = VecDeque::from([String::new()]);
        let mut visited = HashSet::new();

        while let Some(dir) = pending.pop_front() {
            if !visited.insert(dir.clone()) {
                continue;
            }
            let listing: Vec<RepoDirEntry> = self.get(self.contents_url(owner, repo, &dir)?).await?;
            pending.extend(
                listing
                    .iter()
                    .filter(|entry| entry.is_dir())
                    .map(|entry| entry.path.clone()),
            );
            entries.extend(listing);
        }

        debug!(
            owner,
            repo,
            directories = visited.len(),
            entries = entries.len(),
            "Listed repository contents"
        );
        Ok(entries)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_organizations(&self) -> Result<Vec<OrganizationData>> {
        self.get_paginated(self.endpoint(["user", "orgs"])?)
            .await
            .map_err(|e| e.context("Failed to list organizations"))
    }

    async fn get_organization(&self, login: &str) -> Result<OrganizationData> {
        self.get(self.endpoint(["orgs", login])?)
            .await
            .map_err(|e| e.context(format!("Failed to fetch organization {login}")))
    }

    async fn list_org_admins(&self, login: &str) -> Result<Vec<OrgMember>> {
        let mut url = self.endpoint(["orgs", login, "members"])?;
        url.query_pairs_mut().append_pair("role", "admin");
        self.get_paginated(url)
            .await
            .map_err(|e| e.context(format!("Failed to list organization {login} admins")))
    }

    async fn list_org_repositories(&self, login: &str) -> Result<Vec<RepositoryData>> {
        self.get_paginated(self.endpoint(["orgs", login, "repos"])?)
            .await
            .map_err(|e| e.context(format!("Failed to list organization {login} repositories")))
    }

    async fn org_actions_permissions(&self, login: &str) -> Result<ActionsPermissions> {
        self.get(self.endpoint(["orgs", login, "actions", "permissions"])?)
            .await
            .map_err(|e| {
                e.context(format!(
                    "Failed to fetch GitHub Actions permissions for organization {login}"
                ))
            })
    }

    async fn repo_actions_permissions(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<ActionsPermissions> {
        self.get(self.endpoint(["repos", owner, repo, "actions", "permissions"])?)
            .await
            .map_err(|e| {
                e.context(format!(
                    "Failed to fetch GitHub Actions permissions for repository {owner}/{repo}"
                ))
            })
    }

    async fn vulnerability_alerts_enabled(&self, owner: &str, repo: &str) -> Result<bool> {
        let url = self.endpoint(["repos", owner, repo, "vulnerability-alerts"])?;
        let response = self.request(url).await.map_err(|e| {
            e.context(format!(
                "Failed to query repository {repo} vulnerability alert settings"
            ))
        })?;

        match response.status {
            204 => Ok(true),
            404 => Ok(false),
            403 => Err(GitHubError::api(403, response.body).context(format!(
                "you do not have permissions to query vulnerability alerts for repository {repo}"
            ))),
            status => Err(GitHubError::api(status, response.body).context(format!(
                "Unexpected response for repository {repo} vulnerability alerts"
            ))),
        }
    }

    async fn list_contents(&self, owner: &str, repo: &str) -> Result<ContentTree> {
        self.cache
            .get_or_fetch(owner, repo, || self.walk_contents(owner, repo))
            .await
            .map_err(|e| e.context(format!("Failed to list contents of {owner}/{repo}")))
    }

    async fn file_contents(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<u8>> {
        let content: FileContent = self
            .get(self.contents_url(owner, repo, path)?)
            .await
            .map_err(|e| e.context(format!("Failed to fetch {path} from {owner}/{repo}")))?;
        content.decode(path)
    }
}
