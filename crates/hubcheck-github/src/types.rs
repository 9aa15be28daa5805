//! GitHub API response types.
//!
//! Only the fields the audit rules read are declared; everything else in the
//! payload is ignored. Settings that GitHub discloses to organization owners
//! only are optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settings snapshot of a GitHub organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationData {
    pub login: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub public_repos: Option<u64>,
    #[serde(default)]
    pub total_private_repos: Option<u64>,
    #[serde(default)]
    pub owned_private_repos: Option<u64>,
    #[serde(default)]
    pub collaborators: Option<u64>,
    #[serde(default)]
    pub plan: Option<OrganizationPlan>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Base permission of members on all repositories (`read`, `write`, `admin`, `none`).
    #[serde(default)]
    pub default_repository_permission: Option<String>,
    #[serde(default)]
    pub two_factor_requirement_enabled: Option<bool>,
    #[serde(default)]
    pub members_can_create_repositories: Option<bool>,
    #[serde(default)]
    pub members_can_create_public_repositories: Option<bool>,
    #[serde(default)]
    pub members_can_create_private_repositories: Option<bool>,
    #[serde(default)]
    pub members_can_fork_private_repositories: Option<bool>,
}

/// Billing plan of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationPlan {
    pub name: String,
    #[serde(default)]
    pub seats: Option<u64>,
    #[serde(default)]
    pub filled_seats: Option<u64>,
    #[serde(default)]
    pub private_repos: Option<u64>,
}

/// Metadata snapshot of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryData {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    /// `public`, `private` or `internal`.
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub license: Option<RepoLicense>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_branch() -> String {
    "main".to_string()
}

impl RepositoryData {
    /// Whether the repository is visible to everyone.
    pub fn is_public(&self) -> bool {
        match self.visibility.as_deref() {
            Some(visibility) => visibility == "public",
            None => !self.private,
        }
    }
}

/// License detected on a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLicense {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub spdx_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// GitHub Actions permissions, for either an organization or a repository.
///
/// The organization endpoint reports `enabled_repositories`, the repository
/// endpoint reports `enabled`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsPermissions {
    #[serde(default)]
    pub enabled_repositories: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub allowed_actions: Option<String>,
}

impl ActionsPermissions {
    /// Whether Actions are turned off entirely.
    pub fn is_disabled(&self) -> bool {
        self.enabled == Some(false) || self.enabled_repositories.as_deref() == Some("none")
    }

    /// Whether Actions are either off or limited to an allow-list.
    pub fn is_restricted(&self) -> bool {
        self.is_disabled()
            || matches!(
                self.allowed_actions.as_deref(),
                Some("selected") | Some("local_only")
            )
    }
}

/// A member of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMember {
    pub login: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub site_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_without_owner_fields() {
        let json = r#"{"login":"acme","id":42,"public_repos":3,"created_at":"2020-01-01T00:00:00Z"}"#;
        let org: OrganizationData = serde_json::from_str(json).unwrap();
        assert_eq!(org.login, "acme");
        assert_eq!(org.id, 42);
        assert!(org.two_factor_requirement_enabled.is_none());
        assert!(org.default_repository_permission.is_none());
        assert!(org.created_at.is_some());
    }

    #[test]
    fn test_organization_with_owner_fields() {
        let json = r#"{
            "login": "acme",
            "id": 1,
            "default_repository_permission": "admin",
            "two_factor_requirement_enabled": true,
            "plan": {"name": "team", "seats": 10, "filled_seats": 4}
        }"#;
        let org: OrganizationData = serde_json::from_str(json).unwrap();
        assert_eq!(org.default_repository_permission.as_deref(), Some("admin"));
        assert_eq!(org.two_factor_requirement_enabled, Some(true));
        assert_eq!(org.plan.unwrap().filled_seats, Some(4));
    }

    #[test]
    fn test_repository_visibility() {
        let json = r#"{"name":"example","visibility":"public","license":null,"default_branch":"trunk"}"#;
        let repo: RepositoryData = serde_json::from_str(json).unwrap();
        assert!(repo.is_public());
        assert!(repo.license.is_none());
        assert_eq!(repo.default_branch, "trunk");

        let repo: RepositoryData =
            serde_json::from_str(r#"{"name":"secret","private":true}"#).unwrap();
        assert!(!repo.is_public());
        assert_eq!(repo.default_branch, "main");
    }

    #[test]
    fn test_actions_permissions_restriction() {
        let all = ActionsPermissions {
            enabled_repositories: Some("all".into()),
            allowed_actions: Some("all".into()),
            ..Default::default()
        };
        assert!(!all.is_restricted());

        let selected = ActionsPermissions {
            allowed_actions: Some("selected".into()),
            ..Default::default()
        };
        assert!(selected.is_restricted());

        let local = ActionsPermissions {
            enabled: Some(true),
            allowed_actions: Some("local_only".into()),
            ..Default::default()
        };
        assert!(local.is_restricted());

        let none = ActionsPermissions {
            enabled_repositories: Some("none".into()),
            ..Default::default()
        };
        assert!(none.is_disabled());
        assert!(none.is_restricted());

        let repo_off = ActionsPermissions {
            enabled: Some(false),
            ..Default::default()
        };
        assert!(repo_off.is_restricted());
    }
}
