use async_trait::async_trait;
use hubcheck_core::{RepoRule, Result, RuleResult};
use hubcheck_github::{Organization, Repository};

use crate::{actions_result, links};

/// Per-repository variant of the organization Actions check.
#[derive(Debug, Default)]
pub struct RepoActionsPermissions;

rule_info! {
    RepoActionsPermissions,
    id: "github-actions-repo-permissions",
    name: "Limit GitHub Actions on repositories",
    description: crate::ACTIONS_DESCRIPTION,
    doc_url: crate::ACTIONS_DOC_URL,
}

#[async_trait]
impl RepoRule for RepoActionsPermissions {
    async fn run(&self, org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>> {
        let permissions = repo.actions_permissions().await?;
        Ok(vec![actions_result(
            &permissions,
            links::repo_settings(org.login(), repo.name(), "actions"),
        )
        .with_repository(repo.name())])
    }
}
