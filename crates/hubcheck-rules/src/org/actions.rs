use async_trait::async_trait;
use hubcheck_core::{OrgRule, Result, RuleResult};
use hubcheck_github::Organization;

use crate::{actions_result, links};

/// GitHub Actions must be disabled or limited to an allow-list.
#[derive(Debug, Default)]
pub struct ActionsPermissionsRule;

rule_info! {
    ActionsPermissionsRule,
    id: "github-actions-permissions",
    name: "Limit GitHub Actions",
    description: crate::ACTIONS_DESCRIPTION,
    doc_url: crate::ACTIONS_DOC_URL,
}

#[async_trait]
impl OrgRule for ActionsPermissionsRule {
    async fn run(&self, org: &Organization) -> Result<Vec<RuleResult>> {
        let permissions = org.actions_permissions().await?;
        Ok(vec![actions_result(
            &permissions,
            links::org_settings(org.login(), "actions"),
        )])
    }
}
