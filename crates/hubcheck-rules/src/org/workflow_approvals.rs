use async_trait::async_trait;
use hubcheck_core::{OrgRule, Result, RuleResult, Severity};
use hubcheck_github::Organization;

use crate::links;

/// Reminder to require approval for workflow runs from forks.
///
/// The setting is not exposed by the REST API, so this always reports an
/// `info` result pointing at the settings page.
#[derive(Debug, Default)]
pub struct WorkflowApprovals;

rule_info! {
    WorkflowApprovals,
    id: "github-actions-workflow-approvals",
    name: "Require workflow approvals (manual)",
    description: "Workflow approvals cannot be checked automatically, please check them manually. When a pull request is submitted from a fork, GitHub actions should not be run automatically or you risk exposing sensitive credentials to untrusted code. You should change your settings to require approvals from a project maintainer in order to run workflows.",
    doc_url: "https://docs.github.com/en/actions/managing-workflow-runs/approving-workflow-runs-from-public-forks",
}

#[async_trait]
impl OrgRule for WorkflowApprovals {
    async fn run(&self, org: &Organization) -> Result<Vec<RuleResult>> {
        Ok(vec![RuleResult::new(
            Severity::Info,
            "Workflow approval requirements",
            Self::DESCRIPTION,
        )
        .with_fix_url(links::org_settings(org.login(), "actions"))
        .with_doc_url(Self::DOC_URL)])
    }
}
