use async_trait::async_trait;
use hubcheck_core::{OrgRule, Result, RuleResult, Severity};
use hubcheck_github::Organization;

use crate::links;

/// Members must not get admin access to every repository by default.
#[derive(Debug, Default)]
pub struct DefaultRepositoryPermission;

rule_info! {
    DefaultRepositoryPermission,
    id: "default-repository-permission",
    name: "Default repository permissions",
    description: "To ensure that organization members cannot carry out destructive actions, such as force-pushing and thereby deleting history, the default repository permissions should not be set to admin.",
    doc_url: "https://docs.github.com/en/organizations/managing-access-to-your-organizations-repositories/setting-base-permissions-for-an-organization",
}

#[async_trait]
impl OrgRule for DefaultRepositoryPermission {
    async fn run(&self, org: &Organization) -> Result<Vec<RuleResult>> {
        let result = match org.data().default_repository_permission.as_deref() {
            None | Some("") => RuleResult::new(
                Severity::Warning,
                "Cannot check default repository permissions",
                "The default repository permission is only visible to organization owners. Are you an admin?",
            ),
            Some(permission) => {
                let severity = if permission == "admin" {
                    Severity::Error
                } else {
                    Severity::Notice
                };
                RuleResult::new(
                    severity,
                    format!("Default repository permissions are {permission}"),
                    Self::DESCRIPTION,
                )
            }
        };
        Ok(vec![result
            .with_fix_url(links::org_settings(org.login(), "member_privileges"))
            .with_doc_url(Self::DOC_URL)])
    }
}
