use async_trait::async_trait;
use hubcheck_core::{OrgRule, Result, RuleResult, Severity};
use hubcheck_github::Organization;

use crate::links;

/// Two-factor authentication must be required for all members.
#[derive(Debug, Default)]
pub struct TwoFactor;

rule_info! {
    TwoFactor,
    id: "two-factor",
    name: "Two-factor enforcement",
    description: "To ensure that authorized members of an organization are not easily compromised by a password theft you should enforce two-factor authentication in your organization.",
    doc_url: "https://docs.github.com/en/organizations/keeping-your-organization-secure/managing-two-factor-authentication-for-your-organization/requiring-two-factor-authentication-in-your-organization",
}

#[async_trait]
impl OrgRule for TwoFactor {
    async fn run(&self, org: &Organization) -> Result<Vec<RuleResult>> {
        let result = match org.data().two_factor_requirement_enabled {
            None => RuleResult::new(
                Severity::Warning,
                "Cannot check two-factor enforcement",
                "The two-factor requirement is only visible to organization owners. Are you an admin?",
            ),
            Some(true) => RuleResult::new(
                Severity::Notice,
                "Two-factor authentication enforcement is enabled",
                Self::DESCRIPTION,
            ),
            Some(false) => RuleResult::new(
                Severity::Error,
                "Two-factor authentication enforcement is not enabled",
                Self::DESCRIPTION,
            ),
        };
        Ok(vec![result
            .with_fix_url(links::org_settings(org.login(), "security"))
            .with_doc_url(Self::DOC_URL)])
    }
}
