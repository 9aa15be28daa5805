use async_trait::async_trait;
use hubcheck_core::{OrgRule, Result, RuleResult, Severity};
use hubcheck_github::Organization;

use crate::links;

const MAX_ADMINS: usize = 5;

/// An organization should have between two and five admins.
#[derive(Debug, Default)]
pub struct OrganizationAdmins;

rule_info! {
    OrganizationAdmins,
    id: "organization-admins",
    name: "Organizations should have between 2 and 5 administrators",
    description: "If an organization has only one administrator it is easy to lose access to it. If an organization has too many administrators it means that permissions are handled too liberally.",
    doc_url: "https://docs.github.com/en/organizations/managing-membership-in-your-organization",
}

#[async_trait]
impl OrgRule for OrganizationAdmins {
    async fn run(&self, org: &Organization) -> Result<Vec<RuleResult>> {
        let count = org.list_admins().await?.len();
        let (severity, title) = match count {
            0 => (
                Severity::Warning,
                "No admins are visible in your organization".to_string(),
            ),
            1 => (
                Severity::Error,
                "Your organization has only one admin".to_string(),
            ),
            n if n > MAX_ADMINS => (
                Severity::Error,
                format!("Too many admins ({n}) in your organization"),
            ),
            n => (Severity::Notice, format!("{n} admins in your organization")),
        };
        Ok(vec![RuleResult::new(severity, title, Self::DESCRIPTION)
            .with_fix_url(links::org_people(org.login()))
            .with_doc_url(Self::DOC_URL)])
    }
}
