use async_trait::async_trait;
use hubcheck_core::{RepoRule, Result, RuleResult, Severity};
use hubcheck_github::{Organization, Repository};

use crate::links;

/// Dependabot vulnerability alerts must be enabled.
#[derive(Debug, Default)]
pub struct VulnerabilityAlerts;

rule_info! {
    VulnerabilityAlerts,
    id: "repo-vulnerability-alerts",
    name: "Vulnerability alerts",
    description: "Vulnerability alerts warn if a library used as a dependency has a known vulnerability and should be updated.",
    doc_url: "https://docs.github.com/en/code-security/dependabot/dependabot-alerts/about-dependabot-alerts",
}

#[async_trait]
impl RepoRule for VulnerabilityAlerts {
    async fn run(&self, org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>> {
        let (severity, title) = if repo.vulnerability_alerts_enabled().await? {
            (Severity::Notice, "Vulnerability alerts are enabled")
        } else {
            (Severity::Error, "Vulnerability alerts are disabled")
        };
        Ok(vec![RuleResult::new(severity, title, Self::DESCRIPTION)
            .with_repository(repo.name())
            .with_fix_url(links::repo_settings(
                org.login(),
                repo.name(),
                "security_analysis",
            ))
            .with_doc_url(Self::DOC_URL)])
    }
}
