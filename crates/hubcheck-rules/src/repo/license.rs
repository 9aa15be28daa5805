use async_trait::async_trait;
use hubcheck_core::{RepoRule, Result, RuleResult, Severity};
use hubcheck_github::{Organization, Repository};

use crate::links;

/// Public repositories should declare a license.
#[derive(Debug, Default)]
pub struct License;

rule_info! {
    License,
    id: "public-repo-license",
    name: "Repository license",
    description: "Public repositories should have a license.",
    doc_url: "https://docs.github.com/articles/adding-a-license-to-a-repository/",
}

#[async_trait]
impl RepoRule for License {
    async fn run(&self, org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>> {
        let data = repo.data();
        let result = match &data.license {
            Some(license) => RuleResult::new(
                Severity::Notice,
                "Repository has a license",
                format!("This repository is licensed under the {}.", license.name),
            ),
            None if data.is_public() => RuleResult::new(
                Severity::Warning,
                "Repository has no license",
                "This repository does not have a license file.",
            ),
            None => RuleResult::new(
                Severity::Warning,
                "Repository has no license",
                "This repository does not have a license file, but this repository is not public. Consider adding a license.",
            ),
        };
        Ok(vec![result
            .with_repository(repo.name())
            .with_fix_url(links::new_license(org.login(), repo.name()))
            .with_doc_url(Self::DOC_URL)])
    }
}
