use async_trait::async_trait;
use hubcheck_core::{RepoRule, Result, RuleResult, Severity};
use hubcheck_github::{Organization, Repository};

use super::listing_failed;
use crate::links;

/// Every repository needs a top-level README.
#[derive(Debug, Default)]
pub struct Readme;

rule_info! {
    Readme,
    id: "readme",
    name: "Repository README",
    description: "Repositories should have a README file.",
    doc_url: "https://docs.github.com/en/repositories/managing-your-repositorys-settings-and-features/customizing-your-repository/about-readmes",
}

#[async_trait]
impl RepoRule for Readme {
    async fn run(&self, org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>> {
        let fix_url = links::new_file(
            org.login(),
            repo.name(),
            &repo.data().default_branch,
            "readme=1",
        );
        let tree = match repo.list_contents().await {
            Ok(tree) => tree,
            Err(e) => {
                return Ok(vec![listing_failed("Cannot check README", repo, &e)
                    .with_fix_url(fix_url)
                    .with_doc_url(Self::DOC_URL)])
            }
        };

        let found = tree.iter().find(|entry| {
            entry.is_top_level() && entry.name.to_ascii_uppercase().starts_with("README")
        });
        let result = match found {
            Some(entry) => RuleResult::new(
                Severity::Notice,
                "Repository has a README",
                format!("The repository has a README file named {}.", entry.name),
            ),
            None => RuleResult::new(
                Severity::Error,
                "Repository has no README",
                "The repository has no README file.",
            )
            .with_fix_url(fix_url),
        };
        Ok(vec![result
            .with_repository(repo.name())
            .with_doc_url(Self::DOC_URL)])
    }
}
