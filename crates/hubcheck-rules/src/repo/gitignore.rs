use async_trait::async_trait;
use hubcheck_core::{RepoRule, Result, RuleResult, Severity};
use hubcheck_github::{Organization, Repository};

use super::listing_failed;
use crate::links;

/// Every repository needs a top-level `.gitignore`.
#[derive(Debug, Default)]
pub struct Gitignore;

rule_info! {
    Gitignore,
    id: "gitignore",
    name: "Repository .gitignore",
    description: "Repositories should have a .gitignore file.",
    doc_url: "https://docs.github.com/en/get-started/getting-started-with-git/ignoring-files",
}

#[async_trait]
impl RepoRule for Gitignore {
    async fn run(&self, org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>> {
        let fix_url = links::new_file(
            org.login(),
            repo.name(),
            &repo.data().default_branch,
            "filename=.gitignore",
        );
        let tree = match repo.list_contents().await {
            Ok(tree) => tree,
            Err(e) => {
                return Ok(vec![listing_failed("Cannot check .gitignore", repo, &e)
                    .with_fix_url(fix_url)
                    .with_doc_url(Self::DOC_URL)])
            }
        };

        let found = tree
            .iter()
            .any(|entry| entry.is_top_level() && entry.name == ".gitignore");
        let result = if found {
            RuleResult::new(
                Severity::Notice,
                "Repository has a .gitignore file",
                "The repository has a .gitignore file.",
            )
        } else {
            RuleResult::new(
                Severity::Error,
                "Repository has no .gitignore",
                "The repository has no .gitignore file.",
            )
            .with_fix_url(fix_url)
        };
        Ok(vec![result
            .with_repository(repo.name())
            .with_doc_url(Self::DOC_URL)])
    }
}
