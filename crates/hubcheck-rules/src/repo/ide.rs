use async_trait::async_trait;
use hubcheck_core::{RepoRule, Result, RuleResult, Severity};
use hubcheck_github::{Organization, RepoDirEntry, Repository};

use super::listing_failed;
use crate::links;

/// Editor and IDE project files should not be committed.
#[derive(Debug, Default)]
pub struct IdeArtifacts;

rule_info! {
    IdeArtifacts,
    id: "ide",
    name: "IDE artifacts",
    description: "Repositories should not have IDE artifacts committed (such as .vscode, .idea, *.iml, etc.)",
    doc_url: "https://docs.github.com/en/get-started/getting-started-with-git/ignoring-files",
}

fn is_ide_artifact(entry: &RepoDirEntry) -> bool {
    entry.name == ".vscode" || entry.name == ".idea" || entry.name.ends_with(".iml")
}

#[async_trait]
impl RepoRule for IdeArtifacts {
    async fn run(&self, org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>> {
        let tree = match repo.list_contents().await {
            Ok(tree) => tree,
            Err(e) => {
                return Ok(vec![listing_failed("Cannot check IDE artifacts", repo, &e)
                    .with_doc_url(Self::DOC_URL)])
            }
        };

        let branch = &repo.data().default_branch;
        let mut results: Vec<_> = tree
            .iter()
            .filter(|entry| is_ide_artifact(entry))
            .map(|entry| {
                RuleResult::new(
                    Severity::Warning,
                    "IDE artifacts found",
                    format!(
                        "IDE artifact found at {}. Please remove this IDE artifact for contributor friendliness.",
                        entry.path
                    ),
                )
                .with_repository(repo.name())
                .with_fix_url(links::file_action(
                    org.login(),
                    repo.name(),
                    branch,
                    "delete",
                    &entry.path,
                ))
                .with_doc_url(Self::DOC_URL)
            })
            .collect();

        if results.is_empty() {
            results.push(
                RuleResult::new(
                    Severity::Notice,
                    "No IDE artifacts found",
                    "The repository has no IDE artifacts committed.",
                )
                .with_repository(repo.name())
                .with_doc_url(Self::DOC_URL),
            );
        }
        Ok(results)
    }
}
