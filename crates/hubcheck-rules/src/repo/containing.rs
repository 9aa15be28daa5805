use async_trait::async_trait;
use hubcheck_core::{RepoRule, Result, RuleResult, Severity};
use hubcheck_github::{Organization, Repository};
use tracing::debug;

use super::listing_failed;
use crate::ignore::IgnoreSet;
use crate::links;

/// Files above this size are not downloaded.
pub const MAX_SCAN_SIZE: u64 = 200 * 1024;

/// Flags files whose contents include a user-supplied term.
///
/// The search is case-insensitive. Without a term the rule does not apply
/// and produces no results.
#[derive(Debug, Clone)]
pub struct Containing {
    term: String,
    name: String,
    ignore: IgnoreSet,
}

impl Containing {
    pub const DESCRIPTION: &'static str =
        "This rule alerts for files containing a user-configurable term.";

    pub fn new(term: &str, ignore: IgnoreSet) -> Self {
        let term = term.trim().to_lowercase();
        let name = if term.is_empty() {
            "Files containing a user-configurable term".to_string()
        } else {
            format!("Files containing '{term}'")
        };
        Self { term, name, ignore }
    }

    /// The lowercased search term.
    pub fn term(&self) -> &str {
        &self.term
    }
}

impl hubcheck_core::RuleInfo for Containing {
    fn id(&self) -> &str {
        "containing"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn doc_url(&self) -> &str {
        ""
    }
}

#[async_trait]
impl RepoRule for Containing {
    async fn run(&self, org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>> {
        if self.term.is_empty() {
            return Ok(Vec::new());
        }

        let tree = match repo.list_contents().await {
            Ok(tree) => tree,
            Err(e) => return Ok(vec![listing_failed("Cannot list repository contents", repo, &e)]),
        };

        let mut results = Vec::new();
        for entry in tree.iter().filter(|entry| entry.is_file()) {
            if entry.size > MAX_SCAN_SIZE {
                results.push(
                    RuleResult::new(
                        Severity::Debug,
                        "File too large for analysis",
                        format!("File {} is too large for content analysis, skipping...", entry.path),
                    )
                    .with_repository(repo.name()),
                );
                continue;
            }
            if self.ignore.is_match(&entry.path) {
                results.push(
                    RuleResult::new(
                        Severity::Debug,
                        "File matches ignore pattern",
                        format!("File {} matches ignore pattern, skipping analysis...", entry.path),
                    )
                    .with_repository(repo.name()),
                );
                continue;
            }

            debug!(repo = %repo.name(), path = %entry.path, "Scanning file");
            let bytes = match repo.file_contents(&entry.path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    results.push(
                        RuleResult::new(
                            Severity::Warning,
                            format!("Failed to fetch {}", entry.path),
                            e.to_string(),
                        )
                        .with_repository(repo.name()),
                    );
                    continue;
                }
            };

            if String::from_utf8_lossy(&bytes).to_lowercase().contains(&self.term) {
                results.push(
                    RuleResult::new(
                        Severity::Error,
                        format!("File {} contains '{}'", entry.path, self.term),
                        format!("This file contains the search term '{}'.", self.term),
                    )
                    .with_repository(repo.name())
                    .with_fix_url(links::file_action(
                        org.login(),
                        repo.name(),
                        &repo.data().default_branch,
                        "edit",
                        &entry.path,
                    )),
                );
            }
        }
        Ok(results)
    }
}
