//! Per-repository content tree cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::contents::RepoDirEntry;
use crate::error::Result;

/// Shared, immutable content tree of one repository.
pub type ContentTree = Arc<[RepoDirEntry]>;

type Slot = Arc<OnceCell<ContentTree>>;

/// Write-once cache of recursive content listings keyed by `owner/repository`.
///
/// A slot is filled at most once; a failed fetch leaves it empty. Entries are
/// never invalidated.
#[derive(Debug, Default)]
pub struct ContentCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ContentCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(owner: &str, repo: &str) -> String {
        format!("{owner}/{repo}")
    }

    fn slot(&self, owner: &str, repo: &str) -> Slot {
        self.slots
            .lock()
            .entry(Self::key(owner, repo))
            .or_default()
            .clone()
    }

    /// Pre-populate the tree of a repository.
    ///
    /// Returns `false` if the repository was already cached.
    pub fn seed(&self, owner: &str, repo: &str, entries: Vec<RepoDirEntry>) -> bool {
        self.slot(owner, repo).set(entries.into()).is_ok()
    }

    /// Cached tree of a repository, if present.
    pub fn get(&self, owner: &str, repo: &str) -> Option<ContentTree> {
        self.slots
            .lock()
            .get(&Self::key(owner, repo))
            .and_then(|slot| slot.get().cloned())
    }

    /// Return the cached tree, running `fetch` to fill the slot on first use.
    ///
    /// Concurrent callers for the same repository wait on a single fetch.
    pub async fn get_or_fetch<F, Fut>(&self, owner: &str, repo: &str, fetch: F) -> Result<ContentTree>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<RepoDirEntry>>>,
    {
        let slot = self.slot(owner, repo);
        let tree = slot
            .get_or_try_init(move || async move { fetch().await.map(ContentTree::from) })
            .await?;
        Ok(tree.clone())
    }

    /// Number of repositories with a populated tree.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Check if no tree has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitHubError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_fetch_runs_once_per_repository() {
        let cache = ContentCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let tree = cache
                .get_or_fetch("acme", "widgets", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![RepoDirEntry::file("README.md", 10)])
                })
                .await
                .unwrap();
            assert_eq!(tree.len(), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_scoped_by_owner() {
        let cache = ContentCache::new();
        cache.seed("acme", "widgets", vec![RepoDirEntry::file("a", 1)]);
        cache.seed("other", "widgets", vec![]);

        assert_eq!(cache.get("acme", "widgets").unwrap().len(), 1);
        assert_eq!(cache.get("other", "widgets").unwrap().len(), 0);
        assert!(cache.get("acme", "gadgets").is_none());
    }

    #[tokio::test]
    async fn test_seeded_cache_skips_fetch() {
        let cache = ContentCache::new();
        assert!(cache.seed("acme", "widgets", vec![RepoDirEntry::dir("src")]));
        assert!(!cache.seed("acme", "widgets", vec![]));

        let tree = cache
            .get_or_fetch("acme", "widgets", || async {
                Err(GitHubError::Network("must not be called".into()))
            })
            .await
            .unwrap();
        assert_eq!(tree[0].path, "src");
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = ContentCache::new();

        let result = cache
            .get_or_fetch("acme", "widgets", || async {
                Err(GitHubError::Network("connection reset".into()))
            })
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty());

        let tree = cache
            .get_or_fetch("acme", "widgets", || async {
                Ok(vec![RepoDirEntry::file("a.txt", 1)])
            })
            .await
            .unwrap();
        assert_eq!(tree.len(), 1);
    }
}
