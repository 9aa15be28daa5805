//! Repository contents API types.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{GitHubError, Result};

/// Content type for repository entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symbolic link.
    Symlink,
    /// Git submodule.
    Submodule,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Dir => write!(f, "dir"),
            Self::Symlink => write!(f, "symlink"),
            Self::Submodule => write!(f, "submodule"),
        }
    }
}

/// One node of a repository's file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDirEntry {
    /// Entry type.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Size in bytes (0 for directories).
    #[serde(default)]
    pub size: u64,
    /// Entry name (filename or directory name).
    pub name: String,
    /// Full path from repository root.
    pub path: String,
    /// Git object SHA.
    #[serde(default)]
    pub sha: String,
}

impl RepoDirEntry {
    /// Create a new file entry.
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self::new(ContentType::File, path.into(), size)
    }

    /// Create a new directory entry.
    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(ContentType::Dir, path.into(), 0)
    }

    fn new(content_type: ContentType, path: String, size: u64) -> Self {
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            content_type,
            size,
            name,
            path,
            sha: String::new(),
        }
    }

    /// Whether this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.content_type == ContentType::Dir
    }

    /// Whether this entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.content_type == ContentType::File
    }

    /// Whether this entry sits directly in the repository root.
    pub fn is_top_level(&self) -> bool {
        !self.path.contains('/')
    }
}

/// A single file as returned by the contents API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FileContent {
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl FileContent {
    /// Decode the payload into raw bytes.
    pub fn decode(self, path: &str) -> Result<Vec<u8>> {
        let content = self.content.unwrap_or_default();
        match self.encoding.as_deref() {
            Some("base64") => {
                // GitHub wraps the payload every 60 characters.
                let compact: String = content.split_whitespace().collect();
                base64::engine::general_purpose::STANDARD
                    .decode(compact)
                    .map_err(|e| GitHubError::Decode {
                        reason: format!("invalid base64 content for {path}: {e}"),
                        body: String::new(),
                    })
            }
            Some("none") | None if content.is_empty() => Err(GitHubError::Decode {
                reason: format!("{path} has no inline content (file too large?)"),
                body: String::new(),
            }),
            _ => Ok(content.into_bytes()),
        }
    }
}
