//! Typed records exchanged with a code host
//!
//! GitHub payloads are decoded into these types at the client boundary;
//! everything above this layer works with named fields only.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

// ============================================================================
// Repository listing
// ============================================================================

/// Kind of a directory listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Dir => "dir",
            EntryKind::Symlink => "symlink",
            EntryKind::Submodule => "submodule",
            EntryKind::Other => "other",
        }
    }
}

/// One entry of a repository directory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl RepoEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self::new(path, EntryKind::File, size)
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Dir, 0)
    }

    fn new(path: impl Into<String>, kind: EntryKind, size: u64) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self {
            name,
            path,
            kind,
            size,
            download_url: None,
            html_url: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// File discovered during repository traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: String,
    pub name: String,
    pub size: u64,
}

impl From<&RepoEntry> for FileInfo {
    fn from(entry: &RepoEntry) -> Self {
        Self {
            path: entry.path.clone(),
            name: entry.name.clone(),
            size: entry.size,
        }
    }
}

/// Decoded file content together with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    pub path: String,
    pub name: String,
    pub size: u64,
    /// Encoding reported by the host before decoding (usually `base64`)
    pub encoding: String,
    pub content: String,
}

// ============================================================================
// Code search
// ============================================================================

/// `sort` parameter of the code search endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchSort {
    #[default]
    BestMatch,
    Indexed,
}

impl SearchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSort::BestMatch => "best-match",
            SearchSort::Indexed => "indexed",
        }
    }
}

/// `order` parameter of the code search endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Desc => "desc",
            SortDirection::Asc => "asc",
        }
    }
}

/// Fully built code search request
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSearchParams {
    /// Query string including qualifiers (`language:`, `extension:`)
    pub query: String,
    pub sort: SearchSort,
    pub order: SortDirection,
    pub per_page: u32,
}

/// Repository a search hit belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRef {
    pub full_name: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// One highlighted span inside a text match fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub text: String,
    #[serde(default)]
    pub indices: Vec<usize>,
}

/// Text-match metadata attached to a search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMatch {
    #[serde(default)]
    pub fragment: String,
    #[serde(default)]
    pub matches: Vec<MatchSpan>,
}

/// Raw code search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub html_url: String,
    pub repository: RepoRef,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub text_matches: Vec<TextMatch>,
}

/// One page of code search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

// ============================================================================
// Commits
// ============================================================================

/// Commit touching a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: String,
    /// ISO-8601 author date as reported by the host
    pub date: String,
}

// ============================================================================
// Rate limit
// ============================================================================

/// Rate limit headers of the most recent response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    /// Unix timestamp (seconds) when the window resets
    pub reset_at: Option<i64>,
}

impl RateLimitInfo {
    pub fn is_known(&self) -> bool {
        self.remaining.is_some() || self.reset_at.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Reset time rendered in local time (`YYYY-mm-dd HH:MM:SS`)
    pub fn reset_display(&self) -> Option<String> {
        let ts = self.reset_at?;
        Local
            .timestamp_opt(ts, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
