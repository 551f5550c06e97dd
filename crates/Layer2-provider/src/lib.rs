//! # gitgutter-provider
//!
//! Code host abstraction layer for gitgutter.
//!
//! ## Features
//! - `FileProvider` for repository traversal and file reads
//! - `CodeHost` for code search, commit history and file snapshots
//! - GitHub REST client with a minimum inter-request spacing
//! - In-memory host for tests and offline runs

pub mod error;
pub mod models;
pub mod providers;
pub mod throttle;
pub mod r#trait;

// Core traits and types
pub use models::{
    CodeSearchParams, CommitSummary, EntryKind, FileContent, FileInfo, MatchSpan, RateLimitInfo,
    RepoEntry, RepoRef, SearchItem, SearchPage, SearchSort, SortDirection, TextMatch,
};
pub use r#trait::{CodeHost, FileProvider, ProviderResult, RepositoryId};

// Error and throttle
pub use error::ProviderError;
pub use throttle::Throttle;

// Provider implementations
pub use providers::github::GitHubClient;
pub use providers::memory::InMemoryProvider;
