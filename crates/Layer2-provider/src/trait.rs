//! Provider traits
//!
//! ## 구성
//!
//! - `FileProvider`: 저장소 탐색과 파일 내용 조회 (분석 파이프라인이 사용)
//! - `CodeHost`: 코드 검색, 커밋 히스토리 등 검색 화면에 필요한 나머지 API

use crate::error::ProviderError;
use crate::models::{CodeSearchParams, CommitSummary, FileContent, RateLimitInfo, RepoEntry, SearchPage};
use async_trait::async_trait;

// Re-export RepositoryId from Layer1-foundation (표준 타입)
pub use gitgutter_foundation::RepositoryId;

/// Result type for provider operations
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Access to repository files
///
/// Implementations must be safe to share across tasks; the analysis pipeline
/// only ever awaits one call at a time.
#[async_trait]
pub trait FileProvider: Send + Sync {
    /// List one directory level. `path` is `""` for the repository root.
    async fn list_files(&self, repository: &RepositoryId, path: &str)
        -> ProviderResult<Vec<RepoEntry>>;

    /// Decoded text of a file, `Ok(None)` when the path does not exist or is
    /// not a regular file.
    async fn get_file_content(
        &self,
        repository: &RepositoryId,
        path: &str,
    ) -> ProviderResult<Option<String>>;
}

/// Search-side operations of a code host
#[async_trait]
pub trait CodeHost: FileProvider {
    /// Run a code search with text-match metadata
    async fn search_code(&self, params: &CodeSearchParams) -> ProviderResult<SearchPage>;

    /// Paths of files in `repository` whose name matches `filename`
    async fn search_paths(
        &self,
        repository: &RepositoryId,
        filename: &str,
        per_page: u32,
    ) -> ProviderResult<Vec<String>>;

    /// Commits touching `path`, newest first
    async fn commits_for_path(
        &self,
        repository: &RepositoryId,
        path: &str,
        per_page: u32,
    ) -> ProviderResult<Vec<CommitSummary>>;

    /// Decoded text of `path` at `git_ref`, `Ok(None)` when absent
    async fn file_at_ref(
        &self,
        repository: &RepositoryId,
        path: &str,
        git_ref: &str,
    ) -> ProviderResult<Option<String>>;

    /// Decoded file with metadata. Missing files are `ProviderError::NotFound`.
    async fn file_content(&self, repository: &RepositoryId, path: &str)
        -> ProviderResult<FileContent>;

    /// Rate limit headers of the most recent response
    fn rate_limit(&self) -> RateLimitInfo;

    /// Most recent commit touching `path`
    async fn latest_commit(
        &self,
        repository: &RepositoryId,
        path: &str,
    ) -> ProviderResult<Option<CommitSummary>> {
        let commits = self.commits_for_path(repository, path, 1).await?;
        Ok(commits.into_iter().next())
    }
}
