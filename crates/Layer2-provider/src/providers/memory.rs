//! In-memory code host
//!
//! Serves a fixed set of repositories from memory. Used by tests and by
//! offline demos; records which files were fetched so callers can assert on
//! traffic.

use crate::{
    error::ProviderError,
    models::{CodeSearchParams, CommitSummary, FileContent, RateLimitInfo, RepoEntry, SearchItem, SearchPage},
    r#trait::{CodeHost, FileProvider, ProviderResult, RepositoryId},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

#[derive(Debug, Default, Clone)]
struct RepoState {
    /// path -> content (`None` = listed but unreadable)
    files: BTreeMap<String, Option<String>>,
    /// directories whose listing fails
    broken_dirs: BTreeSet<String>,
    /// path -> commits, newest first
    commits: HashMap<String, Vec<CommitSummary>>,
    /// (path, sha) -> content
    snapshots: HashMap<(String, String), String>,
}

/// In-memory [`FileProvider`] / [`CodeHost`]
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    repos: HashMap<String, RepoState>,
    search_items: Vec<SearchItem>,
    fetched: Mutex<Vec<String>>,
    requests: Mutex<usize>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Add a readable file; parent directories are implied
    pub fn with_file(
        mut self,
        repository: &str,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.repo_mut(repository)
            .files
            .insert(path.into(), Some(content.into()));
        self
    }

    /// Add a file that shows up in listings but cannot be read
    pub fn with_unreadable_file(mut self, repository: &str, path: impl Into<String>) -> Self {
        self.repo_mut(repository).files.insert(path.into(), None);
        self
    }

    /// Make listing of `dir` fail
    pub fn with_broken_dir(mut self, repository: &str, dir: impl Into<String>) -> Self {
        self.repo_mut(repository).broken_dirs.insert(dir.into());
        self
    }

    /// Add a commit for `path` (call newest first) with the file content at it
    pub fn with_commit(
        mut self,
        repository: &str,
        path: &str,
        commit: CommitSummary,
        content: impl Into<String>,
    ) -> Self {
        let state = self.repo_mut(repository);
        state
            .snapshots
            .insert((path.to_string(), commit.sha.clone()), content.into());
        state.commits.entry(path.to_string()).or_default().push(commit);
        self
    }

    /// Add a canned code search hit
    pub fn with_search_item(mut self, item: SearchItem) -> Self {
        self.search_items.push(item);
        self
    }

    fn repo_mut(&mut self, repository: &str) -> &mut RepoState {
        self.repos.entry(repository.to_string()).or_default()
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Paths passed to `get_file_content`, in call order
    pub fn fetched_paths(&self) -> Vec<String> {
        self.fetched.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Total number of provider calls served
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| *r).unwrap_or_default()
    }

    fn count_request(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            *requests += 1;
        }
    }

    fn repo(&self, repository: &RepositoryId) -> ProviderResult<&RepoState> {
        self.repos
            .get(repository.as_str())
            .ok_or_else(|| ProviderError::NotFound(repository.to_string()))
    }
}

/// Immediate children of `dir` derived from the flat path map
fn children(state: &RepoState, dir: &str) -> Vec<RepoEntry> {
    let prefix = if dir.is_empty() {
        String::new()
    } else {
        format!("{}/", dir.trim_end_matches('/'))
    };

    let mut dirs = BTreeSet::new();
    let mut entries = Vec::new();

    for path in state.files.keys() {
        let Some(rest) = path.strip_prefix(&prefix) else {
            continue;
        };
        match rest.split_once('/') {
            Some((child_dir, _)) => {
                dirs.insert(format!("{}{}", prefix, child_dir));
            }
            None => {
                let size = state.files[path].as_ref().map(|c| c.len() as u64).unwrap_or(0);
                entries.push(RepoEntry::file(path.clone(), size));
            }
        }
    }

    let mut listing: Vec<RepoEntry> = dirs.into_iter().map(RepoEntry::dir).collect();
    listing.extend(entries);
    listing
}

#[async_trait]
impl FileProvider for InMemoryProvider {
    async fn list_files(
        &self,
        repository: &RepositoryId,
        path: &str,
    ) -> ProviderResult<Vec<RepoEntry>> {
        self.count_request();
        let state = self.repo(repository)?;
        if state.broken_dirs.contains(path) {
            return Err(ProviderError::Unavailable(format!("listing {} failed", path)));
        }
        Ok(children(state, path))
    }

    async fn get_file_content(
        &self,
        repository: &RepositoryId,
        path: &str,
    ) -> ProviderResult<Option<String>> {
        self.count_request();
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(path.to_string());
        }
        let state = self.repo(repository)?;
        match state.files.get(path) {
            Some(Some(content)) => Ok(Some(content.clone())),
            Some(None) => Err(ProviderError::Decode(format!("{} is not valid text", path))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CodeHost for InMemoryProvider {
    async fn search_code(&self, params: &CodeSearchParams) -> ProviderResult<SearchPage> {
        self.count_request();
        let items: Vec<SearchItem> = self
            .search_items
            .iter()
            .take(params.per_page as usize)
            .cloned()
            .collect();
        Ok(SearchPage {
            total_count: self.search_items.len() as u64,
            incomplete_results: false,
            items,
        })
    }

    async fn search_paths(
        &self,
        repository: &RepositoryId,
        filename: &str,
        per_page: u32,
    ) -> ProviderResult<Vec<String>> {
        self.count_request();
        let Some(state) = self.repos.get(repository.as_str()) else {
            return Ok(Vec::new());
        };
        Ok(state
            .files
            .keys()
            .filter(|path| {
                let name = path.rsplit('/').next().unwrap_or(path);
                name == filename || name.ends_with(filename)
            })
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn commits_for_path(
        &self,
        repository: &RepositoryId,
        path: &str,
        per_page: u32,
    ) -> ProviderResult<Vec<CommitSummary>> {
        self.count_request();
        let state = self.repo(repository)?;
        Ok(state
            .commits
            .get(path)
            .map(|commits| commits.iter().take(per_page as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn file_at_ref(
        &self,
        repository: &RepositoryId,
        path: &str,
        git_ref: &str,
    ) -> ProviderResult<Option<String>> {
        self.count_request();
        let state = self.repo(repository)?;
        Ok(state
            .snapshots
            .get(&(path.to_string(), git_ref.to_string()))
            .cloned())
    }

    async fn file_content(
        &self,
        repository: &RepositoryId,
        path: &str,
    ) -> ProviderResult<FileContent> {
        let content = self
            .get_file_content(repository, path)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("{}:{}", repository, path)))?;
        Ok(FileContent {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            size: content.len() as u64,
            encoding: "utf-8".to_string(),
            content,
        })
    }

    fn rate_limit(&self) -> RateLimitInfo {
        RateLimitInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn repo() -> RepositoryId {
        RepositoryId::new("octo/hello").unwrap()
    }

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new()
            .with_file("octo/hello", "README.md", "# hello")
            .with_file("octo/hello", "src/main.py", "print('hi')\n")
            .with_file("octo/hello", "src/util/helpers.py", "def helper(): pass\n")
            .with_unreadable_file("octo/hello", "src/blob.py")
    }

    #[tokio::test]
    async fn test_list_root_and_nested() {
        let provider = provider();

        let root = assert_ok!(provider.list_files(&repo(), "").await);
        let names: Vec<&str> = root.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(names, vec!["src", "README.md"]);
        assert!(root[0].is_dir());

        let src = assert_ok!(provider.list_files(&repo(), "src").await);
        let names: Vec<&str> = src.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(names, vec!["src/util", "src/blob.py", "src/main.py"]);
    }

    #[tokio::test]
    async fn test_get_file_content() {
        let provider = provider();
        let content = assert_ok!(provider.get_file_content(&repo(), "src/main.py").await);
        assert_eq!(content.as_deref(), Some("print('hi')\n"));

        let missing = assert_ok!(provider.get_file_content(&repo(), "nope.py").await);
        assert!(missing.is_none());

        assert_err!(provider.get_file_content(&repo(), "src/blob.py").await);
        assert_eq!(
            provider.fetched_paths(),
            vec!["src/main.py", "nope.py", "src/blob.py"]
        );
    }

    #[tokio::test]
    async fn test_unknown_repository() {
        let provider = provider();
        let other = RepositoryId::new("octo/missing").unwrap();
        let err = provider.list_files(&other, "").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_paths_by_filename() {
        let provider = InMemoryProvider::new()
            .with_file("o/r", ".env", "A=1")
            .with_file("o/r", "config/app.yaml", "a: 1")
            .with_file("o/r", "src/lib.rs", "");
        let repo = RepositoryId::new("o/r").unwrap();

        let env = assert_ok!(provider.search_paths(&repo, ".env", 10).await);
        assert_eq!(env, vec![".env"]);
        let yaml = assert_ok!(provider.search_paths(&repo, ".yaml", 10).await);
        assert_eq!(yaml, vec!["config/app.yaml"]);
    }
}
