//! Repository Tree - 디렉토리 한 단계 목록

use gitgutter_foundation::{Error, Result};
use gitgutter_provider::{CodeHost, FileContent, FileProvider, RepoEntry, RepositoryId};

/// 디렉토리 먼저, 그 다음 이름 (대소문자 무시) 순
pub fn sort_tree(entries: &mut [RepoEntry]) {
    entries.sort_by_cached_key(|entry| (!entry.is_dir(), entry.name.to_lowercase()));
}

/// `path` 디렉토리의 정렬된 목록 (`""` 은 저장소 루트)
pub async fn repository_tree(
    provider: &dyn FileProvider,
    repository: &RepositoryId,
    path: &str,
) -> Result<Vec<RepoEntry>> {
    let mut entries = provider
        .list_files(repository, path.trim_matches('/'))
        .await?;
    sort_tree(&mut entries);
    Ok(entries)
}

/// 파일 내용 (디코딩 후)
pub async fn read_file(
    host: &dyn CodeHost,
    repository: &RepositoryId,
    path: &str,
) -> Result<FileContent> {
    let path = path.trim_matches('/');
    if path.is_empty() {
        return Err(Error::invalid_input("file path must not be empty"));
    }
    Ok(host.file_content(repository, path).await?)
}
