//! Commit History - 파일별 커밋 목록과 당시 내용 미리보기

use gitgutter_foundation::{Error, Result};
use gitgutter_provider::{CodeHost, RepositoryId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 표시용 SHA 길이
pub const SHORT_SHA_LEN: usize = 8;

/// 커밋 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    /// 앞 8자리
    pub sha: String,
    pub date: String,
    pub message: String,
    pub author: String,
    /// 해당 커밋 시점 파일의 앞부분
    pub content: String,
    /// 해당 커밋 시점 파일 전체 줄 수 (내용을 못 가져오면 0)
    pub total_lines: usize,
}

impl CommitEntry {
    /// 미리보기에 포함되지 않은 줄 수
    pub fn hidden_lines(&self) -> usize {
        let shown = if self.content.is_empty() {
            0
        } else {
            self.content.split('\n').count()
        };
        self.total_lines.saturating_sub(shown)
    }

    /// 메시지 첫 줄
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// `path` 를 바꾼 커밋들 (최신순)과 각 시점 내용의 앞 `preview_lines` 줄
pub async fn commit_history(
    host: &dyn CodeHost,
    repository: &RepositoryId,
    path: &str,
    max_commits: u32,
    preview_lines: usize,
) -> Result<Vec<CommitEntry>> {
    if path.trim().is_empty() {
        return Err(Error::invalid_input("file path must not be empty"));
    }

    let commits = host
        .commits_for_path(repository, path, max_commits.max(1))
        .await?;
    debug!("{} commits for {}:{}", commits.len(), repository, path);

    let mut entries = Vec::with_capacity(commits.len());
    for commit in commits {
        let snapshot = match host.file_at_ref(repository, path, &commit.sha).await {
            Ok(content) => content.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load {} at {}: {}", path, commit.sha, e);
                String::new()
            }
        };

        let (content, total_lines) = if snapshot.is_empty() {
            (String::new(), 0)
        } else {
            let lines: Vec<&str> = snapshot.split('\n').collect();
            let preview = lines[..preview_lines.min(lines.len())].join("\n");
            (preview, lines.len())
        };

        entries.push(CommitEntry {
            sha: commit.sha.chars().take(SHORT_SHA_LEN).collect(),
            date: commit.date,
            message: commit.message.trim().to_string(),
            author: commit.author,
            content,
            total_lines,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitgutter_provider::{CommitSummary, InMemoryProvider};

    fn commit(sha: &str, message: &str) -> CommitSummary {
        CommitSummary {
            sha: sha.into(),
            message: message.into(),
            author: "Ada".into(),
            date: "2024-03-01T10:00:00Z".into(),
        }
    }

    fn repo() -> RepositoryId {
        RepositoryId::new("o/r").unwrap()
    }

    #[tokio::test]
    async fn test_commit_history_with_preview() {
        let body: String = (1..=25).map(|i| format!("line {}\n", i)).collect();
        let host = InMemoryProvider::new()
            .with_commit(
                "o/r",
                "src/app.py",
                commit("0123456789abcdef", "  Fix bug\n\nDetails  "),
                body,
            )
            .with_commit("o/r", "src/app.py", commit("fedcba9876543210", "Init"), "");

        let entries = commit_history(&host, &repo(), "src/app.py", 10, 20)
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sha, "01234567");
        assert_eq!(entries[0].message, "Fix bug\n\nDetails");
        assert_eq!(entries[0].summary(), "Fix bug");
        // 마지막 개행 뒤 빈 줄 포함 26줄
        assert_eq!(entries[0].total_lines, 26);
        assert_eq!(entries[0].content.lines().count(), 20);
        assert_eq!(entries[0].hidden_lines(), 6);

        assert_eq!(entries[1].content, "");
        assert_eq!(entries[1].total_lines, 0);
        assert_eq!(entries[1].hidden_lines(), 0);
    }

    #[tokio::test]
    async fn test_commit_history_limit_and_validation() {
        let host = InMemoryProvider::new()
            .with_commit("o/r", "a.py", commit("aaaaaaaaaa", "one"), "x")
            .with_commit("o/r", "a.py", commit("bbbbbbbbbb", "two"), "y");

        let entries = commit_history(&host, &repo(), "a.py", 1, 10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "x");
        assert_eq!(entries[0].total_lines, 1);

        let err = commit_history(&host, &repo(), " ", 10, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
