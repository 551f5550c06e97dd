//! Code Searcher - 검색 실행과 후처리

use super::age::is_stale;
use super::enrich::{enrich_with_config_files, enrich_with_dates};
use super::hit::{SearchHit, SearchOutcome};
use super::query::SearchRequest;
use chrono::{DateTime, Utc};
use gitgutter_foundation::{LimitsConfig, Result};
use gitgutter_provider::{CodeHost, SearchSort};
use tracing::{debug, info};

/// 코드 검색기
pub struct CodeSearcher<'a> {
    host: &'a dyn CodeHost,
    limits: LimitsConfig,
}

impl<'a> CodeSearcher<'a> {
    pub fn new(host: &'a dyn CodeHost, limits: LimitsConfig) -> Self {
        Self { host, limits }
    }

    /// 기본 제한으로 생성
    pub fn with_defaults(host: &'a dyn CodeHost) -> Self {
        Self::new(host, LimitsConfig::default())
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        self.search_at(request, Utc::now()).await
    }

    /// `now` 기준으로 오래된 결과를 표시하며 검색
    pub async fn search_at(
        &self,
        request: &SearchRequest,
        now: DateTime<Utc>,
    ) -> Result<SearchOutcome> {
        request.validate()?;

        let params = request.to_params(self.limits.max_per_page);
        info!("Searching for: {}", params.query);

        let page = self.host.search_code(&params).await?;
        let mut hits: Vec<SearchHit> = page.items.into_iter().map(SearchHit::from).collect();

        if request.sort == SearchSort::Indexed {
            debug!("Enriching {} results with commit dates", hits.len());
            enrich_with_dates(self.host, &mut hits).await;
        }

        if request.include_config_files {
            debug!("Checking configuration files");
            enrich_with_config_files(self.host, &mut hits).await;
        }

        for hit in hits.iter_mut() {
            hit.is_old = hit
                .updated_at
                .as_deref()
                .map(|date| is_stale(date, now, self.limits.stale_after_days))
                .unwrap_or(false);
        }

        Ok(SearchOutcome {
            query: params.query,
            total_count: page.total_count,
            incomplete_results: page.incomplete_results,
            hits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::age::parse_timestamp;
    use gitgutter_foundation::Error;
    use gitgutter_provider::{
        CommitSummary, InMemoryProvider, MatchSpan, RepoRef, SearchItem, TextMatch,
    };

    fn item(repo: &str, path: &str) -> SearchItem {
        SearchItem {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            html_url: format!("https://github.com/{}/blob/main/{}", repo, path),
            repository: RepoRef {
                full_name: repo.to_string(),
                language: Some("Python".to_string()),
            },
            size: 42,
            text_matches: vec![TextMatch {
                fragment: "a\nb = needle\nc".into(),
                matches: vec![MatchSpan {
                    text: "needle".into(),
                    indices: vec![4, 10],
                }],
            }],
        }
    }

    fn commit(sha: &str, date: &str) -> CommitSummary {
        CommitSummary {
            sha: sha.into(),
            message: "update".into(),
            author: "dev".into(),
            date: date.into(),
        }
    }

    fn now() -> DateTime<Utc> {
        parse_timestamp("2024-06-30T00:00:00Z").unwrap()
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let host = InMemoryProvider::new();
        let searcher = CodeSearcher::with_defaults(&host);
        let err = searcher.search(&SearchRequest::new("  ")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(host.request_count(), 0);
    }

    #[tokio::test]
    async fn test_best_match_keeps_order_without_dates() {
        let host = InMemoryProvider::new()
            .with_search_item(item("o/a", "x.py"))
            .with_search_item(item("o/b", "y.py"));
        let searcher = CodeSearcher::with_defaults(&host);

        let outcome = searcher
            .search_at(&SearchRequest::new("needle").language("python"), now())
            .await
            .unwrap();

        assert_eq!(outcome.query, "needle language:python");
        assert_eq!(outcome.total_count, 2);
        let paths: Vec<&str> = outcome.hits.iter().map(|h| h.file_path.as_str()).collect();
        assert_eq!(paths, vec!["x.py", "y.py"]);
        assert!(outcome.hits.iter().all(|h| h.updated_at.is_none() && !h.is_old));
        assert_eq!(outcome.hits[0].snippet.lines.len(), 3);
        // 추가 요청 없음
        assert_eq!(host.request_count(), 1);
    }

    #[tokio::test]
    async fn test_indexed_sort_enriches_and_orders_by_date() {
        let host = InMemoryProvider::new()
            .with_search_item(item("o/a", "old.py"))
            .with_search_item(item("o/a", "unknown.py"))
            .with_search_item(item("o/a", "new.py"))
            .with_file("o/a", "old.py", "")
            .with_commit("o/a", "old.py", commit("a1", "2024-01-01T00:00:00Z"), "")
            .with_commit("o/a", "new.py", commit("b2", "2024-06-29T00:00:00Z"), "");
        let searcher = CodeSearcher::with_defaults(&host);

        let request = SearchRequest::new("needle").sort(SearchSort::Indexed);
        let outcome = searcher.search_at(&request, now()).await.unwrap();

        let order: Vec<(&str, bool)> = outcome
            .hits
            .iter()
            .map(|h| (h.file_path.as_str(), h.is_old))
            .collect();
        assert_eq!(
            order,
            vec![("new.py", false), ("old.py", true), ("unknown.py", false)]
        );
        assert_eq!(outcome.hits[2].updated_at.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_config_files_cached_per_repository() {
        let host = InMemoryProvider::new()
            .with_search_item(item("o/a", "x.py"))
            .with_search_item(item("o/a", "y.py"))
            .with_file("o/a", ".env", "A=1")
            .with_file("o/a", "deploy/settings.yaml", "a: 1");
        let searcher = CodeSearcher::with_defaults(&host);

        let request = SearchRequest::new("needle").with_config_files(true);
        let outcome = searcher.search_at(&request, now()).await.unwrap();

        let files = outcome.hits[0].config_files.clone().unwrap();
        assert_eq!(files.env_files, vec![".env"]);
        assert_eq!(files.config_files, vec!["deploy/settings.yaml"]);
        assert_eq!(outcome.hits[1].config_files, Some(files));
        // 검색 1회 + 패턴 20개 (두 번째 항목은 캐시)
        assert_eq!(host.request_count(), 21);
    }
}
