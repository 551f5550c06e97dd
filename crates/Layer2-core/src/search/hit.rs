//! 검색 결과 표시용 타입

use super::enrich::ConfigFiles;
use super::snippet::CodeSnippet;
use gitgutter_provider::SearchItem;
use serde::{Deserialize, Serialize};

/// 화면에 보여줄 검색 결과 한 건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub repository: String,
    pub file_path: String,
    pub file_name: String,
    pub language: String,
    pub size: u64,
    /// 최신 커밋 날짜 (날짜 정렬 시에만 채워짐, 실패하면 빈 문자열)
    pub updated_at: Option<String>,
    pub html_url: String,
    pub snippet: CodeSnippet,
    pub is_old: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_files: Option<ConfigFiles>,
}

impl From<SearchItem> for SearchHit {
    fn from(item: SearchItem) -> Self {
        let file_name = item
            .path
            .rsplit('/')
            .next()
            .unwrap_or(&item.path)
            .to_string();
        let snippet = CodeSnippet::from_text_matches(&item.text_matches);

        Self {
            repository: item.repository.full_name,
            file_name,
            language: item
                .repository
                .language
                .unwrap_or_else(|| "Unknown".to_string()),
            size: item.size,
            updated_at: None,
            html_url: item.html_url,
            snippet,
            is_old: false,
            config_files: None,
            file_path: item.path,
        }
    }
}

/// 검색 결과 전체
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// 이번 쿼리에서 실제로 보낸 문자열
    pub query: String,
    pub total_count: u64,
    pub incomplete_results: bool,
    pub hits: Vec<SearchHit>,
}
