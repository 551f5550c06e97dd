//! Search Query - 검색 요청과 쿼리 문자열 생성

use gitgutter_foundation::{Error, Result};
use gitgutter_provider::{CodeSearchParams, SearchSort, SortDirection};
use serde::{Deserialize, Serialize};

/// 확장자 필터
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "extensions", rename_all = "lowercase")]
pub enum FileFilter {
    #[default]
    None,
    /// 지정한 확장자만
    Include(Vec<String>),
    /// 지정한 확장자 제외
    Exclude(Vec<String>),
}

impl FileFilter {
    /// `"include"` / `"exclude"` 와 쉼표 구분 확장자 목록으로 생성
    ///
    /// 알 수 없는 종류나 빈 목록이면 필터 없음.
    pub fn from_parts(kind: &str, extensions: &str) -> Self {
        let extensions = parse_extension_list(extensions);
        if extensions.is_empty() {
            return FileFilter::None;
        }
        match kind.trim().to_lowercase().as_str() {
            "include" => FileFilter::Include(extensions),
            "exclude" => FileFilter::Exclude(extensions),
            _ => FileFilter::None,
        }
    }

    /// GitHub 쿼리 qualifier 목록
    pub fn qualifiers(&self) -> Vec<String> {
        let (prefix, extensions) = match self {
            FileFilter::None => return Vec::new(),
            FileFilter::Include(exts) => ("extension:", exts),
            FileFilter::Exclude(exts) => ("-extension:", exts),
        };
        extensions
            .iter()
            .map(|ext| format!("{}{}", prefix, ext.strip_prefix('.').unwrap_or(ext)))
            .collect()
    }
}

/// 쉼표 구분 확장자 목록 (trim, 소문자, 빈 항목 제거)
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// 코드 검색 요청
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub language: Option<String>,
    pub filter: FileFilter,
    pub sort: SearchSort,
    pub order: SortDirection,
    pub per_page: u32,
    /// 저장소별 설정 파일 목록 조회 여부
    pub include_config_files: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            filter: FileFilter::None,
            sort: SearchSort::BestMatch,
            order: SortDirection::Desc,
            per_page: 30,
            include_config_files: false,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.language = Some(language.trim().to_string()).filter(|l| !l.is_empty());
        self
    }

    pub fn filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, sort: SearchSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn order(mut self, order: SortDirection) -> Self {
        self.order = order;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_config_files(mut self, enabled: bool) -> Self {
        self.include_config_files = enabled;
        self
    }

    /// 쿼리가 비어 있으면 에러
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::invalid_input("Query is required"));
        }
        Ok(())
    }

    /// `query [language:L] [extension:e ...]`
    pub fn build_query(&self) -> String {
        let mut parts = vec![self.query.trim().to_string()];
        if let Some(language) = &self.language {
            parts.push(format!("language:{}", language));
        }
        parts.extend(self.filter.qualifiers());
        parts.join(" ")
    }

    /// API 파라미터로 변환 (결과 수는 `max_per_page` 이하)
    pub fn to_params(&self, max_per_page: u32) -> CodeSearchParams {
        CodeSearchParams {
            query: self.build_query(),
            sort: self.sort,
            order: self.order,
            per_page: self.per_page.clamp(1, max_per_page.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_query() {
        let request = SearchRequest::new("  tokio::spawn ");
        assert_eq!(request.build_query(), "tokio::spawn");
        assert!(request.validate().is_ok());
        assert!(SearchRequest::new("   ").validate().is_err());
    }

    #[test]
    fn test_language_and_include_filter() {
        let request = SearchRequest::new("useEffect")
            .language("typescript")
            .filter(FileFilter::from_parts("include", ".tsx, TS ,,"));
        assert_eq!(
            request.build_query(),
            "useEffect language:typescript extension:tsx extension:ts"
        );
    }

    #[test]
    fn test_exclude_filter() {
        let filter = FileFilter::from_parts("exclude", "md,.txt");
        assert_eq!(filter.qualifiers(), vec!["-extension:md", "-extension:txt"]);
    }

    #[test]
    fn test_filter_edge_cases() {
        assert_eq!(FileFilter::from_parts("include", " , "), FileFilter::None);
        assert_eq!(FileFilter::from_parts("sideways", "rs"), FileFilter::None);
        assert_eq!(SearchRequest::new("x").language("  ").language, None);
    }

    #[test]
    fn test_to_params_caps_per_page() {
        let params = SearchRequest::new("x")
            .per_page(500)
            .sort(SearchSort::Indexed)
            .to_params(100);
        assert_eq!(params.per_page, 100);
        assert_eq!(params.sort, SearchSort::Indexed);
        assert_eq!(SearchRequest::new("x").per_page(0).to_params(30).per_page, 1);
    }
}
