//! Code Search - GitHub 코드 검색과 결과 후처리
//!
//! ## 기능
//! - 언어/확장자 qualifier 를 붙인 쿼리 생성
//! - 날짜순 정렬 시 파일별 최신 커밋 날짜 조회
//! - 저장소별 환경/설정 파일 목록 (검색 1회 동안 캐시)
//! - 매치 주변 코드 스니펫, 오래된 결과 표시

mod age;
mod enrich;
mod hit;
mod query;
mod searcher;
mod snippet;

pub use age::{is_stale, parse_timestamp};
pub use enrich::{
    enrich_with_config_files, enrich_with_dates, find_config_files, ConfigFileCache, ConfigFiles,
    CONFIG_PATTERNS, ENV_PATTERNS,
};
pub use hit::{SearchHit, SearchOutcome};
pub use query::{parse_extension_list, FileFilter, SearchRequest};
pub use searcher::CodeSearcher;
pub use snippet::{CodeSnippet, SnippetLine};
