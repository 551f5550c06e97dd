//! gitgutter-core: Core for gitgutter
//!
//! Layer2 - 분석/검색 로직 레이어
//!
//! # 주요 모듈
//!
//! - `analysis`: 휴리스틱 참조 분석 (선언/이름 변경/import/사용, 관계, UML)
//! - `search`: 코드 검색, 날짜/설정 파일 보강, 스니펫
//! - `browse`: 커밋 히스토리, 디렉토리 트리, 파일 내용
//!
//! # 사용 예시
//!
//! ```ignore
//! use gitgutter_core::analysis;
//! use gitgutter_provider::GitHubClient;
//!
//! let client = GitHubClient::new(&config.github)?;
//! let result = analysis::analyze(&client, "octo/hello", "compute_total", None).await?;
//! println!("{} relationships", result.relationships.len());
//! ```

pub mod analysis;
pub mod browse;
pub mod search;

// Re-exports: Analysis
pub use analysis::{analyze, AnalysisResult, FileAnalysis, LineReference, ReferenceKind};

// Re-exports: Search
pub use search::{CodeSearcher, FileFilter, SearchHit, SearchOutcome, SearchRequest};

// Re-exports: Browse
pub use browse::{commit_history, read_file, repository_tree, CommitEntry};
