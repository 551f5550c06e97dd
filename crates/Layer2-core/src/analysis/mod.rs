//! Reference Analysis - 휴리스틱 기반 참조 분석
//!
//! 저장소의 모든 소스 파일에서 검색어가 등장하는 라인을 찾아 선언, 이름
//! 변경, import, 사용으로 분류하고, 분류된 라인들로 관계와 UML 데이터를
//! 만든다. AST는 만들지 않는다.
//!
//! ## 흐름
//! ```text
//! collect_files ─► is_analyzable ─► analyze_file ─► classify (라인별)
//!                                         │
//!                                         ▼
//!                   build_relationships ─► build_uml ─► AnalysisResult
//! ```

mod classifier;
mod extract;
mod file;
mod relationships;
mod repository;
mod types;
mod uml;

pub use classifier::{classify, reference_kind};
pub use extract::{extract_entity_name, NameRule};
pub use file::{analyze_content, analyze_file};
pub use relationships::build_relationships;
pub use repository::{analyze_repository, collect_files, file_extension, is_analyzable};
pub use types::{
    AnalysisResult, FileAnalysis, LineReference, ReferenceKind, Relationship, RelationshipKind,
    Strength, UmlData, UmlEntity, UmlKind, UmlRelationship,
};
pub use uml::{build_uml, uml_kind};

use gitgutter_foundation::{Error, Result};
use gitgutter_provider::{FileProvider, RepositoryId};

/// 분석 진입점
///
/// 저장소나 검색어가 비어 있으면 `Error::InvalidInput`. 그 외 실패는 파일
/// 단위로 흡수되므로 에러가 되지 않는다.
pub async fn analyze(
    provider: &dyn FileProvider,
    repository: &str,
    search_string: &str,
    original_file_path: Option<&str>,
) -> Result<AnalysisResult> {
    let repository = RepositoryId::new(repository)?;
    if search_string.trim().is_empty() {
        return Err(Error::invalid_input("search string must not be empty"));
    }

    let original_file_path = original_file_path.filter(|p| !p.trim().is_empty());
    Ok(analyze_repository(provider, &repository, search_string, original_file_path).await)
}
