//! Repository Analyzer - 저장소 전체 분석
//!
//! 목록 항목을 명시적인 작업 스택으로 순회해 파일 목록을 만들고, 확장자
//! 허용 목록에 있는 파일만 순서대로 분석한다.

use super::file::analyze_file;
use super::relationships::build_relationships;
use super::types::AnalysisResult;
use super::uml::build_uml;
use gitgutter_provider::{FileInfo, FileProvider, RepoEntry, RepositoryId};
use tracing::{debug, info, warn};

/// 분석 대상 확장자 (소문자, 점 제외)
const ANALYZABLE_EXTENSIONS: [&str; 37] = [
    "py", "js", "ts", "jsx", "tsx", "java", "cpp", "c", "h", "hpp", "cs", "php", "rb", "go", "rs",
    "swift", "kt", "scala", "clj", "hs", "ml", "fs", "vb", "sql", "r", "m", "mm", "pl", "sh",
    "yaml", "yml", "json", "xml", "html", "css", "scss", "sass",
];

/// 경로의 마지막 `.` 뒤 문자열 (소문자). `.` 이 없으면 None
pub fn file_extension(path: &str) -> Option<String> {
    path.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// 분석 대상 파일인지 확인
pub fn is_analyzable(path: &str) -> bool {
    match file_extension(path) {
        Some(ext) if !ext.is_empty() => ANALYZABLE_EXTENSIONS.contains(&ext.as_str()),
        _ => false,
    }
}

/// 저장소의 모든 파일 수집
///
/// 목록에 나온 순서대로 깊이 우선(pre-order) 방문한다. 디렉토리는 목록 속
/// 자기 자리에서 바로 펼쳐진다. 목록 조회에 실패한 디렉토리는 로그만 남기고
/// 그 하위는 건너뛴다.
pub async fn collect_files(provider: &dyn FileProvider, repository: &RepositoryId) -> Vec<FileInfo> {
    let mut files = Vec::new();
    let mut pending = list_reversed(provider, repository, "").await;

    while let Some(entry) = pending.pop() {
        if entry.is_file() {
            files.push(FileInfo::from(&entry));
        } else if entry.is_dir() {
            pending.extend(list_reversed(provider, repository, &entry.path).await);
        }
    }

    files
}

/// 디렉토리 목록을 역순으로 반환 (스택에서 꺼낼 때 목록 순서가 된다)
async fn list_reversed(
    provider: &dyn FileProvider,
    repository: &RepositoryId,
    dir: &str,
) -> Vec<RepoEntry> {
    match provider.list_files(repository, dir).await {
        Ok(mut entries) => {
            entries.reverse();
            entries
        }
        Err(e) => {
            warn!("Failed to list '{}' in {}: {}", dir, repository, e);
            Vec::new()
        }
    }
}

/// 저장소 전체에서 검색어 참조 분석
pub async fn analyze_repository(
    provider: &dyn FileProvider,
    repository: &RepositoryId,
    search_string: &str,
    original_file_path: Option<&str>,
) -> AnalysisResult {
    let mut result = AnalysisResult::new(
        repository.as_str(),
        search_string,
        original_file_path.map(str::to_string),
    );

    if let Some(path) = original_file_path {
        debug!("Analysis requested from {}", path);
    }

    let files = collect_files(provider, repository).await;
    let eligible: Vec<&FileInfo> = files.iter().filter(|f| is_analyzable(&f.path)).collect();
    debug!(
        "Found {} files, {} eligible for analysis",
        files.len(),
        eligible.len()
    );

    for file in eligible {
        let analysis = analyze_file(provider, repository, &file.path, search_string).await;
        result.absorb(analysis);
    }

    result.relationships =
        build_relationships(&result.declarations, &result.usages, &result.renames);
    result.uml_data = build_uml(&result.declarations, &result.relationships);

    info!(
        "Analyzed '{}' in {}: {} references in {} files, {} relationships",
        search_string,
        repository,
        result.references.len(),
        result.files_with_references(),
        result.relationships.len()
    );

    result
}
