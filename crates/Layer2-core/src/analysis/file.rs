//! File Analyzer - 단일 파일 분석

use super::classifier::classify;
use super::types::FileAnalysis;
use gitgutter_provider::{FileProvider, ProviderError, RepositoryId};
use tracing::{debug, warn};

/// 파일 내용을 가져와 라인별로 분류
///
/// 내용이 없거나 가져오지 못한 파일은 빈 결과를 돌려준다. 에러는 로그만
/// 남기고 전파하지 않는다.
pub async fn analyze_file(
    provider: &dyn FileProvider,
    repository: &RepositoryId,
    file_path: &str,
    search_string: &str,
) -> FileAnalysis {
    let content = match provider.get_file_content(repository, file_path).await {
        Ok(Some(content)) => content,
        Ok(None) => {
            debug!("No content for {}", file_path);
            return FileAnalysis::empty(file_path);
        }
        Err(ProviderError::Decode(e)) => {
            debug!("Skipping undecodable {}: {}", file_path, e);
            return FileAnalysis::empty(file_path);
        }
        Err(e) => {
            warn!("Failed to fetch {}: {}", file_path, e);
            return FileAnalysis::empty(file_path);
        }
    };

    analyze_content(file_path, &content, search_string)
}

/// 이미 가져온 내용 분석 (`\n` 기준 분할, trim 없음)
pub fn analyze_content(file_path: &str, content: &str, search_string: &str) -> FileAnalysis {
    let mut analysis = FileAnalysis::empty(file_path);
    let lines: Vec<&str> = content.split('\n').collect();
    analysis.line_count = lines.len();

    for (index, line) in lines.iter().enumerate() {
        if let Some(reference) = classify(line, search_string, index + 1, file_path) {
            analysis.push(reference);
        }
    }

    analysis
}
