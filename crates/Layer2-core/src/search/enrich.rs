//! Search Enrichment - 커밋 날짜, 설정 파일 목록
//!
//! 두 작업 모두 항목마다 추가 요청을 보내므로 실패는 항목 단위로 흡수한다.

use super::hit::SearchHit;
use gitgutter_provider::{CodeHost, RepositoryId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// 환경 파일 이름 패턴
pub const ENV_PATTERNS: [&str; 8] = [
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.test",
    ".env.staging",
    "environment",
    "env",
];

/// 설정 파일 이름 패턴
pub const CONFIG_PATTERNS: [&str; 12] = [
    ".config",
    ".cfg",
    ".conf",
    ".ini",
    ".yaml",
    ".yml",
    ".toml",
    ".json",
    ".xml",
    "config",
    "configuration",
    "settings",
];

/// 패턴당 조회할 최대 파일 수
const PATHS_PER_PATTERN: u32 = 10;

/// 저장소의 환경/설정 파일 경로 (중복 제거, 정렬)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFiles {
    pub env_files: Vec<String>,
    pub config_files: Vec<String>,
}

impl ConfigFiles {
    pub fn is_empty(&self) -> bool {
        self.env_files.is_empty() && self.config_files.is_empty()
    }
}

// ============================================================================
// Commit dates
// ============================================================================

/// 각 항목의 최신 커밋 날짜를 채우고 최신순으로 정렬
///
/// 날짜를 가져오지 못한 항목은 빈 문자열로 두고 맨 뒤로 간다.
pub async fn enrich_with_dates(host: &dyn CodeHost, hits: &mut [SearchHit]) {
    for hit in hits.iter_mut() {
        let date = match RepositoryId::new(hit.repository.as_str()) {
            Ok(repository) => match host.latest_commit(&repository, &hit.file_path).await {
                Ok(Some(commit)) => commit.date,
                Ok(None) => String::new(),
                Err(e) => {
                    warn!("Could not fetch date for {}: {}", hit.file_path, e);
                    String::new()
                }
            },
            Err(_) => String::new(),
        };
        hit.updated_at = Some(date);
    }

    // ISO-8601 문자열은 사전순 == 시간순
    hits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

// ============================================================================
// Config files
// ============================================================================

/// 한 번의 검색 동안 저장소별 결과를 기억하는 캐시
#[derive(Debug, Default)]
pub struct ConfigFileCache {
    by_repository: HashMap<String, ConfigFiles>,
}

impl ConfigFileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_repository.is_empty()
    }

    /// 캐시에 없으면 조회 후 저장
    pub async fn get_or_fetch(&mut self, host: &dyn CodeHost, repository: &str) -> ConfigFiles {
        if let Some(found) = self.by_repository.get(repository) {
            return found.clone();
        }
        let files = match RepositoryId::new(repository) {
            Ok(id) => find_config_files(host, &id).await,
            Err(_) => ConfigFiles::default(),
        };
        self.by_repository
            .insert(repository.to_string(), files.clone());
        files
    }
}

/// 각 항목에 저장소의 설정 파일 목록을 붙인다
pub async fn enrich_with_config_files(host: &dyn CodeHost, hits: &mut [SearchHit]) {
    let mut cache = ConfigFileCache::new();
    for hit in hits.iter_mut() {
        hit.config_files = Some(cache.get_or_fetch(host, &hit.repository).await);
    }
    debug!("Checked config files in {} repositories", cache.len());
}

/// 저장소에서 패턴별로 파일 이름 검색
pub async fn find_config_files(host: &dyn CodeHost, repository: &RepositoryId) -> ConfigFiles {
    ConfigFiles {
        env_files: search_patterns(host, repository, &ENV_PATTERNS).await,
        config_files: search_patterns(host, repository, &CONFIG_PATTERNS).await,
    }
}

async fn search_patterns(
    host: &dyn CodeHost,
    repository: &RepositoryId,
    patterns: &[&str],
) -> Vec<String> {
    let mut found = BTreeSet::new();
    for pattern in patterns {
        match host
            .search_paths(repository, pattern, PATHS_PER_PATTERN)
            .await
        {
            Ok(paths) => found.extend(paths),
            Err(e) => debug!("Searching {} in {} failed: {}", pattern, repository, e),
        }
    }
    found.into_iter().collect()
}
