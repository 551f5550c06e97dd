//! Limits Configuration - 결과 개수 제한
//!
//! CLI와 웹 API는 서로 다른 상한을 사용한다.

use serde::{Deserialize, Serialize};

/// 검색/커밋 히스토리 제한
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsConfig {
    /// 기본 검색 결과 수
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// GitHub 검색 API가 허용하는 최대 결과 수
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,

    /// 웹 API 검색 상한
    #[serde(default = "default_web_max_per_page")]
    pub web_max_per_page: u32,

    /// 기본 커밋 개수
    #[serde(default = "default_commits")]
    pub default_commits: u32,

    /// CLI 커밋 상한
    #[serde(default = "default_max_commits")]
    pub max_commits: u32,

    /// 웹 API 커밋 상한
    #[serde(default = "default_web_max_commits")]
    pub web_max_commits: u32,

    /// CLI 미리보기 줄 수
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,

    /// 웹 API 미리보기 줄 수
    #[serde(default = "default_web_preview_lines")]
    pub web_preview_lines: usize,

    /// 이 일수보다 오래 갱신되지 않은 파일은 "old"로 표시
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            web_max_per_page: default_web_max_per_page(),
            default_commits: default_commits(),
            max_commits: default_max_commits(),
            web_max_commits: default_web_max_commits(),
            preview_lines: default_preview_lines(),
            web_preview_lines: default_web_preview_lines(),
            stale_after_days: default_stale_after_days(),
        }
    }
}

impl LimitsConfig {
    /// 요청된 결과 수를 CLI 상한으로 자른다
    pub fn clamp_per_page(&self, requested: u32) -> u32 {
        requested.clamp(1, self.max_per_page)
    }

    /// 요청된 결과 수를 웹 API 상한으로 자른다
    pub fn clamp_web_per_page(&self, requested: u32) -> u32 {
        requested.clamp(1, self.web_max_per_page.min(self.max_per_page))
    }

    pub fn clamp_commits(&self, requested: u32) -> u32 {
        requested.clamp(1, self.max_commits)
    }

    pub fn clamp_web_commits(&self, requested: u32) -> u32 {
        requested.clamp(1, self.web_max_commits)
    }

    /// 다른 설정과 병합 (기본값이 아닌 값만 덮어씀)
    pub(crate) fn merge(&mut self, other: LimitsConfig) {
        let defaults = LimitsConfig::default();
        if other.per_page != defaults.per_page {
            self.per_page = other.per_page;
        }
        if other.max_per_page != defaults.max_per_page {
            self.max_per_page = other.max_per_page;
        }
        if other.web_max_per_page != defaults.web_max_per_page {
            self.web_max_per_page = other.web_max_per_page;
        }
        if other.default_commits != defaults.default_commits {
            self.default_commits = other.default_commits;
        }
        if other.max_commits != defaults.max_commits {
            self.max_commits = other.max_commits;
        }
        if other.web_max_commits != defaults.web_max_commits {
            self.web_max_commits = other.web_max_commits;
        }
        if other.preview_lines != defaults.preview_lines {
            self.preview_lines = other.preview_lines;
        }
        if other.web_preview_lines != defaults.web_preview_lines {
            self.web_preview_lines = other.web_preview_lines;
        }
        if other.stale_after_days != defaults.stale_after_days {
            self.stale_after_days = other.stale_after_days;
        }
    }
}

fn default_per_page() -> u32 {
    30
}

fn default_max_per_page() -> u32 {
    100
}

fn default_web_max_per_page() -> u32 {
    30
}

fn default_commits() -> u32 {
    10
}

fn default_max_commits() -> u32 {
    100
}

fn default_web_max_commits() -> u32 {
    50
}

fn default_preview_lines() -> usize {
    10
}

fn default_web_preview_lines() -> usize {
    20
}

fn default_stale_after_days() -> i64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.clamp_per_page(500), 100);
        assert_eq!(limits.clamp_web_per_page(500), 30);
        assert_eq!(limits.clamp_web_per_page(0), 1);
        assert_eq!(limits.clamp_commits(150), 100);
        assert_eq!(limits.clamp_web_commits(150), 50);
        assert_eq!(limits.clamp_web_commits(7), 7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let limits: LimitsConfig = serde_json::from_str(r#"{"webMaxCommits": 20}"#).unwrap();
        assert_eq!(limits.web_max_commits, 20);
        assert_eq!(limits.max_per_page, 100);
        assert_eq!(limits.stale_after_days, 30);
    }
}
