//! GitGutter Config - 통합 설정
//!
//! 기본값 → 글로벌 → 프로젝트 → 환경변수 순서로 병합

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::LimitsConfig;

/// 설정 파일명
pub const CONFIG_FILE: &str = "config.json";

/// 토큰 환경변수 (앞에 있을수록 우선)
const TOKEN_ENV_VARS: [&str; 2] = ["GITGUTTER_TOKEN", "GITHUB_TOKEN"];

/// API URL 환경변수 (GitHub Enterprise 등)
const API_URL_ENV_VAR: &str = "GITGUTTER_API_URL";

// ============================================================================
// GitGutter Config (통합)
// ============================================================================

/// gitgutter 통합 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitGutterConfig {
    /// GitHub API 접속 설정
    #[serde(default)]
    pub github: GitHubSettings,

    /// 결과 개수 제한
    #[serde(default)]
    pub limits: LimitsConfig,

    /// 웹 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
}

impl GitGutterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// 글로벌 + 프로젝트 + 환경변수 병합 로드
    pub fn load() -> Result<Self> {
        let global = JsonStore::global().ok();
        let project = JsonStore::current_project().ok();
        let mut config = Self::load_from(global.as_ref(), project.as_ref())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 주어진 저장소들에서 순서대로 병합 로드 (환경변수 제외)
    pub fn load_from(global: Option<&JsonStore>, project: Option<&JsonStore>) -> Result<Self> {
        let mut config = Self::new();

        for store in [global, project].into_iter().flatten() {
            if let Some(found) = store.read::<GitGutterConfig>(CONFIG_FILE)? {
                debug!("Merging config from {}", store.dir().display());
                config.merge(found);
            }
        }

        Ok(config)
    }

    /// 환경변수 적용
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = TOKEN_ENV_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty())
        {
            self.github.token = Some(token.trim().to_string());
        }

        if let Some(url) = lookup(API_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.github.base_url = url.trim().trim_end_matches('/').to_string();
        }
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: GitGutterConfig) {
        self.github.merge(other.github);
        self.limits.merge(other.limits);
        self.server.merge(other.server);
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.github.token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.github.base_url = url.into();
        self
    }
}

// ============================================================================
// GitHub Settings
// ============================================================================

/// GitHub API 접속 설정
///
/// 한 번 만들어진 값은 클라이언트에 그대로 전달되며 실행 중 바뀌지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Personal access token (없으면 비인증 요청)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// text-match 메타데이터를 받기 위한 Accept 헤더
    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 연속 요청 사이 최소 간격 (ms)
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            user_agent: default_user_agent(),
            accept: default_accept(),
            timeout_secs: default_timeout_secs(),
            throttle_ms: default_throttle_ms(),
        }
    }
}

impl GitHubSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn merge(&mut self, other: GitHubSettings) {
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        if other.accept != default_accept() {
            self.accept = other.accept;
        }
        if other.timeout_secs != default_timeout_secs() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.throttle_ms != default_throttle_ms() {
            self.throttle_ms = other.throttle_ms;
        }
    }
}

// ============================================================================
// Server Config
// ============================================================================

/// 웹 서버 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn merge(&mut self, other: ServerConfig) {
        if other.host != default_host() {
            self.host = other.host;
        }
        if other.port != default_port() {
            self.port = other.port;
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "GitHub-Code-Search-Tool/1.0".to_string()
}

fn default_accept() -> String {
    "application/vnd.github.v3.text-match+json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_throttle_ms() -> u64 {
    100
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}
