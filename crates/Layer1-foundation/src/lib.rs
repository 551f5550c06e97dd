//! # gitgutter-foundation
//!
//! Foundation layer for gitgutter:
//! - Error: 공통 에러 타입 (Error, Result)
//! - Config: 통합 설정 (GitGutterConfig, GitHubSettings, LimitsConfig)
//! - Storage: JsonStore (글로벌/프로젝트 설정 파일)
//! - Types: RepositoryId

pub mod config;
pub mod error;
pub mod storage;
pub mod types;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config
// ============================================================================
pub use config::{GitGutterConfig, GitHubSettings, LimitsConfig, ServerConfig, CONFIG_FILE};

// ============================================================================
// Storage
// ============================================================================
pub use storage::JsonStore;

// ============================================================================
// Types
// ============================================================================
pub use types::RepositoryId;
