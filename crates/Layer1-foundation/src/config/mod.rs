//! Config - 통합 설정 관리
//!
//! - `limits.rs` - 검색/히스토리 결과 개수 제한
//! - `settings.rs` - GitGutterConfig 통합 설정 (GitHub, Server)

mod limits;
mod settings;

pub use limits::LimitsConfig;
pub use settings::{GitGutterConfig, GitHubSettings, ServerConfig, CONFIG_FILE};
