//! 공통 타입

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 저장소 식별자 (`owner/repo`)
///
/// 빈 문자열은 만들 수 없다. 내부 구조는 해석하지 않고 GitHub API 경로에
/// 그대로 사용한다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryId(String);

impl RepositoryId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(Error::invalid_input("repository must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `owner/repo` 형식일 때 owner 부분
    pub fn owner(&self) -> Option<&str> {
        self.0.split_once('/').map(|(owner, _)| owner)
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RepositoryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for RepositoryId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RepositoryId> for String {
    fn from(id: RepositoryId) -> Self {
        id.0
    }
}

impl AsRef<str> for RepositoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_id_rejects_empty() {
        assert!(RepositoryId::new("").is_err());
        assert!(RepositoryId::new("   ").is_err());
        assert!(matches!(
            RepositoryId::new("/"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_repository_id_trims() {
        let id: RepositoryId = " rust-lang/rust/ ".parse().unwrap();
        assert_eq!(id.as_str(), "rust-lang/rust");
        assert_eq!(id.owner(), Some("rust-lang"));
        assert_eq!(id.to_string(), "rust-lang/rust");
    }

    #[test]
    fn test_repository_id_serde() {
        let id: RepositoryId = serde_json::from_str("\"octo/hello\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"octo/hello\"");
        assert!(serde_json::from_str::<RepositoryId>("\"\"").is_err());
    }
}
