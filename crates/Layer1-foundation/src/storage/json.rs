//! JSON 설정 디렉토리 (읽기 전용)
//!
//! 설정은 사용자가 직접 편집한다. 여기서는 찾아서 읽기만 한다.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "gitgutter";

/// 설정 파일이 들어 있는 디렉토리 하나
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// ~/.config/gitgutter/
    pub fn global() -> Result<Self> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(APP_DIR)))
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))
    }

    /// <root>/.gitgutter/
    pub fn project(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(format!(".{}", APP_DIR)))
    }

    /// 작업 디렉토리의 .gitgutter/
    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::project(cwd))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 파일을 읽어 역직렬화. 파일이 없으면 `Ok(None)`, 깨진 JSON 은 `Error::Config`
    pub fn read<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.dir.join(filename);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        debug!("Read {}", path.display());
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid JSON in {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Sample {
        name: String,
        port: u16,
    }

    #[test]
    fn test_read_project_file() {
        let root = tempfile::tempdir().unwrap();
        let store = JsonStore::project(root.path());
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(
            store.dir().join("sample.json"),
            r#"{"name": "local", "port": 8080}"#,
        )
        .unwrap();

        assert!(store.dir().ends_with(".gitgutter"));
        let loaded: Option<Sample> = store.read("sample.json").unwrap();
        assert_eq!(
            loaded,
            Some(Sample {
                name: "local".into(),
                port: 8080
            })
        );
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("never-created"));
        let loaded: Option<Sample> = store.read("config.json").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        let store = JsonStore::new(dir.path());
        let result: Result<Option<Sample>> = store.read("bad.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
