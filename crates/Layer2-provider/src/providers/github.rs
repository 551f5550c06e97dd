//! GitHub REST API client
//!
//! Implements [`FileProvider`] and [`CodeHost`] on top of reqwest. Every
//! request goes through the shared [`Throttle`] and records the rate limit
//! headers of its response.

use crate::{
    error::ProviderError,
    models::{
        CodeSearchParams, CommitSummary, EntryKind, FileContent, RateLimitInfo, RepoEntry,
        SearchPage, SearchSort,
    },
    r#trait::{CodeHost, FileProvider, ProviderResult, RepositoryId},
    throttle::Throttle,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use gitgutter_foundation::GitHubSettings;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::RwLock;
use tracing::{debug, warn};

/// GitHub REST client
pub struct GitHubClient {
    client: Client,
    base_url: String,
    throttle: Throttle,
    last_rate_limit: RwLock<RateLimitInfo>,
}

/// Contents API payload for a single file
#[derive(Debug, Deserialize)]
struct ContentsFile {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl GitHubClient {
    /// Create a client from immutable settings
    pub fn new(settings: &GitHubSettings) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&settings.accept)
                .map_err(|e| ProviderError::InvalidRequest(format!("Accept header: {}", e)))?,
        );

        if let Some(token) = settings.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|e| ProviderError::InvalidRequest(format!("Token header: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            throttle: Throttle::new(settings.min_request_interval()),
            last_rate_limit: RwLock::new(RateLimitInfo::default()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    /// Throttled GET returning the decoded JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        self.throttle.acquire().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let rate_limit = parse_rate_limit(response.headers());
        if rate_limit.is_known() {
            if let Ok(mut last) = self.last_rate_limit.write() {
                *last = rate_limit;
            }
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body, &rate_limit));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    /// Fetch a path through the contents API. `Ok(None)` for 404 and for
    /// anything that is not a regular file.
    async fn fetch_file(
        &self,
        repository: &RepositoryId,
        path: &str,
        git_ref: Option<&str>,
    ) -> ProviderResult<Option<ContentsFile>> {
        let query: Vec<(&str, String)> = git_ref
            .map(|r| vec![("ref", r.to_string())])
            .unwrap_or_default();

        let value: serde_json::Value =
            match self.get_json(&contents_path(repository, path), &query).await {
                Ok(value) => value,
                Err(ProviderError::NotFound(_)) => return Ok(None),
                Err(e) => return Err(e),
            };

        // Directories come back as arrays
        if !value.is_object() {
            return Ok(None);
        }

        let file: ContentsFile = serde_json::from_value(value)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        if file.kind != EntryKind::File {
            return Ok(None);
        }
        Ok(Some(file))
    }
}

// ============================================================================
// FileProvider
// ============================================================================

#[async_trait]
impl FileProvider for GitHubClient {
    async fn list_files(
        &self,
        repository: &RepositoryId,
        path: &str,
    ) -> ProviderResult<Vec<RepoEntry>> {
        let value: serde_json::Value = self
            .get_json(&contents_path(repository, path), &[])
            .await?;

        // A file path yields a single object rather than a listing
        let entries = if value.is_array() {
            serde_json::from_value(value)
        } else {
            serde_json::from_value(value).map(|entry: RepoEntry| vec![entry])
        };
        entries.map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    async fn get_file_content(
        &self,
        repository: &RepositoryId,
        path: &str,
    ) -> ProviderResult<Option<String>> {
        match self.fetch_file(repository, path, None).await? {
            Some(file) => decode_content(&file).map(Some),
            None => Ok(None),
        }
    }
}

// ============================================================================
// CodeHost
// ============================================================================

#[async_trait]
impl CodeHost for GitHubClient {
    async fn search_code(&self, params: &CodeSearchParams) -> ProviderResult<SearchPage> {
        let mut query = vec![
            ("q", params.query.clone()),
            ("order", params.order.as_str().to_string()),
            ("per_page", params.per_page.to_string()),
        ];
        // best-match is the API default and not a valid `sort` value
        if params.sort == SearchSort::Indexed {
            query.push(("sort", params.sort.as_str().to_string()));
        }

        let page: SearchPage = self.get_json("/search/code", &query).await?;
        debug!(
            "search returned {} of {} results",
            page.items.len(),
            page.total_count
        );
        Ok(page)
    }

    async fn search_paths(
        &self,
        repository: &RepositoryId,
        filename: &str,
        per_page: u32,
    ) -> ProviderResult<Vec<String>> {
        let query = [
            ("q", format!("repo:{} filename:{}", repository, filename)),
            ("per_page", per_page.to_string()),
        ];
        let page: SearchPage = self.get_json("/search/code", &query).await?;
        Ok(page.items.into_iter().map(|item| item.path).collect())
    }

    async fn commits_for_path(
        &self,
        repository: &RepositoryId,
        path: &str,
        per_page: u32,
    ) -> ProviderResult<Vec<CommitSummary>> {
        #[derive(Deserialize)]
        struct RawCommit {
            sha: String,
            commit: CommitBody,
        }

        #[derive(Deserialize)]
        struct CommitBody {
            #[serde(default)]
            message: String,
            #[serde(default)]
            author: Option<CommitAuthor>,
        }

        #[derive(Deserialize)]
        struct CommitAuthor {
            #[serde(default)]
            name: Option<String>,
            #[serde(default)]
            date: Option<String>,
        }

        let query = [("path", path.to_string()), ("per_page", per_page.to_string())];
        let raw: Vec<RawCommit> = self
            .get_json(&format!("/repos/{}/commits", repository), &query)
            .await?;

        Ok(raw
            .into_iter()
            .map(|c| {
                let author = c.commit.author;
                CommitSummary {
                    sha: c.sha,
                    message: c.commit.message,
                    author: author
                        .as_ref()
                        .and_then(|a| a.name.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    date: author.and_then(|a| a.date).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn file_at_ref(
        &self,
        repository: &RepositoryId,
        path: &str,
        git_ref: &str,
    ) -> ProviderResult<Option<String>> {
        match self.fetch_file(repository, path, Some(git_ref)).await? {
            Some(file) => decode_content(&file).map(Some),
            None => Ok(None),
        }
    }

    async fn file_content(
        &self,
        repository: &RepositoryId,
        path: &str,
    ) -> ProviderResult<FileContent> {
        let file = self
            .fetch_file(repository, path, None)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("{}:{}", repository, path)))?;

        let content = decode_content(&file)?;
        Ok(FileContent {
            encoding: file.encoding.clone().unwrap_or_default(),
            path: file.path,
            name: file.name,
            size: file.size,
            content,
        })
    }

    fn rate_limit(&self) -> RateLimitInfo {
        self.last_rate_limit
            .read()
            .map(|info| *info)
            .unwrap_or_default()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// `/repos/{repo}/contents/{path}` with each path segment percent-encoded
fn contents_path(repository: &RepositoryId, path: &str) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();

    if encoded.is_empty() {
        format!("/repos/{}/contents", repository)
    } else {
        format!("/repos/{}/contents/{}", repository, encoded.join("/"))
    }
}

fn decode_content(file: &ContentsFile) -> ProviderResult<String> {
    let raw = file.content.as_deref().unwrap_or_default();
    match file.encoding.as_deref() {
        Some("base64") => decode_base64_text(raw)
            .map_err(|e| ProviderError::Decode(format!("{}: {}", file.path, e))),
        Some("none") | None if raw.is_empty() => Err(ProviderError::Decode(format!(
            "{}: content not included (file too large)",
            file.path
        ))),
        _ => Ok(raw.to_string()),
    }
}

/// GitHub wraps base64 payloads at 60 columns
pub(crate) fn decode_base64_text(raw: &str) -> Result<String, String> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

fn parse_rate_limit(headers: &HeaderMap) -> RateLimitInfo {
    fn header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    RateLimitInfo {
        limit: header(headers, "x-ratelimit-limit"),
        remaining: header(headers, "x-ratelimit-remaining"),
        reset_at: header(headers, "x-ratelimit-reset"),
    }
}

fn status_error(status: StatusCode, body: &str, rate_limit: &RateLimitInfo) -> ProviderError {
    let err = ProviderError::from_http_status(status.as_u16(), body);

    if status == StatusCode::FORBIDDEN && rate_limit.is_exhausted() {
        warn!("GitHub rate limit exhausted");
        return ProviderError::RateLimited {
            reset_at: rate_limit.reset_at,
        };
    }

    match err {
        ProviderError::RateLimited { reset_at: None } => ProviderError::RateLimited {
            reset_at: rate_limit.reset_at,
        },
        other => other,
    }
}
