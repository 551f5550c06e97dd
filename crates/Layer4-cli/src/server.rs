//! Web API server
//!
//! 검색 화면이 호출하는 JSON API. 실패 응답은 항상 `{"error": ...}` 이며
//! 호출자 입력 문제는 400, 나머지는 500.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use gitgutter_core::{
    analyze, commit_history, read_file, repository_tree, CodeSearcher, FileFilter, SearchRequest,
};
use gitgutter_foundation::{Error, LimitsConfig};
use gitgutter_provider::{CodeHost, FileProvider, RepositoryId, SearchSort, SortDirection};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// 웹 API 기본 검색 결과 수
const DEFAULT_WEB_PER_PAGE: u32 = 10;

// ============================================================================
// State
// ============================================================================

/// 모든 핸들러가 공유하는 상태
#[derive(Clone)]
pub struct AppState {
    files: Arc<dyn FileProvider>,
    host: Arc<dyn CodeHost>,
    limits: LimitsConfig,
}

impl AppState {
    pub fn new<H: CodeHost + 'static>(host: H, limits: LimitsConfig) -> Self {
        let host = Arc::new(host);
        Self {
            files: host.clone(),
            host,
            limits,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// JSON 에러 응답
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = if e.is_user_facing() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("Request failed: {}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult = std::result::Result<Json<Value>, ApiError>;

/// 비어 있지 않은 필수 문자열 필드
fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

/// 있기만 하면 되는 필드. 앞뒤 공백도 값의 일부로 그대로 넘긴다
fn present<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchBody {
    pub query: String,
    pub language: Option<String>,
    pub sort: Option<SearchSort>,
    pub order: Option<SortDirection>,
    pub per_page: Option<u32>,
    pub file_filter_type: Option<String>,
    pub file_extensions: Option<String>,
    pub check_config_files: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommitHistoryBody {
    pub repository: Option<String>,
    pub file_path: Option<String>,
    pub max_commits: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TreeBody {
    pub repository: Option<String>,
    pub path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileContentBody {
    pub repository: Option<String>,
    pub file_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeBody {
    pub repository: Option<String>,
    pub file_path: Option<String>,
    pub search_string: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn search_handler(
    State(state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> ApiResult {
    if body.query.trim().is_empty() {
        return Err(ApiError::bad_request("Query is required"));
    }

    let filter = FileFilter::from_parts(
        body.file_filter_type.as_deref().unwrap_or_default(),
        body.file_extensions.as_deref().unwrap_or_default(),
    );
    let per_page = state
        .limits
        .clamp_web_per_page(body.per_page.unwrap_or(DEFAULT_WEB_PER_PAGE));

    // 검색 화면의 기본값은 날짜순
    let mut request = SearchRequest::new(body.query.trim())
        .sort(body.sort.unwrap_or(SearchSort::Indexed))
        .order(body.order.unwrap_or_default())
        .per_page(per_page)
        .filter(filter)
        .with_config_files(body.check_config_files);
    if let Some(language) = body.language {
        request = request.language(language);
    }

    let outcome = CodeSearcher::new(state.host.as_ref(), state.limits.clone())
        .search(&request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "query": outcome.query,
        "total_count": outcome.total_count,
        "incomplete_results": outcome.incomplete_results,
        "results": outcome.hits,
    })))
}

pub async fn commit_history_handler(
    State(state): State<AppState>,
    Json(body): Json<CommitHistoryBody>,
) -> ApiResult {
    let message = "Repository and file path are required";
    let repository = RepositoryId::new(required(&body.repository, message)?)?;
    let file_path = required(&body.file_path, message)?;
    let max_commits = state
        .limits
        .clamp_web_commits(body.max_commits.unwrap_or(state.limits.default_commits));

    let commits = commit_history(
        state.host.as_ref(),
        &repository,
        file_path,
        max_commits,
        state.limits.web_preview_lines,
    )
    .await?;

    Ok(Json(json!({ "success": true, "commits": commits })))
}

pub async fn repository_tree_handler(
    State(state): State<AppState>,
    Json(body): Json<TreeBody>,
) -> ApiResult {
    let repository = RepositoryId::new(required(&body.repository, "Repository is required")?)?;
    let tree = repository_tree(state.files.as_ref(), &repository, &body.path).await?;

    Ok(Json(json!({
        "success": true,
        "tree": tree,
        "path": body.path,
    })))
}

pub async fn file_content_handler(
    State(state): State<AppState>,
    Json(body): Json<FileContentBody>,
) -> ApiResult {
    let message = "Repository and file path are required";
    let repository = RepositoryId::new(required(&body.repository, message)?)?;
    let file_path = required(&body.file_path, message)?;

    let file = read_file(state.host.as_ref(), &repository, file_path).await?;

    Ok(Json(json!({
        "success": true,
        "content": file.content,
        "size": file.size,
        "encoding": file.encoding,
    })))
}

pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> ApiResult {
    let message = "Repository and search string are required";
    let repository = required(&body.repository, message)?;
    let search_string = present(&body.search_string, message)?;

    info!("Analyzing '{}' in {}", search_string, repository);
    let analysis = analyze(
        state.files.as_ref(),
        repository,
        search_string,
        body.file_path.as_deref(),
    )
    .await?;

    Ok(Json(json!({ "success": true, "analysis": analysis })))
}

pub async fn health_handler() -> &'static str {
    "OK"
}

// ============================================================================
// Server
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(search_handler))
        .route("/api/commit-history", post(commit_history_handler))
        .route("/api/repository-tree", post(repository_tree_handler))
        .route("/api/file-content", post(file_content_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `addr` 에 바인드하고 Ctrl-C 까지 서비스
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use gitgutter_provider::{CommitSummary, InMemoryProvider, MatchSpan, RepoRef, SearchItem, TextMatch};
    use tower::ServiceExt;

    const REPO: &str = "octo/shop";

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new()
            .with_file(REPO, "utils.py", "def compute_total(items):\n    return 1\n\nprint(compute_total(cart))\n")
            .with_file(REPO, "docs/guide.md", "compute_total")
            .with_commit(
                REPO,
                "utils.py",
                CommitSummary {
                    sha: "0123456789abcdef".into(),
                    message: "Add totals\n".into(),
                    author: "Ada".into(),
                    date: "2024-03-01T10:00:00Z".into(),
                },
                "line\n".repeat(30),
            )
            .with_search_item(SearchItem {
                name: "utils.py".into(),
                path: "utils.py".into(),
                html_url: "https://github.com/octo/shop/blob/main/utils.py".into(),
                repository: RepoRef {
                    full_name: REPO.into(),
                    language: Some("Python".into()),
                },
                size: 64,
                text_matches: vec![TextMatch {
                    fragment: "print(compute_total(cart))".into(),
                    matches: vec![MatchSpan {
                        text: "compute_total".into(),
                        indices: vec![6, 19],
                    }],
                }],
            })
    }

    fn state() -> AppState {
        AppState::new(provider(), LimitsConfig::default())
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let err = search_handler(State(state()), Json(SearchBody::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Query is required");
    }

    #[tokio::test]
    async fn test_search_returns_hits() {
        let body = SearchBody {
            query: "compute_total".into(),
            sort: Some(SearchSort::BestMatch),
            per_page: Some(500),
            ..Default::default()
        };
        let Json(value) = search_handler(State(state()), Json(body)).await.unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["total_count"], 1);
        assert_eq!(value["results"][0]["file_path"], "utils.py");
        assert_eq!(value["results"][0]["language"], "Python");
        assert_eq!(value["results"][0]["updated_at"], Value::Null);
    }

    #[tokio::test]
    async fn test_search_defaults_to_date_sort() {
        let body = SearchBody {
            query: "compute_total".into(),
            ..Default::default()
        };
        let Json(value) = search_handler(State(state()), Json(body)).await.unwrap();

        assert_eq!(value["results"][0]["updated_at"], "2024-03-01T10:00:00Z");
        assert_eq!(value["results"][0]["is_old"], true);
    }

    #[tokio::test]
    async fn test_commit_history() {
        let body = CommitHistoryBody {
            repository: Some(REPO.into()),
            file_path: Some("utils.py".into()),
            max_commits: Some(200),
        };
        let Json(value) = commit_history_handler(State(state()), Json(body))
            .await
            .unwrap();

        let commits = value["commits"].as_array().unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0]["sha"], "01234567");
        assert_eq!(commits[0]["message"], "Add totals");
        assert_eq!(commits[0]["total_lines"], 31);
        assert_eq!(commits[0]["content"].as_str().unwrap().lines().count(), 20);
    }

    #[tokio::test]
    async fn test_commit_history_requires_path() {
        let body = CommitHistoryBody {
            repository: Some(REPO.into()),
            ..Default::default()
        };
        let err = commit_history_handler(State(state()), Json(body))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_repository_tree_dirs_first() {
        let body = TreeBody {
            repository: Some(REPO.into()),
            path: String::new(),
        };
        let Json(value) = repository_tree_handler(State(state()), Json(body))
            .await
            .unwrap();

        let tree = value["tree"].as_array().unwrap();
        assert_eq!(tree[0]["name"], "docs");
        assert_eq!(tree[0]["type"], "dir");
        assert_eq!(tree[1]["name"], "utils.py");
        assert_eq!(value["path"], "");
    }

    #[tokio::test]
    async fn test_file_content_and_missing_file() {
        let body = FileContentBody {
            repository: Some(REPO.into()),
            file_path: Some("docs/guide.md".into()),
        };
        let Json(value) = file_content_handler(State(state()), Json(body))
            .await
            .unwrap();
        assert_eq!(value["content"], "compute_total");

        let body = FileContentBody {
            repository: Some(REPO.into()),
            file_path: Some("nope.py".into()),
        };
        let err = file_content_handler(State(state()), Json(body))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze() {
        let body = AnalyzeBody {
            repository: Some(REPO.into()),
            file_path: Some("utils.py".into()),
            search_string: Some("compute_total".into()),
        };
        let Json(value) = analyze_handler(State(state()), Json(body)).await.unwrap();

        let analysis = &value["analysis"];
        assert_eq!(analysis["declarations"].as_array().unwrap().len(), 1);
        assert_eq!(analysis["usages"].as_array().unwrap().len(), 1);
        assert_eq!(analysis["relationships"][0]["strength"], "strong");
        assert_eq!(analysis["original_file_path"], "utils.py");
    }

    #[tokio::test]
    async fn test_analyze_keeps_padded_search_string() {
        let files = InMemoryProvider::new().with_file(
            REPO,
            "cart.py",
            "grand_totals = 0\nprint(total + 1)\n",
        );
        let app = router(AppState::new(files, LimitsConfig::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"repository": " octo/shop ", "search_string": "total "}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        let analysis = &value["analysis"];
        assert_eq!(analysis["search_string"], "total ");
        assert_eq!(analysis["repository"], REPO);
        // "grand_totals = 0" 은 "total " 을 포함하지 않는다
        let references = analysis["references"].as_array().unwrap();
        assert_eq!(references.len(), 1);
        assert_eq!(references[0]["line_number"], 2);
        assert_eq!(references[0]["kind"], "usage");
    }

    #[test]
    fn test_present_does_not_trim() {
        let padded = Some(" def".to_string());
        assert_eq!(present(&padded, "missing").unwrap(), " def");
        assert_eq!(required(&padded, "missing").unwrap(), "def");
        assert!(present(&Some(String::new()), "missing").is_err());
        assert!(present(&None, "missing").is_err());
    }

    #[tokio::test]
    async fn test_router_health_and_errors() {
        let app = router(state());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"repository": "octo/shop"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = body_json(response).await;
        assert_eq!(value["error"], "Repository and search string are required");
    }
}
