//! Subcommand handlers
//!
//! 결과는 stdout 으로, 로그와 경고는 stderr 로 나간다.

use crate::output;
use gitgutter_core::{
    analyze as analyze_repository, commit_history, read_file, repository_tree, CodeSearcher,
    SearchRequest,
};
use gitgutter_foundation::{LimitsConfig, Result};
use gitgutter_provider::{CodeHost, RepositoryId};

/// Run a code search and print the hits
pub async fn search<H: CodeHost>(
    host: &H,
    limits: &LimitsConfig,
    request: &SearchRequest,
) -> Result<()> {
    let outcome = CodeSearcher::new(host, limits.clone())
        .search(request)
        .await?;
    println!("{}", output::render_search(&outcome));
    print_rate_limit(host);
    Ok(())
}

/// Print commits of a file with a preview of each version
pub async fn history<H: CodeHost>(
    host: &H,
    limits: &LimitsConfig,
    repository: &str,
    path: &str,
    max: Option<u32>,
) -> Result<()> {
    let repository = RepositoryId::new(repository)?;
    let max = limits.clamp_commits(max.unwrap_or(limits.default_commits));

    let entries = commit_history(host, &repository, path, max, limits.preview_lines).await?;
    println!("{}", output::render_history(&repository, path, &entries));
    print_rate_limit(host);
    Ok(())
}

pub async fn tree<H: CodeHost>(host: &H, repository: &str, path: &str) -> Result<()> {
    let repository = RepositoryId::new(repository)?;
    let entries = repository_tree(host, &repository, path).await?;
    println!("{}", output::render_tree(&repository, path, &entries));
    Ok(())
}

/// Print raw file content, nothing else, so the output can be piped
pub async fn show<H: CodeHost>(host: &H, repository: &str, path: &str) -> Result<()> {
    let repository = RepositoryId::new(repository)?;
    let file = read_file(host, &repository, path).await?;
    print!("{}", file.content);
    if !file.content.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub async fn analyze<H: CodeHost>(
    host: &H,
    repository: &str,
    search: &str,
    file: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = analyze_repository(host, repository, search, file).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", output::render_analysis(&result));
    }
    print_rate_limit(host);
    Ok(())
}

fn print_rate_limit<H: CodeHost>(host: &H) {
    if let Some(line) = output::render_rate_limit(&host.rate_limit()) {
        eprintln!("{}", line);
    }
}
