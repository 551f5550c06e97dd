//! Terminal output formatting
//!
//! 모든 함수는 문자열을 돌려주고 출력은 호출하는 쪽에서 한다.

use crossterm::style::Stylize;
use gitgutter_core::analysis::{LineReference, RelationshipKind};
use gitgutter_core::search::parse_timestamp;
use gitgutter_core::{AnalysisResult, CommitEntry, SearchHit, SearchOutcome};
use gitgutter_provider::{RateLimitInfo, RepoEntry, RepositoryId};
use std::fmt::Write;

/// 설정 파일 목록에서 이름을 보여줄 최대 개수
const LISTED_FILES: usize = 3;

fn rule(ch: char) -> String {
    ch.to_string().repeat(80)
}

/// `2024-03-01T10:00:00Z` → `2024-03-01 10:00:00` (해석 실패 시 원문)
fn format_date(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| value.to_string())
}

// ============================================================================
// Search
// ============================================================================

pub fn render_search(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    if outcome.hits.is_empty() {
        let _ = writeln!(out, "{}", format!("No results for: {}", outcome.query).red());
        return out;
    }

    let _ = writeln!(
        out,
        "{}",
        format!("Found {} results", outcome.total_count).green()
    );
    if outcome.incomplete_results {
        let _ = writeln!(out, "{}", "Results may be incomplete (search timed out)".yellow());
    }
    let _ = writeln!(
        out,
        "{}",
        format!("Showing {} results for: {}", outcome.hits.len(), outcome.query).blue()
    );
    let _ = writeln!(out, "{}", rule('='));

    for (i, hit) in outcome.hits.iter().enumerate() {
        out.push_str(&render_hit(hit, i + 1));
        let _ = writeln!(out, "{}", rule('-'));
    }
    out
}

fn render_hit(hit: &SearchHit, index: usize) -> String {
    let mut out = format!("{} ", format!("{}.", index).cyan());
    if hit.is_old {
        let _ = write!(out, "{} ", "[OLD]".red());
    }
    let _ = writeln!(
        out,
        "{}",
        format!("{}/{}", hit.repository, hit.file_path).green()
    );
    let _ = writeln!(out, "   {} {}", "Repository:".yellow(), hit.repository);
    let _ = writeln!(out, "   {} {}", "File:".yellow(), hit.file_name);
    let _ = writeln!(
        out,
        "   {} {} | {} {}",
        "Language:".yellow(),
        hit.language,
        "Size:".yellow(),
        hit.size
    );

    if let Some(updated_at) = &hit.updated_at {
        let label = if hit.is_old {
            "Updated:".red()
        } else {
            "Updated:".yellow()
        };
        let shown = if updated_at.is_empty() {
            "Unknown".to_string()
        } else {
            format_date(updated_at)
        };
        let _ = writeln!(out, "   {} {}", label, shown);
    }
    let _ = writeln!(out, "   {} {}", "URL:".yellow(), hit.html_url);

    if let Some(files) = &hit.config_files {
        if !files.env_files.is_empty() {
            let _ = writeln!(
                out,
                "   {} {}",
                "Env Files:".magenta(),
                list_files(&files.env_files)
            );
        }
        if !files.config_files.is_empty() {
            let _ = writeln!(
                out,
                "   {} {}",
                "Config Files:".magenta(),
                list_files(&files.config_files)
            );
        }
    }

    if !hit.snippet.is_empty() {
        let _ = writeln!(out, "   {}", "Code Snippet:".yellow());
        let snippet = hit
            .snippet
            .render_with(|text| text.red().bold().to_string());
        let _ = writeln!(out, "{}", snippet);
    }
    out
}

/// 앞 3개와 나머지 개수
fn list_files(files: &[String]) -> String {
    let shown = files
        .iter()
        .take(LISTED_FILES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if files.len() > LISTED_FILES {
        format!("{} (+{} more)", shown, files.len() - LISTED_FILES)
    } else {
        shown
    }
}

// ============================================================================
// History
// ============================================================================

pub fn render_history(repository: &RepositoryId, path: &str, entries: &[CommitEntry]) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        let _ = writeln!(out, "{}", "No commits found for this file".yellow());
        return out;
    }

    let _ = writeln!(
        out,
        "{}",
        format!("Found {} commits for {}/{}", entries.len(), repository, path).green()
    );
    let _ = writeln!(out, "{}", rule('='));

    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "\n{}", format!("Commit {}:", i + 1).cyan());
        let _ = writeln!(out, "   {} {}", "SHA:".yellow(), entry.sha);
        let _ = writeln!(out, "   {} {}", "Date:".yellow(), format_date(&entry.date));
        let _ = writeln!(out, "   {} {}", "Author:".yellow(), entry.author);
        let _ = writeln!(out, "   {} {}", "Message:".yellow(), entry.summary());

        if !entry.content.is_empty() {
            let _ = writeln!(out, "   {}", "File Content:".yellow());
            for (n, line) in entry.content.split('\n').enumerate() {
                let _ = writeln!(out, "      {:3}: {}", n + 1, line);
            }
            let hidden = entry.hidden_lines();
            if hidden > 0 {
                let _ = writeln!(out, "      ... ({} more lines)", hidden);
            }
        }
        let _ = writeln!(out, "{}", rule('-'));
    }
    out
}

// ============================================================================
// Tree
// ============================================================================

pub fn render_tree(repository: &RepositoryId, path: &str, entries: &[RepoEntry]) -> String {
    let mut out = String::new();
    let location = if path.trim_matches('/').is_empty() {
        repository.to_string()
    } else {
        format!("{}/{}", repository, path.trim_matches('/'))
    };
    let _ = writeln!(out, "{}", location.as_str().bold());

    for entry in entries {
        if entry.is_dir() {
            let _ = writeln!(out, "  {}", format!("{}/", entry.name).blue());
        } else {
            let _ = writeln!(out, "  {:<50} {:>10}", entry.name, entry.size);
        }
    }
    out
}

// ============================================================================
// Analysis
// ============================================================================

pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "References to '{}' in {}",
            result.search_string, result.repository
        )
        .green()
    );
    let _ = writeln!(
        out,
        "{} files, {} references ({} declarations, {} renames, {} imports, {} usages)",
        result.files_with_references(),
        result.references.len(),
        result.declarations.len(),
        result.renames.len(),
        result.imports.len(),
        result.usages.len()
    );
    let _ = writeln!(out, "{}", rule('='));

    for (title, refs) in [
        ("Declarations", &result.declarations),
        ("Renames", &result.renames),
        ("Imports", &result.imports),
        ("Usages", &result.usages),
    ] {
        if refs.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", title.cyan());
        for reference in refs {
            let _ = writeln!(out, "   {}", location(reference));
        }
    }

    if !result.relationships.is_empty() {
        let _ = writeln!(out, "{}", "Relationships".cyan());
        for relationship in &result.relationships {
            let arrow = match relationship.kind {
                RelationshipKind::DeclarationUsage => "->",
                RelationshipKind::Rename => "=>",
            };
            let _ = writeln!(
                out,
                "   {}:{} {} {}:{} ({:?})",
                relationship.from.file_path,
                relationship.from.line_number,
                arrow,
                relationship.to.file_path,
                relationship.to.line_number,
                relationship.strength
            );
        }
    }

    let uml = &result.uml_data;
    let _ = writeln!(
        out,
        "UML: {} classes, {} methods, {} properties",
        uml.classes.len(),
        uml.methods.len(),
        uml.properties.len()
    );
    out
}

fn location(reference: &LineReference) -> String {
    format!(
        "{}:{} [{}] {}",
        reference.file_path,
        reference.line_number,
        reference.entity_name,
        reference.raw_line.trim()
    )
}

// ============================================================================
// Rate limit
// ============================================================================

/// 마지막 응답의 rate limit 정보 (헤더가 없었으면 None)
pub fn render_rate_limit(info: &RateLimitInfo) -> Option<String> {
    if !info.is_known() {
        return None;
    }
    let remaining = info
        .remaining
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    let reset = info.reset_display().unwrap_or_else(|| "unknown".to_string());
    let line = format!(
        "Rate limit info: {} requests remaining, resets at {}",
        remaining, reset
    );
    Some(if info.is_exhausted() {
        line.red().to_string()
    } else {
        line.yellow().to_string()
    })
}
