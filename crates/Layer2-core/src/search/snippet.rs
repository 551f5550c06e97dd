//! Code Snippet - 검색 결과 주변 코드
//!
//! 첫 번째 text match 의 fragment 에서 매치된 텍스트가 처음 나오는 줄을 찾고
//! 앞뒤 2줄을 함께 보여준다.

use gitgutter_provider::TextMatch;
use serde::{Deserialize, Serialize};

/// 매치 줄 앞뒤로 보여줄 줄 수
const CONTEXT_LINES: usize = 2;

/// 스니펫의 한 줄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetLine {
    /// fragment 기준 1부터 시작 (fallback 에서는 None)
    pub number: Option<usize>,
    pub text: String,
    pub highlighted: bool,
}

/// 매치 주변 코드
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub matched_text: String,
    pub lines: Vec<SnippetLine>,
}

impl CodeSnippet {
    /// text match 목록에서 스니펫 생성
    pub fn from_text_matches(text_matches: &[TextMatch]) -> Self {
        let Some(first) = text_matches.first() else {
            return Self::default();
        };
        let matched_text = first
            .matches
            .first()
            .map(|m| m.text.clone())
            .unwrap_or_default();

        Self::from_fragment(&first.fragment, &matched_text)
    }

    pub fn from_fragment(fragment: &str, matched_text: &str) -> Self {
        if fragment.is_empty() || matched_text.is_empty() {
            return Self::plain(fragment, matched_text);
        }

        let lines: Vec<&str> = fragment.split('\n').collect();
        let Some(hit) = lines.iter().position(|line| line.contains(matched_text)) else {
            // 여러 줄에 걸친 매치: fragment 전체를 보여주고 등장 위치만 강조
            return Self {
                matched_text: matched_text.to_string(),
                lines: vec![SnippetLine {
                    number: None,
                    text: fragment.to_string(),
                    highlighted: true,
                }],
            };
        };

        let start = hit.saturating_sub(CONTEXT_LINES);
        let end = (hit + CONTEXT_LINES + 1).min(lines.len());

        Self {
            matched_text: matched_text.to_string(),
            lines: (start..end)
                .map(|i| SnippetLine {
                    number: Some(i + 1),
                    text: lines[i].to_string(),
                    highlighted: i == hit,
                })
                .collect(),
        }
    }

    fn plain(fragment: &str, matched_text: &str) -> Self {
        if fragment.is_empty() {
            return Self::default();
        }
        Self {
            matched_text: matched_text.to_string(),
            lines: vec![SnippetLine {
                number: None,
                text: fragment.to_string(),
                highlighted: false,
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 텍스트로 렌더링. `mark` 는 강조 줄 안의 매치 텍스트를 감싼다.
    pub fn render_with<F>(&self, mark: F) -> String
    where
        F: Fn(&str) -> String,
    {
        self.lines
            .iter()
            .map(|line| {
                let text = if line.highlighted && !self.matched_text.is_empty() {
                    line.text.replace(&self.matched_text, &mark(&self.matched_text))
                } else {
                    line.text.clone()
                };
                match (line.number, line.highlighted) {
                    (Some(n), true) => format!("   >> {:3}: {}", n, text),
                    (Some(n), false) => format!("      {:3}: {}", n, text),
                    (None, _) => text,
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 강조 없이 렌더링
    pub fn render(&self) -> String {
        self.render_with(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitgutter_provider::MatchSpan;

    const FRAGMENT: &str = "import os\nimport sys\n\ndef load():\n    return os.environ\n\nprint(load())";

    fn text_match(fragment: &str, text: &str) -> TextMatch {
        TextMatch {
            fragment: fragment.into(),
            matches: vec![MatchSpan {
                text: text.into(),
                indices: vec![],
            }],
        }
    }

    #[test]
    fn test_context_around_first_hit() {
        let snippet = CodeSnippet::from_text_matches(&[text_match(FRAGMENT, "environ")]);
        let numbers: Vec<Option<usize>> = snippet.lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![Some(3), Some(4), Some(5), Some(6), Some(7)]);
        assert!(snippet.lines[2].highlighted);

        let rendered = snippet.render_with(|t| format!("[{}]", t));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "        4: def load():");
        assert_eq!(lines[2], "   >>   5:     return os.[environ]");
    }

    #[test]
    fn test_context_clamped_at_start() {
        let snippet = CodeSnippet::from_fragment(FRAGMENT, "import");
        assert_eq!(snippet.lines.len(), 3);
        assert_eq!(snippet.lines[0].number, Some(1));
        assert!(snippet.lines[0].highlighted);
    }

    #[test]
    fn test_fallback_when_match_spans_lines() {
        let snippet = CodeSnippet::from_fragment("foo\nbar", "foo\nbar");
        assert_eq!(snippet.lines.len(), 1);
        assert_eq!(snippet.render_with(|t| format!("<{}>", t)), "<foo\nbar>");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(CodeSnippet::from_text_matches(&[]).is_empty());
        let snippet = CodeSnippet::from_fragment("just text", "");
        assert_eq!(snippet.render(), "just text");
        assert!(CodeSnippet::from_fragment("", "x").is_empty());
    }
}
