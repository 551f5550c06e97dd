//! Entity Name 추출
//!
//! 라인에서 식별자 후보를 순서대로 뽑아 검색어를 포함하는 첫 후보를 쓴다.

use lazy_static::lazy_static;
use regex::Regex;

/// 추출 규칙 (평가 순서대로)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// `def NAME`
    Def,
    /// `class NAME`
    Class,
    /// `function NAME`
    Function,
    /// `NAME =`
    Assignment,
    /// `NAME :`
    Annotation,
    /// `NAME (`
    Call,
}

impl NameRule {
    pub const ORDERED: [NameRule; 6] = [
        NameRule::Def,
        NameRule::Class,
        NameRule::Function,
        NameRule::Assignment,
        NameRule::Annotation,
        NameRule::Call,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            NameRule::Def => &DEF,
            NameRule::Class => &CLASS,
            NameRule::Function => &FUNCTION,
            NameRule::Assignment => &ASSIGNMENT,
            NameRule::Annotation => &ANNOTATION,
            NameRule::Call => &CALL,
        }
    }

    /// 라인의 첫 번째 매치에서 캡처한 이름
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

lazy_static! {
    static ref DEF: Regex = Regex::new(r"(?i)def\s+(\w+)").expect("valid regex");
    static ref CLASS: Regex = Regex::new(r"(?i)class\s+(\w+)").expect("valid regex");
    static ref FUNCTION: Regex = Regex::new(r"(?i)function\s+(\w+)").expect("valid regex");
    static ref ASSIGNMENT: Regex = Regex::new(r"(?i)(\w+)\s*=").expect("valid regex");
    static ref ANNOTATION: Regex = Regex::new(r"(?i)(\w+)\s*:").expect("valid regex");
    static ref CALL: Regex = Regex::new(r"(?i)(\w+)\s*\(").expect("valid regex");
}

/// 검색어를 (대소문자 무시) 포함하는 첫 캡처, 없으면 검색어 그대로
pub fn extract_entity_name(line: &str, search_string: &str) -> String {
    let needle = search_string.to_lowercase();

    NameRule::ORDERED
        .iter()
        .filter_map(|rule| rule.capture(line))
        .find(|name| name.to_lowercase().contains(&needle))
        .map(str::to_string)
        .unwrap_or_else(|| search_string.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_rule() {
        assert_eq!(
            extract_entity_name("def compute_total(items):", "compute"),
            "compute_total"
        );
    }

    #[test]
    fn test_case_insensitive_keyword_and_match() {
        assert_eq!(extract_entity_name("CLASS OrderTotal:", "ordertotal"), "OrderTotal");
        assert_eq!(
            extract_entity_name("export Function renderCart() {", "CART"),
            "renderCart"
        );
    }

    #[test]
    fn test_assignment_rule() {
        assert_eq!(
            extract_entity_name("total_price = compute(cart)", "total"),
            "total_price"
        );
    }

    #[test]
    fn test_falls_through_to_later_rule() {
        // def 규칙은 "helper"를 잡지만 검색어가 없으므로 다음 규칙으로 넘어감
        assert_eq!(
            extract_entity_name("def helper(): cart_total = 1", "cart"),
            "cart_total"
        );
    }

    #[test]
    fn test_only_first_match_per_rule() {
        // `(\w+)\s*\(` 의 첫 매치는 print, 두 번째 매치(compute_total)는 보지 않는다
        assert_eq!(
            extract_entity_name("print(compute_total(cart))", "compute_total"),
            "compute_total"
        );
        assert_eq!(extract_entity_name("print(total(cart))", "tot"), "tot");
    }

    #[test]
    fn test_fallback_to_search_string() {
        assert_eq!(extract_entity_name("// see Widget docs", "Widget"), "Widget");
        assert_eq!(NameRule::Call.capture("no parens here"), None);
    }
}
