//! Line Classifier - 키워드 기반 라인 분류
//!
//! 구문 분석은 하지 않는다. 소문자로 바꾼 라인에 표식 문자열이 들어있는지만
//! 본다. 표식 그룹은 선언 → 이름 변경 → import 순서로 검사하고, 어느 것도
//! 없으면 사용(usage)이다.

use super::extract::extract_entity_name;
use super::types::{LineReference, ReferenceKind};

const DECLARATION_MARKERS: [&str; 9] = [
    "def ",
    "class ",
    "function ",
    "var ",
    "let ",
    "const ",
    "public ",
    "private ",
    "protected ",
];

const RENAME_MARKERS: [&str; 6] = ["=", ":=", "->", "=>", "as ", "alias "];

const IMPORT_MARKERS: [&str; 4] = ["import ", "from ", "require ", "include "];

/// 라인 분류 (검색어가 없으면 None)
pub fn classify(
    line: &str,
    search_string: &str,
    line_number: usize,
    file_path: &str,
) -> Option<LineReference> {
    let lowered = line.to_lowercase();
    if !lowered.contains(&search_string.to_lowercase()) {
        return None;
    }

    Some(LineReference {
        line_number,
        raw_line: line.to_string(),
        file_path: file_path.to_string(),
        kind: reference_kind(&lowered),
        entity_name: extract_entity_name(line, search_string),
    })
}

/// 소문자 라인의 참조 종류
pub fn reference_kind(lowered: &str) -> ReferenceKind {
    let has_any = |markers: &[&str]| markers.iter().any(|m| lowered.contains(m));

    if has_any(&DECLARATION_MARKERS) {
        ReferenceKind::Declaration
    } else if has_any(&RENAME_MARKERS) {
        ReferenceKind::Rename
    } else if has_any(&IMPORT_MARKERS) {
        ReferenceKind::Import
    } else {
        ReferenceKind::Usage
    }
}
