//! Reference Analysis 타입 정의

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 라인 참조 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// 선언 (def, class, let ...)
    Declaration,
    /// 이름 변경/대입 (=, ->, as ...)
    Rename,
    /// 가져오기 (import, require ...)
    Import,
    /// 그 외 사용
    Usage,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Declaration => "declaration",
            ReferenceKind::Rename => "rename",
            ReferenceKind::Import => "import",
            ReferenceKind::Usage => "usage",
        }
    }
}

/// 검색어가 등장한 한 줄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReference {
    /// 1부터 시작
    pub line_number: usize,
    /// 원본 라인 (trim 하지 않음)
    pub raw_line: String,
    pub file_path: String,
    pub kind: ReferenceKind,
    /// 라인이 가리킨다고 추정되는 식별자 (없으면 검색어)
    pub entity_name: String,
}

/// 파일 단위 분석 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub file_path: String,
    pub has_references: bool,
    pub line_count: usize,
    pub references: Vec<LineReference>,
    pub declarations: Vec<LineReference>,
    pub renames: Vec<LineReference>,
    pub imports: Vec<LineReference>,
    pub usages: Vec<LineReference>,
}

impl FileAnalysis {
    /// 참조가 없는 빈 결과
    pub fn empty(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Default::default()
        }
    }

    /// 종류별 버킷에 추가
    pub fn push(&mut self, reference: LineReference) {
        match reference.kind {
            ReferenceKind::Declaration => self.declarations.push(reference.clone()),
            ReferenceKind::Rename => self.renames.push(reference.clone()),
            ReferenceKind::Import => self.imports.push(reference.clone()),
            ReferenceKind::Usage => self.usages.push(reference.clone()),
        }
        self.references.push(reference);
        self.has_references = true;
    }
}

/// 관계 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    DeclarationUsage,
    Rename,
}

/// 관계 신뢰도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Medium,
}

/// 두 라인 참조 사이의 관계
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub from: LineReference,
    pub to: LineReference,
    pub strength: Strength,
}

/// UML 엔티티 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UmlKind {
    Class,
    Method,
    Property,
}

/// UML 엔티티 (선언 1개당 1개)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlEntity {
    pub name: String,
    pub file: String,
    pub line: usize,
    pub kind: UmlKind,
}

/// UML 관계 (엔티티 이름만 복사)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlRelationship {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub strength: Strength,
}

/// UML 다이어그램 데이터
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlData {
    pub classes: Vec<UmlEntity>,
    pub methods: Vec<UmlEntity>,
    pub properties: Vec<UmlEntity>,
    pub relationships: Vec<UmlRelationship>,
}

/// 저장소 전체 분석 결과
///
/// 시각 정보를 담지 않으므로 같은 입력이면 직렬화 결과도 같다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub search_string: String,
    pub repository: String,
    /// 분석을 요청한 화면에서 보고 있던 파일 (참고용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_file_path: Option<String>,
    pub references: Vec<LineReference>,
    pub declarations: Vec<LineReference>,
    pub renames: Vec<LineReference>,
    pub imports: Vec<LineReference>,
    pub usages: Vec<LineReference>,
    pub relationships: Vec<Relationship>,
    /// 참조가 있는 파일만, 경로 순
    pub file_analysis: BTreeMap<String, FileAnalysis>,
    pub uml_data: UmlData,
}

impl AnalysisResult {
    pub fn new(
        repository: impl Into<String>,
        search_string: impl Into<String>,
        original_file_path: Option<String>,
    ) -> Self {
        Self {
            search_string: search_string.into(),
            repository: repository.into(),
            original_file_path,
            references: Vec::new(),
            declarations: Vec::new(),
            renames: Vec::new(),
            imports: Vec::new(),
            usages: Vec::new(),
            relationships: Vec::new(),
            file_analysis: BTreeMap::new(),
            uml_data: UmlData::default(),
        }
    }

    /// 파일 결과를 집계에 반영 (참조가 없는 파일은 무시)
    pub fn absorb(&mut self, analysis: FileAnalysis) {
        if !analysis.has_references {
            return;
        }
        self.references.extend(analysis.references.iter().cloned());
        self.declarations.extend(analysis.declarations.iter().cloned());
        self.renames.extend(analysis.renames.iter().cloned());
        self.imports.extend(analysis.imports.iter().cloned());
        self.usages.extend(analysis.usages.iter().cloned());
        self.file_analysis
            .insert(analysis.file_path.clone(), analysis);
    }

    pub fn files_with_references(&self) -> usize {
        self.file_analysis.len()
    }
}
