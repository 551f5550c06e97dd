//! Relationship Builder
//!
//! - 선언 × 사용: 이름이 정확히 같으면 `DeclarationUsage` (Strong)
//! - 이름 변경 × 선언: 이름이 다르면 `Rename` (Medium)
//!
//! 두 번째 규칙은 이름이 다른 모든 쌍을 잇기 때문에 관계가 과하게 만들어진다.
//! 결과 형태를 바꾸지 않기 위해 그대로 둔다.

use super::types::{LineReference, Relationship, RelationshipKind, Strength};

/// 관계 목록 생성 (DeclarationUsage 전부, 그 다음 Rename 전부)
pub fn build_relationships(
    declarations: &[LineReference],
    usages: &[LineReference],
    renames: &[LineReference],
) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for declaration in declarations {
        for usage in usages {
            if declaration.entity_name == usage.entity_name {
                relationships.push(Relationship {
                    kind: RelationshipKind::DeclarationUsage,
                    from: declaration.clone(),
                    to: usage.clone(),
                    strength: Strength::Strong,
                });
            }
        }
    }

    for rename in renames {
        for declaration in declarations {
            if rename.entity_name != declaration.entity_name {
                relationships.push(Relationship {
                    kind: RelationshipKind::Rename,
                    from: declaration.clone(),
                    to: rename.clone(),
                    strength: Strength::Medium,
                });
            }
        }
    }

    relationships
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::ReferenceKind;

    fn reference(kind: ReferenceKind, name: &str, line: usize) -> LineReference {
        LineReference {
            line_number: line,
            raw_line: format!("{} line", name),
            file_path: "a.py".into(),
            kind,
            entity_name: name.into(),
        }
    }

    #[test]
    fn test_declaration_usage_cross_product() {
        let declarations = vec![
            reference(ReferenceKind::Declaration, "total", 1),
            reference(ReferenceKind::Declaration, "total", 2),
        ];
        let usages = vec![
            reference(ReferenceKind::Usage, "total", 10),
            reference(ReferenceKind::Usage, "total", 11),
            reference(ReferenceKind::Usage, "total", 12),
            reference(ReferenceKind::Usage, "Total", 13),
        ];

        let relationships = build_relationships(&declarations, &usages, &[]);
        // 이름 비교는 대소문자를 구분한다
        assert_eq!(relationships.len(), 6);
        assert!(relationships
            .iter()
            .all(|r| r.kind == RelationshipKind::DeclarationUsage && r.strength == Strength::Strong));
        assert_eq!(relationships[0].from.line_number, 1);
        assert_eq!(relationships[0].to.line_number, 10);
        assert_eq!(relationships[3].from.line_number, 2);
    }

    #[test]
    fn test_rename_pairs_with_different_names() {
        let declarations = vec![
            reference(ReferenceKind::Declaration, "total", 1),
            reference(ReferenceKind::Declaration, "subtotal", 2),
        ];
        let usages = vec![reference(ReferenceKind::Usage, "total", 5)];
        let renames = vec![
            reference(ReferenceKind::Rename, "total", 7),
            reference(ReferenceKind::Rename, "grand_total", 8),
        ];

        let relationships = build_relationships(&declarations, &usages, &renames);
        let kinds: Vec<RelationshipKind> = relationships.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RelationshipKind::DeclarationUsage,
                RelationshipKind::Rename,
                RelationshipKind::Rename,
                RelationshipKind::Rename,
            ]
        );

        let renames: Vec<(usize, usize)> = relationships[1..]
            .iter()
            .map(|r| (r.from.line_number, r.to.line_number))
            .collect();
        // 이름 변경 순서가 바깥 루프
        assert_eq!(renames, vec![(2, 7), (1, 8), (2, 8)]);
        assert!(relationships[1..].iter().all(|r| r.strength == Strength::Medium));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(build_relationships(&[], &[], &[]).is_empty());
    }
}
