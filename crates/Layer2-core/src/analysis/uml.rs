//! UML Projector - 선언과 관계를 다이어그램 데이터로 변환

use super::types::{LineReference, Relationship, UmlData, UmlEntity, UmlKind, UmlRelationship};

/// 선언 라인의 UML 종류
pub fn uml_kind(raw_line: &str) -> UmlKind {
    let lowered = raw_line.to_lowercase();
    if lowered.contains("class") {
        UmlKind::Class
    } else if lowered.contains("def") || lowered.contains("function") {
        UmlKind::Method
    } else {
        UmlKind::Property
    }
}

pub fn build_uml(declarations: &[LineReference], relationships: &[Relationship]) -> UmlData {
    let mut data = UmlData::default();

    for declaration in declarations {
        let entity = UmlEntity {
            name: declaration.entity_name.clone(),
            file: declaration.file_path.clone(),
            line: declaration.line_number,
            kind: uml_kind(&declaration.raw_line),
        };
        match entity.kind {
            UmlKind::Class => data.classes.push(entity),
            UmlKind::Method => data.methods.push(entity),
            UmlKind::Property => data.properties.push(entity),
        }
    }

    data.relationships = relationships
        .iter()
        .map(|r| UmlRelationship {
            from: r.from.entity_name.clone(),
            to: r.to.entity_name.clone(),
            kind: r.kind,
            strength: r.strength,
        })
        .collect();

    data
}
