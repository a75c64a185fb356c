//! Descriptor shape validation, reproducing the platform's schema validator.

use crate::collection::CollectionDescriptor;
use crate::field::{FieldDescriptor, FieldOptions, FieldType};
use std::collections::BTreeSet;
use thiserror::Error;

/// Descriptor shape rejected; carries every violation found in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid collection descriptor: {}", .issues.join("; "))]
pub struct ValidationError {
    pub issues: Vec<String>,
}

/// Run full descriptor validation in a staged, deterministic order.
pub fn validate_collection(collection: &CollectionDescriptor) -> Result<(), ValidationError> {
    // Phase 1: per-field structural checks.
    let mut issues = Vec::new();
    for field in &collection.schema {
        validate_field(field, &mut issues);
    }

    // Phase 2: collection-wide invariants.
    validate_global(collection, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

fn validate_field(field: &FieldDescriptor, issues: &mut Vec<String>) {
    if field.id.is_empty() {
        issues.push(format!("field {:?} has an empty id", field.name));
    }
    if field.name.is_empty() {
        issues.push(format!("field {:?} has an empty name", field.id));
    }

    match (field.kind, &field.options) {
        (FieldType::Relation, FieldOptions::Relation(options)) => {
            if options.collection_id.is_empty() {
                issues.push(format!("relation field {:?} targets no collection", field.name));
            }
            if options.max_select == Some(0) {
                issues.push(format!(
                    "relation field {:?}: maxSelect must be at least 1",
                    field.name
                ));
            }
            if let (Some(min), Some(max)) = (options.min_select, options.max_select)
                && min > max
            {
                issues.push(format!(
                    "relation field {:?}: minSelect {min} exceeds maxSelect {max}",
                    field.name
                ));
            }
        }
        (FieldType::File, FieldOptions::File(options)) => {
            if options.max_size == 0 {
                issues.push(format!("file field {:?}: maxSize must be positive", field.name));
            }
            if options.max_select == 0 {
                issues.push(format!(
                    "file field {:?}: maxSelect must be at least 1",
                    field.name
                ));
            }
        }
        (FieldType::Relation | FieldType::File, _)
        | (_, FieldOptions::Relation(_) | FieldOptions::File(_)) => {
            issues.push(format!(
                "field {:?}: options do not match its {:?} type tag",
                field.name, field.kind
            ));
        }
        _ => {}
    }
}

fn validate_global(collection: &CollectionDescriptor, issues: &mut Vec<String>) {
    if collection.id.is_empty() {
        issues.push("collection id must not be empty".to_string());
    }
    if collection.name.is_empty() {
        issues.push("collection name must not be empty".to_string());
    }

    let mut ids = BTreeSet::new();
    let mut names = BTreeSet::new();
    for field in &collection.schema {
        if !ids.insert(field.id.as_str()) {
            issues.push(format!("duplicate field id {:?}", field.id));
        }
        if !names.insert(field.name.as_str()) {
            issues.push(format!("duplicate field name {:?}", field.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionType;
    use crate::field::{FileOptions, RelationOptions};
    use std::collections::BTreeMap;

    fn relation_field(id: &str, name: &str) -> FieldDescriptor {
        FieldDescriptor {
            system: false,
            id: id.to_string(),
            name: name.to_string(),
            kind: FieldType::Relation,
            required: true,
            presentable: false,
            unique: false,
            options: FieldOptions::Relation(RelationOptions {
                collection_id: "_pb_users_auth_".to_string(),
                cascade_delete: false,
                min_select: None,
                max_select: Some(1),
                display_fields: None,
            }),
        }
    }

    fn collection_with(schema: Vec<FieldDescriptor>) -> CollectionDescriptor {
        CollectionDescriptor {
            id: "col123".to_string(),
            created: "2024-05-17 20:25:55.414Z".to_string(),
            updated: "2024-05-17 20:25:55.414Z".to_string(),
            name: "things".to_string(),
            kind: CollectionType::Base,
            system: false,
            schema,
            indexes: Vec::new(),
            list_rule: None,
            view_rule: None,
            create_rule: None,
            update_rule: None,
            delete_rule: None,
            options: BTreeMap::new(),
        }
    }

    #[test]
    fn well_formed_collection_passes() {
        validate_collection(&collection_with(vec![relation_field("f1", "owner")])).unwrap();
    }

    #[test]
    fn mismatched_type_tag_and_options_are_rejected() {
        let mut field = relation_field("f1", "owner");
        field.kind = FieldType::File;
        let err = validate_collection(&collection_with(vec![field])).unwrap_err();
        assert!(err.issues[0].contains("do not match"));
    }

    #[test]
    fn duplicate_field_ids_are_rejected() {
        let fields = vec![relation_field("f1", "owner"), relation_field("f1", "editor")];
        let err = validate_collection(&collection_with(fields)).unwrap_err();
        assert!(err.issues.iter().any(|i| i.contains("duplicate field id")));
    }

    #[test]
    fn degenerate_file_limits_are_rejected() {
        let field = FieldDescriptor {
            system: false,
            id: "f2".to_string(),
            name: "media".to_string(),
            kind: FieldType::File,
            required: true,
            presentable: false,
            unique: false,
            options: FieldOptions::File(FileOptions {
                mime_types: Vec::new(),
                thumbs: None,
                max_select: 0,
                max_size: 0,
                protected: false,
            }),
        };
        let err = validate_collection(&collection_with(vec![field])).unwrap_err();
        assert_eq!(err.issues.len(), 2);
    }

    #[test]
    fn empty_collection_name_is_rejected() {
        let mut collection = collection_with(vec![relation_field("f1", "owner")]);
        collection.name.clear();
        let err = validate_collection(&collection).unwrap_err();
        assert!(err.issues.iter().any(|i| i.contains("collection name")));
    }
}
