use crate::field::FieldDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One named data collection, in the exact shape the backend platform
/// persists it.
///
/// Nullable rule keys are always written out (`null`, never omitted), and
/// `created`/`updated` stay in the platform's own string format, so a stored
/// descriptor round-trips byte-for-byte.
///
/// The `id` is immutable once the collection exists; later migrations locate
/// the collection through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDescriptor {
    pub id: String,
    pub created: String,
    pub updated: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CollectionType,
    pub system: bool,
    pub schema: Vec<FieldDescriptor>,
    pub indexes: Vec<String>,
    /// `None` forbids the operation outright; `Some("")` admits any
    /// authenticated request; any other string is a filter expression the
    /// platform evaluates per request.
    pub list_rule: Option<String>,
    pub view_rule: Option<String>,
    pub create_rule: Option<String>,
    pub update_rule: Option<String>,
    pub delete_rule: Option<String>,
    pub options: BTreeMap<String, Value>,
}

/// Collection kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    Base,
    Auth,
    View,
}

impl CollectionType {
    /// Wire tag, identical to the serde rename.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Auth => "auth",
            Self::View => "view",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldOptions, FieldType, FileOptions, RelationOptions};

    /// The persisted JSON of the `pictures` collection exactly as the
    /// platform wrote it out.
    const PICTURES_JSON: &str = r#"{
        "id": "ibh0o9bqtysuny9",
        "created": "2024-05-17 20:25:55.414Z",
        "updated": "2024-05-17 20:25:55.414Z",
        "name": "pictures",
        "type": "base",
        "system": false,
        "schema": [
            {
                "system": false,
                "id": "qnzfxoqe",
                "name": "field",
                "type": "relation",
                "required": true,
                "presentable": false,
                "unique": false,
                "options": {
                    "collectionId": "_pb_users_auth_",
                    "cascadeDelete": false,
                    "minSelect": null,
                    "maxSelect": 1,
                    "displayFields": null
                }
            },
            {
                "system": false,
                "id": "mrxqxprt",
                "name": "field2",
                "type": "file",
                "required": true,
                "presentable": false,
                "unique": false,
                "options": {
                    "mimeTypes": [
                        "image/png",
                        "image/vnd.mozilla.apng",
                        "image/jpeg",
                        "image/gif",
                        "audio/mp4",
                        "image/webp",
                        "video/webm"
                    ],
                    "thumbs": [],
                    "maxSelect": 1,
                    "maxSize": 5242880,
                    "protected": false
                }
            }
        ],
        "indexes": [],
        "listRule": null,
        "viewRule": null,
        "createRule": null,
        "updateRule": null,
        "deleteRule": null,
        "options": {}
    }"#;

    #[test]
    fn platform_json_deserializes_into_typed_descriptor() {
        let collection: CollectionDescriptor = serde_json::from_str(PICTURES_JSON).unwrap();

        assert_eq!(collection.id, "ibh0o9bqtysuny9");
        assert_eq!(collection.kind, CollectionType::Base);
        assert_eq!(collection.schema.len(), 2);
        assert_eq!(collection.list_rule, None);

        let relation = &collection.schema[0];
        assert_eq!(relation.kind, FieldType::Relation);
        assert_eq!(
            relation.options,
            FieldOptions::Relation(RelationOptions {
                collection_id: "_pb_users_auth_".to_string(),
                cascade_delete: false,
                min_select: None,
                max_select: Some(1),
                display_fields: None,
            })
        );

        let file = &collection.schema[1];
        assert_eq!(file.kind, FieldType::File);
        match &file.options {
            FieldOptions::File(FileOptions {
                mime_types,
                max_size,
                ..
            }) => {
                assert_eq!(mime_types.len(), 7);
                assert_eq!(*max_size, 5_242_880);
            }
            other => panic!("expected file options, got {other:?}"),
        }
    }

    #[test]
    fn serialization_preserves_platform_key_names_and_nulls() {
        let collection: CollectionDescriptor = serde_json::from_str(PICTURES_JSON).unwrap();
        let value = serde_json::to_value(&collection).unwrap();

        // Rule keys are camelCase and present even when null.
        let object = value.as_object().unwrap();
        for key in ["listRule", "viewRule", "createRule", "updateRule", "deleteRule"] {
            assert!(object.contains_key(key), "missing {key}");
            assert!(object[key].is_null(), "{key} should be null");
        }
        assert_eq!(value["type"], "base");
        assert_eq!(value["schema"][0]["options"]["collectionId"], "_pb_users_auth_");
        assert!(value["schema"][0]["options"]["minSelect"].is_null());
        assert_eq!(value["schema"][1]["options"]["maxSize"], 5_242_880);

        // Full round-trip is lossless.
        let reparsed: CollectionDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(reparsed, collection);
    }
}
