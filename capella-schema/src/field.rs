use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// One column/property within a collection schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub system: bool,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    /// Required fields must be present on every record of the collection.
    pub required: bool,
    pub presentable: bool,
    pub unique: bool,
    pub options: FieldOptions,
}

/// Field type tags understood by the platform's schema validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Editor,
    Number,
    Bool,
    Email,
    Url,
    Date,
    Select,
    File,
    Relation,
    Json,
}

/// Type-specific field options. The sibling `type` tag determines which
/// variant is valid; `validate_collection` enforces the pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOptions {
    Relation(RelationOptions),
    File(FileOptions),
    /// Options of field types this crate has no dedicated model for,
    /// preserved verbatim.
    Other(BTreeMap<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RelationOptions {
    pub collection_id: String,
    pub cascade_delete: bool,
    pub min_select: Option<u32>,
    pub max_select: Option<u32>,
    pub display_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileOptions {
    pub mime_types: Vec<String>,
    pub thumbs: Option<Vec<String>>,
    pub max_select: u32,
    pub max_size: u64,
    pub protected: bool,
}

impl FileOptions {
    /// Reproduce the platform's upload gate for this field: the content type
    /// must be one of `mimeTypes` (an empty list admits any type) and the
    /// size must not exceed `maxSize`.
    pub fn check_upload(&self, content_type: &str, size: u64) -> Result<(), UploadError> {
        if !self.mime_types.is_empty() && !self.mime_types.iter().any(|m| m == content_type) {
            return Err(UploadError::UnsupportedType {
                content_type: content_type.to_string(),
            });
        }
        if size > self.max_size {
            return Err(UploadError::TooLarge {
                size,
                max_size: self.max_size,
            });
        }
        Ok(())
    }
}

/// Rejection reasons for a submitted file, per a file field's options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("content type {content_type:?} is not allowed")]
    UnsupportedType { content_type: String },

    #[error("file of {size} bytes exceeds the {max_size} byte limit")]
    TooLarge { size: u64, max_size: u64 },
}
