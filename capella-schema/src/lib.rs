pub mod collection;
pub mod field;
pub mod validate;

pub use collection::{CollectionDescriptor, CollectionType};
pub use field::{
    FieldDescriptor, FieldOptions, FieldType, FileOptions, RelationOptions, UploadError,
};
pub use validate::{ValidationError, validate_collection};
