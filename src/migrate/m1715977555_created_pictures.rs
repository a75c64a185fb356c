use super::Migration;
use crate::error::MigrateError;
use crate::store::SchemaDao;
use async_trait::async_trait;
use capella_schema::{
    CollectionDescriptor, CollectionType, FieldDescriptor, FieldOptions, FieldType, FileOptions,
    RelationOptions,
};
use std::collections::BTreeMap;

/// Creates the `pictures` collection: an owner relation and the media file.
/// All five access rules start closed.
pub(super) struct CreatedPictures;

#[async_trait]
impl Migration for CreatedPictures {
    fn key(&self) -> &'static str {
        "1715977555_created_pictures"
    }

    async fn up(&self, dao: &SchemaDao) -> Result<(), MigrateError> {
        let collection = CollectionDescriptor {
            id: "ibh0o9bqtysuny9".to_string(),
            created: "2024-05-17 20:25:55.414Z".to_string(),
            updated: "2024-05-17 20:25:55.414Z".to_string(),
            name: "pictures".to_string(),
            kind: CollectionType::Base,
            system: false,
            schema: vec![
                FieldDescriptor {
                    system: false,
                    id: "qnzfxoqe".to_string(),
                    name: "field".to_string(),
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
                },
                FieldDescriptor {
                    system: false,
                    id: "mrxqxprt".to_string(),
                    name: "field2".to_string(),
                    kind: FieldType::File,
                    required: true,
                    presentable: false,
                    unique: false,
                    options: FieldOptions::File(FileOptions {
                        mime_types: vec![
                            "image/png".to_string(),
                            "image/vnd.mozilla.apng".to_string(),
                            "image/jpeg".to_string(),
                            "image/gif".to_string(),
                            "audio/mp4".to_string(),
                            "image/webp".to_string(),
                            "video/webm".to_string(),
                        ],
                        thumbs: Some(Vec::new()),
                        max_select: 1,
                        max_size: 5_242_880,
                        protected: false,
                    }),
                },
            ],
            indexes: Vec::new(),
            list_rule: None,
            view_rule: None,
            create_rule: None,
            update_rule: None,
            delete_rule: None,
            options: BTreeMap::new(),
        };

        dao.save_collection(&collection).await
    }

    async fn down(&self, dao: &SchemaDao) -> Result<(), MigrateError> {
        let collection = dao.find_collection_by_name_or_id("ibh0o9bqtysuny9").await?;
        dao.delete_collection(&collection.id).await
    }
}
