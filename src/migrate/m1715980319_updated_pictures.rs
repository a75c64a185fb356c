use super::Migration;
use crate::error::MigrateError;
use crate::store::SchemaDao;
use async_trait::async_trait;

/// Opens the `pictures` mutation rules to any authenticated request.
pub(super) struct UpdatedPictures;

#[async_trait]
impl Migration for UpdatedPictures {
    fn key(&self) -> &'static str {
        "1715980319_updated_pictures"
    }

    async fn up(&self, dao: &SchemaDao) -> Result<(), MigrateError> {
        let mut collection = dao.find_collection_by_name_or_id("ibh0o9bqtysuny9").await?;

        collection.create_rule = Some(String::new());
        collection.update_rule = Some(String::new());
        collection.delete_rule = Some(String::new());

        dao.save_collection(&collection).await
    }

    async fn down(&self, dao: &SchemaDao) -> Result<(), MigrateError> {
        let mut collection = dao.find_collection_by_name_or_id("ibh0o9bqtysuny9").await?;

        collection.create_rule = None;
        collection.update_rule = None;
        collection.delete_rule = None;

        dao.save_collection(&collection).await
    }
}
