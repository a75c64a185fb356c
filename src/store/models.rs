use capella_schema::CollectionDescriptor;
use serde_json::Value;
use sqlx::FromRow;

/// Raw `_collections` row. The JSON columns stay serialized until decoded
/// into a [`CollectionDescriptor`].
#[derive(Debug, Clone, FromRow)]
pub struct CollectionRow {
    pub id: String,
    pub created: String,
    pub updated: String,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub system: bool,
    pub schema: String,
    pub indexes: String,
    #[sqlx(rename = "listRule")]
    pub list_rule: Option<String>,
    #[sqlx(rename = "viewRule")]
    pub view_rule: Option<String>,
    #[sqlx(rename = "createRule")]
    pub create_rule: Option<String>,
    #[sqlx(rename = "updateRule")]
    pub update_rule: Option<String>,
    #[sqlx(rename = "deleteRule")]
    pub delete_rule: Option<String>,
    pub options: String,
}

impl CollectionRow {
    pub fn into_descriptor(self) -> Result<CollectionDescriptor, serde_json::Error> {
        Ok(CollectionDescriptor {
            id: self.id,
            created: self.created,
            updated: self.updated,
            name: self.name,
            kind: serde_json::from_value(Value::String(self.kind))?,
            system: self.system,
            schema: serde_json::from_str(&self.schema)?,
            indexes: serde_json::from_str(&self.indexes)?,
            list_rule: self.list_rule,
            view_rule: self.view_rule,
            create_rule: self.create_rule,
            update_rule: self.update_rule,
            delete_rule: self.delete_rule,
            options: serde_json::from_str(&self.options)?,
        })
    }

    pub fn from_descriptor(
        collection: &CollectionDescriptor,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: collection.id.clone(),
            created: collection.created.clone(),
            updated: collection.updated.clone(),
            name: collection.name.clone(),
            kind: collection.kind.as_str().to_string(),
            system: collection.system,
            schema: serde_json::to_string(&collection.schema)?,
            indexes: serde_json::to_string(&collection.indexes)?,
            list_rule: collection.list_rule.clone(),
            view_rule: collection.view_rule.clone(),
            create_rule: collection.create_rule.clone(),
            update_rule: collection.update_rule.clone(),
            delete_rule: collection.delete_rule.clone(),
            options: serde_json::to_string(&collection.options)?,
        })
    }
}
