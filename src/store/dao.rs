use crate::error::MigrateError;
use crate::store::models::CollectionRow;
use crate::store::schema::SQLITE_INIT;
use capella_schema::{
    CollectionDescriptor, CollectionType, FieldDescriptor, FieldOptions, FieldType, FileOptions,
    validate_collection,
};
use chrono::Utc;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::collections::BTreeMap;
use std::{str::FromStr, time::Duration};
use tracing::info;

/// Id of the platform's pre-created auth collection. Relation fields in user
/// migrations target it.
pub const USERS_COLLECTION_ID: &str = "_pb_users_auth_";

/// Handle over the platform's schema store. Migrations receive a reference
/// to this and perform all their side effects through it.
pub struct SchemaDao {
    pool: SqlitePool,
}

impl SchemaDao {
    /// Open (creating if missing) the store, apply the DDL and seed the
    /// system `users` collection.
    pub async fn connect(database_url: &str) -> Result<Self, MigrateError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        apply_schema(&pool).await?;

        let dao = Self { pool };
        dao.seed_system_collections().await?;
        info!("schema store initialized");
        Ok(dao)
    }

    /// Look a collection up by id or name (exact match on either).
    pub async fn find_collection_by_name_or_id(
        &self,
        key: &str,
    ) -> Result<CollectionDescriptor, MigrateError> {
        let row = sqlx::query_as::<_, CollectionRow>(
            r#"
        SELECT id, created, updated, name, type, system, schema, indexes,
               listRule, viewRule, createRule, updateRule, deleteRule, options
        FROM _collections
        WHERE id = ? OR name = ?
        "#,
        )
        .bind(key)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.into_descriptor()?),
            None => Err(MigrateError::CollectionNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Validate and persist a descriptor, creating or replacing its row.
    ///
    /// The row is written verbatim, timestamps included: rewriting `updated`
    /// here would break exact restoration by a paired `down` step.
    pub async fn save_collection(
        &self,
        collection: &CollectionDescriptor,
    ) -> Result<(), MigrateError> {
        validate_collection(collection)?;
        let row = CollectionRow::from_descriptor(collection)?;

        sqlx::query(
            r#"
        INSERT INTO _collections (
            id, created, updated, name, type, system, schema, indexes,
            listRule, viewRule, createRule, updateRule, deleteRule, options
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            created=excluded.created,
            updated=excluded.updated,
            name=excluded.name,
            type=excluded.type,
            system=excluded.system,
            schema=excluded.schema,
            indexes=excluded.indexes,
            listRule=excluded.listRule,
            viewRule=excluded.viewRule,
            createRule=excluded.createRule,
            updateRule=excluded.updateRule,
            deleteRule=excluded.deleteRule,
            options=excluded.options
        "#,
        )
        .bind(&row.id)
        .bind(&row.created)
        .bind(&row.updated)
        .bind(&row.name)
        .bind(&row.kind)
        .bind(row.system)
        .bind(&row.schema)
        .bind(&row.indexes)
        .bind(&row.list_rule)
        .bind(&row.view_rule)
        .bind(&row.create_rule)
        .bind(&row.update_rule)
        .bind(&row.delete_rule)
        .bind(&row.options)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a collection by id or name. NotFound when no row matched.
    pub async fn delete_collection(&self, key: &str) -> Result<(), MigrateError> {
        let result = sqlx::query("DELETE FROM _collections WHERE id = ? OR name = ?")
            .bind(key)
            .bind(key)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(MigrateError::CollectionNotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// Order keys of every applied migration, ascending.
    pub async fn applied_keys(&self) -> Result<Vec<String>, MigrateError> {
        let keys = sqlx::query_scalar::<_, String>("SELECT file FROM _migrations ORDER BY file")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    /// Applied-log entries as (key, unix millis applied-at), ascending by key.
    pub async fn applied_log(&self) -> Result<Vec<(String, i64)>, MigrateError> {
        let rows =
            sqlx::query_as::<_, (String, i64)>("SELECT file, applied FROM _migrations ORDER BY file")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// Record a migration as applied.
    pub async fn mark_applied(&self, key: &str) -> Result<(), MigrateError> {
        sqlx::query("INSERT OR REPLACE INTO _migrations (file, applied) VALUES (?, ?)")
            .bind(key)
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove a migration from the applied-log (after its `down` ran).
    pub async fn unmark_applied(&self, key: &str) -> Result<(), MigrateError> {
        sqlx::query("DELETE FROM _migrations WHERE file = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn seed_system_collections(&self) -> Result<(), MigrateError> {
        let existing: Option<String> =
            sqlx::query_scalar("SELECT id FROM _collections WHERE id = ?")
                .bind(USERS_COLLECTION_ID)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Ok(());
        }
        self.save_collection(&system_users_collection()).await
    }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), MigrateError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

/// The platform's default `users` auth collection, present before any user
/// migration runs.
fn system_users_collection() -> CollectionDescriptor {
    CollectionDescriptor {
        id: USERS_COLLECTION_ID.to_string(),
        created: "2024-05-17 20:14:06.548Z".to_string(),
        updated: "2024-05-17 20:14:06.548Z".to_string(),
        name: "users".to_string(),
        kind: CollectionType::Auth,
        system: false,
        schema: vec![
            FieldDescriptor {
                system: false,
                id: "users_name".to_string(),
                name: "name".to_string(),
                kind: FieldType::Text,
                required: false,
                presentable: false,
                unique: false,
                options: FieldOptions::Other(json_object(json!({
                    "min": null,
                    "max": null,
                    "pattern": ""
                }))),
            },
            FieldDescriptor {
                system: false,
                id: "users_avatar".to_string(),
                name: "avatar".to_string(),
                kind: FieldType::File,
                required: false,
                presentable: false,
                unique: false,
                options: FieldOptions::File(FileOptions {
                    mime_types: vec![
                        "image/jpeg".to_string(),
                        "image/png".to_string(),
                        "image/svg+xml".to_string(),
                        "image/gif".to_string(),
                        "image/webp".to_string(),
                    ],
                    thumbs: None,
                    max_select: 1,
                    max_size: 5_242_880,
                    protected: false,
                }),
            },
        ],
        indexes: Vec::new(),
        list_rule: Some("id = @request.auth.id".to_string()),
        view_rule: Some("id = @request.auth.id".to_string()),
        create_rule: Some(String::new()),
        update_rule: Some("id = @request.auth.id".to_string()),
        delete_rule: Some("id = @request.auth.id".to_string()),
        options: json_object(json!({
            "allowEmailAuth": true,
            "allowOAuth2Auth": true,
            "allowUsernameAuth": true,
            "exceptEmailDomains": null,
            "manageRule": null,
            "minPasswordLength": 8,
            "onlyEmailDomains": null,
            "onlyVerified": false,
            "requireEmail": false
        })),
    }
}

fn json_object(value: Value) -> BTreeMap<String, Value> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}
