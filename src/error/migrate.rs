use capella_schema::ValidationError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MigrateError {
    /// A referenced collection does not exist at `up`/`down` time. Fatal to
    /// the migration sequence; surfaced verbatim to the operator.
    #[error("collection not found: {key}")]
    CollectionNotFound { key: String },

    /// Descriptor shape rejected by the schema validator.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Misordered or duplicated registry keys; a configuration error, fatal
    /// at startup.
    #[error("migration registry error: {0}")]
    Registry(String),
}
