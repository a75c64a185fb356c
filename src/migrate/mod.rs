//! Ordered, reversible schema migrations and their sequential runner.
//!
//! One migration per file, named after its order key. `up` must be exactly
//! reversed by the paired `down`, so applying one then the other restores
//! the persisted descriptor field-for-field.

mod m1715977555_created_pictures;
mod m1715980319_updated_pictures;

pub mod runner;

pub use runner::{MigrationStatus, Runner};

use crate::error::MigrateError;
use crate::store::SchemaDao;
use async_trait::async_trait;

/// One reversible schema change, keyed for strict ordering.
#[async_trait]
pub trait Migration: Send + Sync {
    /// Order key: `<unix-timestamp>_<label>`. Unique and strictly ascending
    /// across the registry.
    fn key(&self) -> &'static str;

    /// Apply the change. Runs exactly once; the runner records it in the
    /// applied-log afterwards.
    async fn up(&self, dao: &SchemaDao) -> Result<(), MigrateError>;

    /// Exactly reverse the paired `up`.
    async fn down(&self, dao: &SchemaDao) -> Result<(), MigrateError>;
}

/// All known migrations in ascending key order.
pub fn registry() -> Vec<Box<dyn Migration>> {
    vec![
        Box::new(m1715977555_created_pictures::CreatedPictures),
        Box::new(m1715980319_updated_pictures::UpdatedPictures),
    ]
}
