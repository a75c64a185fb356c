use super::Migration;
use crate::error::MigrateError;
use crate::store::SchemaDao;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::info;

/// Per-migration applied state, for startup reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub key: String,
    pub applied_at: Option<DateTime<Utc>>,
}

/// Sequential migration executor with a persisted applied-log.
///
/// Migrations run strictly one at a time in ascending key order. The first
/// failure halts the sequence (fail-fast); the failed step is not recorded
/// and nothing is rolled back automatically.
pub struct Runner<'a> {
    dao: &'a SchemaDao,
    migrations: Vec<Box<dyn Migration>>,
}

impl std::fmt::Debug for Runner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field(
                "migrations",
                &self.migrations.iter().map(|m| m.key()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<'a> Runner<'a> {
    /// Build a runner over the given registry, rejecting misordered or
    /// duplicate keys up front.
    pub fn new(
        dao: &'a SchemaDao,
        migrations: Vec<Box<dyn Migration>>,
    ) -> Result<Self, MigrateError> {
        for pair in migrations.windows(2) {
            let (a, b) = (pair[0].key(), pair[1].key());
            if a >= b {
                return Err(MigrateError::Registry(format!(
                    "migration keys must be unique and strictly ascending: {a:?} precedes {b:?}"
                )));
            }
        }
        Ok(Self { dao, migrations })
    }

    /// Apply every pending migration in order. Returns how many ran.
    ///
    /// Already-applied entries are skipped, so re-running is idempotent.
    pub async fn up(&self) -> Result<usize, MigrateError> {
        let applied: BTreeSet<String> = self.dao.applied_keys().await?.into_iter().collect();

        let mut ran = 0;
        for migration in &self.migrations {
            let key = migration.key();
            if applied.contains(key) {
                continue;
            }
            migration.up(self.dao).await?;
            self.dao.mark_applied(key).await?;
            info!(migration = key, "applied");
            ran += 1;
        }
        Ok(ran)
    }

    /// Revert the most recently applied `steps` migrations, newest first.
    /// Returns how many were reverted (fewer than `steps` when the log is
    /// shorter).
    pub async fn down(&self, steps: usize) -> Result<usize, MigrateError> {
        let applied: BTreeSet<String> = self.dao.applied_keys().await?.into_iter().collect();

        let mut reverted = 0;
        for migration in self.migrations.iter().rev() {
            if reverted == steps {
                break;
            }
            let key = migration.key();
            if !applied.contains(key) {
                continue;
            }
            migration.down(self.dao).await?;
            self.dao.unmark_applied(key).await?;
            info!(migration = key, "reverted");
            reverted += 1;
        }
        Ok(reverted)
    }

    /// Applied state of every registered migration, in registry order.
    pub async fn status(&self) -> Result<Vec<MigrationStatus>, MigrateError> {
        let log = self.dao.applied_log().await?;

        Ok(self
            .migrations
            .iter()
            .map(|migration| {
                let applied_at = log
                    .iter()
                    .find(|(key, _)| key == migration.key())
                    .and_then(|(_, millis)| DateTime::from_timestamp_millis(*millis));
                MigrationStatus {
                    key: migration.key().to_string(),
                    applied_at,
                }
            })
            .collect())
    }
}
