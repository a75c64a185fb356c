use super::client::ClientError;
use super::migrate::MigrateError;
use super::router::RouterError;
use thiserror::Error as ThisError;

/// Top-level error the binary reports; one variant per subsystem.
#[derive(Debug, ThisError)]
pub enum CapellaError {
    #[error(transparent)]
    Migrate(#[from] MigrateError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Router(#[from] RouterError),
}
