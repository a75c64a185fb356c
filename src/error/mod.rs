mod capella;
mod client;
mod migrate;
mod router;

pub use capella::CapellaError;
pub use client::ClientError;
pub use migrate::MigrateError;
pub use router::RouterError;
