pub mod config;
pub mod error;
pub mod migrate;
pub mod router;
pub mod session;
pub mod store;

pub use error::CapellaError;
pub use router::{RouteTable, Router};
pub use session::{BackendClient, Session};
pub use store::SchemaDao;
