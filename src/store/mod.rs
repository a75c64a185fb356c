//! Schema store: sqlite-backed collection registry and migration applied-log.
//!
//! Layout:
//! - `models.rs`: row structs mirroring `_collections`
//! - `schema.rs`: SQL DDL for initializing the store (SQLite-first)
//! - `dao.rs`: the async handle migrations run against

pub mod dao;
pub mod models;
pub mod schema;

pub use dao::{SchemaDao, USERS_COLLECTION_ID};
pub use schema::SQLITE_INIT;
