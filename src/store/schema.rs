//! SQL DDL for initializing the schema store.
//! SQLite-first design, mirroring the hosted platform's own layout.

/// SQLite schema includes:
/// - `_collections` table (one row per collection descriptor; rule columns
///   keep the platform's camelCase names, `schema`/`indexes`/`options` are
///   JSON text)
/// - `_migrations` table (applied-log for the sequential runner)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Collection descriptors
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS _collections (
    id TEXT PRIMARY KEY NOT NULL,
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    name TEXT UNIQUE NOT NULL,
    type TEXT NOT NULL DEFAULT 'base',
    system BOOLEAN NOT NULL DEFAULT FALSE,
    schema JSON NOT NULL DEFAULT '[]',
    indexes JSON NOT NULL DEFAULT '[]',
    listRule TEXT NULL,
    viewRule TEXT NULL,
    createRule TEXT NULL,
    updateRule TEXT NULL,
    deleteRule TEXT NULL,
    options JSON NOT NULL DEFAULT '{}'
);

-- ---------------------------------------------------------------------------
-- Applied-log for the migration runner (one row per applied migration)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS _migrations (
    file TEXT PRIMARY KEY NOT NULL,
    applied INTEGER NOT NULL
);
"#;
