//! Database schema for the credential store

use rusqlite::Connection;

/// SQL schema for the credential database
pub const SCHEMA_SQL: &str = r#"
-- One row per stored credential
CREATE TABLE IF NOT EXISTS credentials (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Creates the schema if it does not exist yet
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
