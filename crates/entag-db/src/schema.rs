//! Schema bootstrap for the tag tables.
//!
//! Embedding applications usually own their migrations; this module exists
//! for those that don't, and for the test fixtures, which apply the DDL
//! into an isolated per-test schema. Every statement is idempotent.

use sqlx::PgPool;

use entag_core::{Error, Result};

/// DDL for the tag registry and the entity-tag join table, one discrete
/// statement per entry.
///
/// Two uniqueness constraints carry the data invariants:
/// - `(tenant_id, name)` closes the check-then-insert race that could
///   otherwise mint duplicate tags under concurrent adds.
/// - `(entity_id, entity_kind, tag_id)` makes repeated adds idempotent and
///   keeps `frequency` equal to the true association count.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS tag (
        id          UUID PRIMARY KEY,
        tenant_id   UUID NOT NULL,
        name        TEXT NOT NULL,
        alias       TEXT NOT NULL,
        frequency   BIGINT NOT NULL DEFAULT 0,
        created_by  UUID NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL,
        updated_by  UUID NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL,
        UNIQUE (tenant_id, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS entity_tag (
        entity_id   UUID NOT NULL,
        entity_kind TEXT NOT NULL,
        tag_id      UUID NOT NULL REFERENCES tag(id) ON DELETE CASCADE,
        UNIQUE (entity_id, entity_kind, tag_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_entity_tag_entity ON entity_tag (entity_id, entity_kind)",
    "CREATE INDEX IF NOT EXISTS idx_entity_tag_tag ON entity_tag (tag_id)",
];

/// Apply the tag schema to the connected database.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }
    Ok(())
}
