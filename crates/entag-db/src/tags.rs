//! Tag repository implementation.
//!
//! `PgTagRepository` reconciles an entity's comma-separated tag attribute
//! against the `tag` registry and the `entity_tag` join table, keeping the
//! per-tag `frequency` counter equal to the number of live associations.
//!
//! Additions and removals each run in one transaction; a failure rolls the
//! whole phase back and surfaces as an error to the caller.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use entag_core::{
    diff_tag_strings, slugify, validate_tag_name, EntityTag, Error, RequestContext, Result, Tag,
    TagDelta, TagRepository,
};

/// PostgreSQL implementation of TagRepository.
pub struct PgTagRepository {
    pool: Pool<Postgres>,
}

impl PgTagRepository {
    /// Create a new PgTagRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn tag_from_row(row: &PgRow) -> Tag {
        Tag {
            id: row.get("id"),
            tenant_id: row.get("tenant_id"),
            name: row.get("name"),
            alias: row.get("alias"),
            frequency: row.get("frequency"),
            created_by: row.get("created_by"),
            created_at: row.get("created_at"),
            updated_by: row.get("updated_by"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn reconcile(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        entity_kind: &str,
        old_tags: &str,
        new_tags: &str,
    ) -> Result<TagDelta> {
        let delta = diff_tag_strings(old_tags, new_tags);
        if delta.is_empty() {
            return Ok(delta);
        }

        // Add before remove, matching the attribute's save ordering. The
        // two phases are separate transactions: a remove failure leaves the
        // additions committed, which the caller learns from the error.
        self.add_tags(ctx, entity_id, entity_kind, &delta.added)
            .await?;
        self.remove_tags(ctx, entity_id, entity_kind, &delta.removed)
            .await?;

        debug!(
            subsystem = "db",
            component = "tags",
            op = "reconcile",
            %entity_id,
            entity_kind,
            added = delta.added.len(),
            removed = delta.removed.len(),
            "Reconciled entity tags"
        );
        Ok(delta)
    }

    async fn add_tags(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        entity_kind: &str,
        names: &[String],
    ) -> Result<usize> {
        // Validate all tag names first
        for name in names {
            validate_tag_name(name).map_err(Error::InvalidInput)?;
        }
        if names.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let mut created = 0usize;

        for name in names {
            let name = name.trim();

            // Upsert on (tenant_id, name): lazy creation closes the
            // concurrent check-then-insert race. Frequency starts at 0 and
            // is bumped below only if a link row actually appears.
            let tag_id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO tag (
                    id, tenant_id, name, alias, frequency,
                    created_by, created_at, updated_by, updated_at
                )
                VALUES ($1, $2, $3, $4, 0, $5, $6, $5, $6)
                ON CONFLICT (tenant_id, name)
                DO UPDATE SET updated_by = EXCLUDED.updated_by,
                              updated_at = EXCLUDED.updated_at
                RETURNING id
                "#,
            )
            .bind(Uuid::now_v7())
            .bind(ctx.tenant_id)
            .bind(name)
            .bind(slugify(name))
            .bind(ctx.user_id)
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?;

            // Link tag to entity; repeated adds are idempotent.
            let inserted = sqlx::query(
                "INSERT INTO entity_tag (entity_id, entity_kind, tag_id) VALUES ($1, $2, $3)
                 ON CONFLICT (entity_id, entity_kind, tag_id) DO NOTHING",
            )
            .bind(entity_id)
            .bind(entity_kind)
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?
            .rows_affected();

            // Frequency tracks the link count exactly, so only a real
            // insert increments it.
            if inserted > 0 {
                sqlx::query("UPDATE tag SET frequency = frequency + 1 WHERE id = $1")
                    .bind(tag_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(Error::Database)?;
                created += 1;
            }
        }

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "tags",
            op = "add_tags",
            %entity_id,
            entity_kind,
            requested = names.len(),
            created,
            "Added entity tag associations"
        );
        Ok(created)
    }

    async fn remove_tags(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        entity_kind: &str,
        names: &[String],
    ) -> Result<usize> {
        if names.is_empty() {
            return Ok(0);
        }
        let names: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let tag_ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM tag WHERE tenant_id = $1 AND name = ANY($2)")
                .bind(ctx.tenant_id)
                .bind(&names)
                .fetch_all(&mut *tx)
                .await
                .map_err(Error::Database)?;

        // Unknown names resolve to nothing: strict no-op. Deleting the
        // entity's links without a tag restriction here would drop
        // associations the caller never asked to remove.
        if tag_ids.is_empty() {
            tx.rollback().await.map_err(Error::Database)?;
            debug!(
                subsystem = "db",
                component = "tags",
                op = "remove_tags",
                %entity_id,
                entity_kind,
                requested = names.len(),
                "No tag names resolved; nothing removed"
            );
            return Ok(0);
        }

        let unlinked: Vec<Uuid> = sqlx::query_scalar(
            "DELETE FROM entity_tag
             WHERE entity_id = $1 AND entity_kind = $2 AND tag_id = ANY($3)
             RETURNING tag_id",
        )
        .bind(entity_id)
        .bind(entity_kind)
        .bind(&tag_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if !unlinked.is_empty() {
            sqlx::query(
                "UPDATE tag
                 SET frequency = frequency - 1, updated_by = $1, updated_at = $2
                 WHERE id = ANY($3)",
            )
            .bind(ctx.user_id)
            .bind(now)
            .bind(&unlinked)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

            // Garbage-collect unused tags, scoped to the tenant.
            sqlx::query("DELETE FROM tag WHERE tenant_id = $1 AND frequency <= 0")
                .bind(ctx.tenant_id)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
        }

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "tags",
            op = "remove_tags",
            %entity_id,
            entity_kind,
            requested = names.len(),
            removed = unlinked.len(),
            "Removed entity tag associations"
        );
        Ok(unlinked.len())
    }

    async fn entities_for_tag(&self, ctx: &RequestContext, name: &str) -> Result<Vec<EntityTag>> {
        let rows = sqlx::query(
            r#"
            SELECT et.entity_id, et.entity_kind, et.tag_id
            FROM entity_tag et
            JOIN tag t ON t.id = et.tag_id
            WHERE t.tenant_id = $1 AND t.name = $2
            ORDER BY et.entity_kind, et.entity_id
            "#,
        )
        .bind(ctx.tenant_id)
        .bind(name.trim())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .iter()
            .map(|row| EntityTag {
                entity_id: row.get("entity_id"),
                entity_kind: row.get("entity_kind"),
                tag_id: row.get("tag_id"),
            })
            .collect())
    }

    async fn tags_for_entity(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        entity_kind: &str,
    ) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.tenant_id, t.name, t.alias, t.frequency,
                   t.created_by, t.created_at, t.updated_by, t.updated_at
            FROM tag t
            JOIN entity_tag et ON et.tag_id = t.id
            WHERE t.tenant_id = $1 AND et.entity_id = $2 AND et.entity_kind = $3
            ORDER BY t.name
            "#,
        )
        .bind(ctx.tenant_id)
        .bind(entity_id)
        .bind(entity_kind)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(Self::tag_from_row).collect())
    }

    async fn list(&self, ctx: &RequestContext) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"
            SELECT id, tenant_id, name, alias, frequency,
                   created_by, created_at, updated_by, updated_at
            FROM tag
            WHERE tenant_id = $1
            ORDER BY name
            "#,
        )
        .bind(ctx.tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(Self::tag_from_row).collect())
    }
}
