//! Data model for the tag registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named label scoped to a tenant.
///
/// `frequency` is a denormalized counter equal to the number of
/// [`EntityTag`] rows referencing this tag. A tag whose frequency drops to
/// zero is deleted in the same transaction that decremented it; tags are
/// created lazily on first use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,

    /// Tenant scoping key; (tenant_id, name) is unique.
    pub tenant_id: Uuid,

    /// Display name as entered by the user (whitespace-trimmed).
    pub name: String,

    /// URL-safe kebab-case slug derived from `name`.
    pub alias: String,

    /// Number of active entity associations referencing this tag.
    pub frequency: i64,

    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

/// Join row associating one entity instance with one tag.
///
/// (entity_id, entity_kind, tag_id) is unique; repeated adds of the same
/// tag for the same entity are idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTag {
    /// Owning entity's primary key.
    pub entity_id: Uuid,

    /// Stable string identifying the entity's type (e.g. "note", "post").
    pub entity_kind: String,

    pub tag_id: Uuid,
}

/// The computed difference between an old and a new tag set.
///
/// `added` and `removed` are disjoint by construction, first-occurrence
/// ordered, and internally deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDelta {
    /// Names present in the new set but not the old.
    pub added: Vec<String>,

    /// Names present in the old set but not the new.
    pub removed: Vec<String>,
}

impl TagDelta {
    /// True when reconciling would touch nothing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
