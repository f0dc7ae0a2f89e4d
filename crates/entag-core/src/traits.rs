//! Repository trait definitions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::Result;
use crate::models::{EntityTag, Tag, TagDelta};

/// Repository maintaining the tag registry and entity-tag associations.
///
/// All operations are tenant-scoped through the [`RequestContext`] and
/// return explicit results; a storage failure in any operation rolls back
/// that operation's transaction and surfaces as an error.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Reconcile an entity's associations against a changed tag attribute.
    ///
    /// Computes `added = new \ old` and `removed = old \ new`, then applies
    /// additions before removals. Each phase runs in its own transaction;
    /// a failing phase rolls back completely and the error is returned.
    ///
    /// Intended call sites in the owning entity's workflow:
    /// - after save: `reconcile(ctx, id, kind, pre_save_value, current_value)`
    /// - after delete: `reconcile(ctx, id, kind, pre_delete_value, "")`
    async fn reconcile(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        entity_kind: &str,
        old_tags: &str,
        new_tags: &str,
    ) -> Result<TagDelta>;

    /// Associate the named tags with an entity.
    ///
    /// Creates missing tags lazily (frequency starts at the new link) and
    /// increments frequency once per association actually created; adding
    /// a tag an entity already holds is idempotent. Returns the number of
    /// new associations.
    async fn add_tags(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        entity_kind: &str,
        names: &[String],
    ) -> Result<usize>;

    /// Remove the named tag associations from an entity.
    ///
    /// Decrements frequency for each association actually deleted and
    /// garbage-collects tags whose frequency reaches zero, within the
    /// tenant. A strict no-op when `names` is empty or none resolve to
    /// known tags. Returns the number of associations removed.
    async fn remove_tags(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        entity_kind: &str,
        names: &[String],
    ) -> Result<usize>;

    /// Reverse lookup: the join rows for every entity holding the named
    /// tag in the tenant, ordered by kind then id. Empty when the name is
    /// unknown.
    async fn entities_for_tag(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Vec<EntityTag>>;

    /// Tags currently associated with an entity, ordered by name.
    async fn tags_for_entity(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        entity_kind: &str,
    ) -> Result<Vec<Tag>>;

    /// All tags in the tenant, ordered by name.
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<Tag>>;
}
