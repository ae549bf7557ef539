pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use autotrack_api::ApiResult;
use std::sync::Arc;
use uuid::Uuid;

use crate::engine::state::PendingChange;
use crate::models::audit::AuditModel;
use crate::models::entity::{EntityKind, EntityModel};
use crate::models::relation::RelationTarget;

/// The data-access collaborator consumed by the change interceptor.
///
/// A backend supplies four primitives: a snapshot read (the old-value source
/// for modification diffs), an atomic commit of a pending change set, an
/// append-only audit batch write, and the display-name lookup behind
/// relationship resolution. The interceptor sequences them; it never talks
/// to storage any other way.
#[async_trait]
pub trait ChangeStore: Send + Sync {
    /// Current database state of one entity, or None when the row is absent
    async fn load_snapshot(&self, kind: EntityKind, id: Uuid) -> ApiResult<Option<EntityModel>>;

    /// Apply every pending mutation in one atomic commit.
    ///
    /// A guarded update that matches no row must be reported as NotFound
    /// when the row is absent and ConcurrencyConflict when it still exists.
    async fn commit_changes(&self, changes: &[PendingChange]) -> ApiResult<()>;

    /// Append audit rows in a follow-up commit, after the primary commit
    /// succeeded. Must not touch existing rows.
    async fn append_audits(&self, audits: &[AuditModel]) -> ApiResult<()>;

    /// Display name of the referenced entity for a relationship field, or
    /// None when no matching row exists
    async fn resolve_display_name(&self, target: RelationTarget, id: Uuid)
        -> ApiResult<Option<String>>;
}

#[async_trait]
impl<S: ChangeStore + ?Sized> ChangeStore for Arc<S> {
    async fn load_snapshot(&self, kind: EntityKind, id: Uuid) -> ApiResult<Option<EntityModel>> {
        (**self).load_snapshot(kind, id).await
    }

    async fn commit_changes(&self, changes: &[PendingChange]) -> ApiResult<()> {
        (**self).commit_changes(changes).await
    }

    async fn append_audits(&self, audits: &[AuditModel]) -> ApiResult<()> {
        (**self).append_audits(audits).await
    }

    async fn resolve_display_name(
        &self,
        target: RelationTarget,
        id: Uuid,
    ) -> ApiResult<Option<String>> {
        (**self).resolve_display_name(target, id).await
    }
}
