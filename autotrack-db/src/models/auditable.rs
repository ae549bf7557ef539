use chrono::{DateTime, Utc};

use super::identifiable::Identifiable;

/// Capability marker for entities participating in automatic change tracking.
///
/// Entities opt in by implementing this trait; the change interceptor stamps
/// the two timestamps on save and the diff engine only ever operates behind
/// this surface, never over concrete entity types directly.
pub trait Auditable: Identifiable {
    /// Set exactly once, when the entity is first saved
    fn created_date(&self) -> Option<DateTime<Utc>>;

    fn set_created_date(&mut self, at: DateTime<Utc>);

    /// Refreshed on every Added or Modified save
    fn modified_date(&self) -> Option<DateTime<Utc>>;

    fn set_modified_date(&mut self, at: DateTime<Utc>);

    /// The actor recorded by the caller, not stamped by the interceptor
    fn last_modified_by(&self) -> Option<&str>;

    fn is_inactive(&self) -> bool;
}
