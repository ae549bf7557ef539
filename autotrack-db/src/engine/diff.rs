use std::collections::HashMap;

use crate::models::entity::EntityModel;
use crate::models::fields::FieldValue;
use crate::models::relation::RelationTarget;

use super::state::{EntityState, PendingChange};

/// One field-level difference, before relationship resolution rewrites the
/// new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub name: &'static str,
    pub old: String,
    pub new: String,
    pub relation: Option<RelationTarget>,
}

/// Compute the field-level diff of one pending change.
///
/// New values come from the outgoing entity. Old values come from the
/// database snapshot for Modified entities and are empty otherwise, so every
/// field of an Added or Deleted entity is reported against `""` — a row per
/// non-empty field, all carrying the entity's change type verbatim.
///
/// A field is emitted iff old and new differ by string comparison; an
/// identical re-save therefore yields no changes at all. Timestamps never
/// appear here: the descriptor tables do not list them.
pub fn field_changes(change: &PendingChange, snapshot: Option<&EntityModel>) -> Vec<FieldChange> {
    if change.state == EntityState::Unchanged {
        return Vec::new();
    }

    let old_values: HashMap<&'static str, String> = match (change.state, snapshot) {
        (EntityState::Modified, Some(before)) => before
            .field_values()
            .into_iter()
            .map(|FieldValue { name, value, .. }| (name, value))
            .collect(),
        _ => HashMap::new(),
    };

    change
        .entity
        .field_values()
        .into_iter()
        .filter_map(|field| {
            let old = old_values.get(field.name).cloned().unwrap_or_default();
            if old == field.value {
                None
            } else {
                Some(FieldChange {
                    name: field.name,
                    old,
                    new: field.value,
                    relation: field.relation,
                })
            }
        })
        .collect()
}
