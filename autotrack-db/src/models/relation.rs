use uuid::Uuid;

/// Entity type owning a relationship field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationTarget {
    Customer,
    Contact,
}

impl RelationTarget {
    pub fn type_name(&self) -> &'static str {
        match self {
            RelationTarget::Customer => "Customer",
            RelationTarget::Contact => "Contact",
        }
    }
}

/// The closed map of relationship field names to the entity type whose
/// display name they resolve to. Extending the engine to a new relationship
/// means adding an entry here and a lookup clause in the backing store.
pub const RELATION_FIELDS: &[(&str, RelationTarget)] = &[
    ("CustomerId", RelationTarget::Customer),
    ("ContactId", RelationTarget::Contact),
];

/// Look up the resolver target for a field name, if it is a relationship
/// field.
pub fn relation_target(field_name: &str) -> Option<RelationTarget> {
    RELATION_FIELDS
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, target)| *target)
}

/// Rewritten audit value for a resolved relationship field:
/// `"<DisplayName> (<rawId>)"`.
pub fn resolved_value(display_name: &str, raw_id: &str) -> String {
    format!("{display_name} ({raw_id})")
}

/// Parse the raw audit value of a relationship field back into an entity id.
pub fn parse_relation_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
