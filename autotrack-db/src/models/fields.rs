use super::relation::{relation_target, RelationTarget};

/// One entry of a per-entity field-descriptor table: the logical field name
/// carried on audit rows and a getter rendering the field to its string form.
///
/// The tables are `const` data, so the diff engine enumerates fields without
/// any per-entity-type code. Timestamp fields (CreatedDate, ModifiedDate) are
/// deliberately absent from every table: they are stamped by the interceptor,
/// never diffed.
pub struct FieldDescriptor<T> {
    /// Logical field name, e.g. `"AccountNumber"` or `"CustomerId"`
    pub name: &'static str,
    /// Renders the field's current value; absent values render as `""`
    pub get: fn(&T) -> String,
}

/// A rendered field: name, string value and the relationship target when the
/// field is a recognized foreign-key field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub name: &'static str,
    pub value: String,
    pub relation: Option<RelationTarget>,
}

/// Trait for entities whose fields can be enumerated for audit diffing.
pub trait AuditFields {
    /// The runtime type name recorded on audit rows, e.g. `"Customer"`
    fn entity_name(&self) -> &'static str;

    /// Current values of every tracked field, in descriptor-table order
    fn field_values(&self) -> Vec<FieldValue>;
}

/// Walk a descriptor table and render every field of `entity`.
pub fn collect_values<T>(entity: &T, table: &[FieldDescriptor<T>]) -> Vec<FieldValue> {
    table
        .iter()
        .map(|descriptor| FieldValue {
            name: descriptor.name,
            value: (descriptor.get)(entity),
            relation: relation_target(descriptor.name),
        })
        .collect()
}

/// `""` for `None`, the value otherwise.
pub fn render_opt(value: Option<&str>) -> String {
    value.unwrap_or_default().to_owned()
}

/// Booleans render as `""`/`"true"` so that a freshly created entity does not
/// produce an audit row for an unset flag.
pub fn render_bool(value: bool) -> String {
    if value {
        "true".to_owned()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        label: String,
        flag: bool,
    }

    const SAMPLE_FIELDS: &[FieldDescriptor<Sample>] = &[
        FieldDescriptor {
            name: "Label",
            get: |s| s.label.clone(),
        },
        FieldDescriptor {
            name: "Flag",
            get: |s| render_bool(s.flag),
        },
    ];

    #[test]
    fn test_collect_values_follows_table_order() {
        let sample = Sample {
            label: "a".to_owned(),
            flag: true,
        };
        let values = collect_values(&sample, SAMPLE_FIELDS);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].name, "Label");
        assert_eq!(values[0].value, "a");
        assert_eq!(values[1].value, "true");
        assert!(values.iter().all(|v| v.relation.is_none()));
    }

    #[test]
    fn test_render_helpers() {
        assert_eq!(render_opt(None), "");
        assert_eq!(render_opt(Some("x")), "x");
        assert_eq!(render_bool(false), "");
        assert_eq!(render_bool(true), "true");
    }
}
