//! Field-name to coercion-rule table.

use std::collections::HashMap;

use echobase_shared::EntityKind;

const FLOAT_FIELDS: &[&str] = &["gravity", "length", "width", "hyperdrive_rating"];

const INT_FIELDS: &[&str] = &[
    "rotation_period",
    "orbital_period",
    "diameter",
    "surface_water",
    "population",
    "height",
    "mass",
    "average_height",
    "average_lifespan",
    "max_atmosphering_speed",
    "MGLT",
    "crew",
    "passengers",
    "cargo_capacity",
];

const LIST_FIELDS: &[&str] = &[
    "hair_color",
    "skin_color",
    "hair_colors",
    "skin_colors",
    "eye_colors",
    "climate",
    "terrain",
];

/// How many referenced records a reference field resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// The field holds one locator and becomes one record.
    Single,
    /// The field holds a list of locators; only the first is resolved and the
    /// result is a one-element list.
    FirstOfMany,
}

/// Target of a nested-reference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRule {
    pub kind: EntityKind,
    pub cardinality: Cardinality,
}

/// The rule applied to a field's raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionPolicy {
    /// Leading whitespace-delimited token parsed as a float.
    Float,
    /// Whole string parsed as an integer.
    Int,
    /// String split on `", "`.
    List,
    /// Locator(s) fetched, projected and normalized.
    Reference(ReferenceRule),
    Passthrough,
}

/// Immutable mapping from field name to [`CoercionPolicy`].
///
/// Fields without an entry are [`CoercionPolicy::Passthrough`].
#[derive(Debug, Clone, Default)]
pub struct CoercionTable {
    policies: HashMap<String, CoercionPolicy>,
}

impl CoercionTable {
    /// A table with no entries: every field passes through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalog's standard table.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for field in FLOAT_FIELDS {
            table = table.with(*field, CoercionPolicy::Float);
        }
        for field in INT_FIELDS {
            table = table.with(*field, CoercionPolicy::Int);
        }
        for field in LIST_FIELDS {
            table = table.with(*field, CoercionPolicy::List);
        }
        table
            .with(
                "homeworld",
                CoercionPolicy::Reference(ReferenceRule {
                    kind: EntityKind::Planet,
                    cardinality: Cardinality::Single,
                }),
            )
            .with(
                "species",
                CoercionPolicy::Reference(ReferenceRule {
                    kind: EntityKind::Species,
                    cardinality: Cardinality::FirstOfMany,
                }),
            )
    }

    /// Return a copy with `field` mapped to `policy`.
    pub fn with(mut self, field: impl Into<String>, policy: CoercionPolicy) -> Self {
        self.policies.insert(field.into(), policy);
        self
    }

    /// The policy for `field`.
    pub fn policy_for(&self, field: &str) -> CoercionPolicy {
        self.policies
            .get(field)
            .copied()
            .unwrap_or(CoercionPolicy::Passthrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_dispatch() {
        let table = CoercionTable::standard();
        assert_eq!(table.policy_for("gravity"), CoercionPolicy::Float);
        assert_eq!(table.policy_for("MGLT"), CoercionPolicy::Int);
        assert_eq!(table.policy_for("population"), CoercionPolicy::Int);
        assert_eq!(table.policy_for("terrain"), CoercionPolicy::List);
        assert_eq!(table.policy_for("name"), CoercionPolicy::Passthrough);
        assert_eq!(table.policy_for("birth_year"), CoercionPolicy::Passthrough);
    }

    #[test]
    fn reference_fields() {
        let table = CoercionTable::standard();
        assert_eq!(
            table.policy_for("homeworld"),
            CoercionPolicy::Reference(ReferenceRule {
                kind: EntityKind::Planet,
                cardinality: Cardinality::Single,
            })
        );
        assert!(matches!(
            table.policy_for("species"),
            CoercionPolicy::Reference(ReferenceRule {
                kind: EntityKind::Species,
                cardinality: Cardinality::FirstOfMany,
            })
        ));
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let table = CoercionTable::standard();
        assert_eq!(table.policy_for("mglt"), CoercionPolicy::Passthrough);
    }

    #[test]
    fn overrides_do_not_touch_the_original() {
        let standard = CoercionTable::standard();
        let custom = standard.clone().with("population", CoercionPolicy::Passthrough);
        assert_eq!(custom.policy_for("population"), CoercionPolicy::Passthrough);
        assert_eq!(standard.policy_for("population"), CoercionPolicy::Int);
        assert_eq!(CoercionTable::empty().policy_for("gravity"), CoercionPolicy::Passthrough);
    }
}
