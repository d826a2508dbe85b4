//! Key filter sets: the ordered field schemas records are projected onto.

use std::collections::HashMap;

use echobase_shared::{EntityKind, Record};

// ---------------------------------------------------------------------------
// Standard field lists
// ---------------------------------------------------------------------------

pub const PERSON_KEYS: &[&str] = &[
    "url",
    "name",
    "height",
    "mass",
    "hair_color",
    "skin_color",
    "eye_color",
    "birth_year",
    "gender",
    "homeworld",
    "species",
];

pub const PLANET_KEYS: &[&str] = &[
    "url",
    "name",
    "rotation_period",
    "orbital_period",
    "diameter",
    "climate",
    "gravity",
    "terrain",
    "surface_water",
    "population",
];

pub const STARSHIP_KEYS: &[&str] = &[
    "url",
    "starship_class",
    "name",
    "model",
    "manufacturer",
    "length",
    "width",
    "max_atmosphering_speed",
    "hyperdrive_rating",
    "MGLT",
    "crew",
    "passengers",
    "cargo_capacity",
    "consumables",
    "armament",
];

pub const SPECIES_KEYS: &[&str] = &[
    "url",
    "name",
    "classification",
    "designation",
    "average_height",
    "skin_colors",
    "hair_colors",
    "eye_colors",
    "average_lifespan",
    "language",
];

pub const VEHICLE_KEYS: &[&str] = &[
    "url",
    "vehicle_class",
    "name",
    "model",
    "manufacturer",
    "length",
    "max_atmosphering_speed",
    "crew",
    "passengers",
    "cargo_capacity",
    "consumables",
    "armament",
];

// ---------------------------------------------------------------------------
// KeyFilterSet
// ---------------------------------------------------------------------------

/// An ordered, immutable list of permitted field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFilterSet {
    fields: Vec<String>,
}

impl KeyFilterSet {
    /// Build a filter set from field names, keeping the first occurrence of duplicates.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !unique.contains(&field) {
                unique.push(field);
            }
        }
        Self { fields: unique }
    }

    /// The standard filter set for an entity kind.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Person => Self::new(PERSON_KEYS.iter().copied()),
            EntityKind::Planet => Self::new(PLANET_KEYS.iter().copied()),
            EntityKind::Starship => Self::new(STARSHIP_KEYS.iter().copied()),
            EntityKind::Species => Self::new(SPECIES_KEYS.iter().copied()),
            EntityKind::Vehicle => Self::new(VEHICLE_KEYS.iter().copied()),
            EntityKind::BasePlanet => Self::for_kind(EntityKind::Planet)
                .extended_after("name", ["system_position", "natural_satellites"])
                .extended(["indigenous_life_forms"]),
        }
    }

    /// Field names in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// A new set with `extra` appended at the end. Fields already present are skipped.
    pub fn extended<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            self.fields
                .iter()
                .cloned()
                .chain(extra.into_iter().map(Into::into)),
        )
    }

    /// A new set with `extra` inserted right after `anchor`.
    ///
    /// Appends at the end when `anchor` is not part of the set.
    pub fn extended_after<I, S>(&self, anchor: &str, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(pos) = self.fields.iter().position(|f| f == anchor) else {
            return self.extended(extra);
        };

        let extra: Vec<String> = extra
            .into_iter()
            .map(Into::into)
            .filter(|f| !self.contains(f))
            .collect();

        let mut fields = self.fields[..=pos].to_vec();
        fields.extend(extra);
        fields.extend_from_slice(&self.fields[pos + 1..]);
        Self { fields }
    }

    /// Reduce `record` to the fields of this set, in this set's order.
    ///
    /// Fields the record lacks are omitted rather than filled in; fields
    /// outside the set are dropped.
    pub fn project(&self, record: &Record) -> Record {
        let mut projected = Record::new();
        for field in &self.fields {
            if let Some(value) = record.get(field) {
                projected.insert(field.clone(), value.clone());
            }
        }
        projected
    }
}

// ---------------------------------------------------------------------------
// SchemaSet
// ---------------------------------------------------------------------------

/// Filter sets keyed by entity kind, passed explicitly to the normalizer.
#[derive(Debug, Clone)]
pub struct SchemaSet {
    sets: HashMap<EntityKind, KeyFilterSet>,
}

impl SchemaSet {
    /// The standard set for every [`EntityKind`].
    pub fn standard() -> Self {
        let sets = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, KeyFilterSet::for_kind(kind)))
            .collect();
        Self { sets }
    }

    /// Return a copy with `kind` mapped to `set`.
    pub fn with(mut self, kind: EntityKind, set: KeyFilterSet) -> Self {
        self.sets.insert(kind, set);
        self
    }

    pub fn get(&self, kind: EntityKind) -> &KeyFilterSet {
        // Every kind is populated by `standard()` and `with` never removes.
        &self.sets[&kind]
    }

    /// Project `record` onto the filter set for `kind`.
    pub fn project(&self, kind: EntityKind, record: &Record) -> Record {
        self.get(kind).project(record)
    }
}

impl Default for SchemaSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn keys(record: &Record) -> Vec<&str> {
        record.keys().map(String::as_str).collect()
    }

    #[test]
    fn projection_follows_filter_order() {
        let raw = record(json!({
            "population": "200000",
            "films": ["https://swapi.dev/api/films/1/"],
            "name": "Tatooine",
            "climate": "arid",
            "url": "https://swapi.dev/api/planets/1/",
        }));

        let projected = KeyFilterSet::for_kind(EntityKind::Planet).project(&raw);
        assert_eq!(keys(&projected), vec!["url", "name", "climate", "population"]);
        assert!(!projected.contains_key("films"));
    }

    #[test]
    fn projection_never_adds_missing_fields() {
        let raw = record(json!({ "name": "Hoth" }));
        let projected = KeyFilterSet::for_kind(EntityKind::BasePlanet).project(&raw);
        assert_eq!(keys(&projected), vec!["name"]);
        assert_eq!(projected["name"], json!("Hoth"));
    }

    #[test]
    fn projection_of_empty_record_is_empty() {
        let projected = KeyFilterSet::for_kind(EntityKind::Person).project(&Record::new());
        assert!(projected.is_empty());
    }

    #[test]
    fn projection_keeps_values_untouched() {
        let raw = record(json!({ "name": "X-wing", "crew": "1", "pilots": [] }));
        let projected = KeyFilterSet::for_kind(EntityKind::Starship).project(&raw);
        assert_eq!(projected["crew"], json!("1"));
    }

    #[test]
    fn base_planet_composes_planet_set() {
        let base = KeyFilterSet::for_kind(EntityKind::BasePlanet);
        let expected = vec![
            "url",
            "name",
            "system_position",
            "natural_satellites",
            "rotation_period",
            "orbital_period",
            "diameter",
            "climate",
            "gravity",
            "terrain",
            "surface_water",
            "population",
            "indigenous_life_forms",
        ];
        let actual: Vec<&str> = base.fields().iter().map(String::as_str).collect();
        assert_eq!(actual, expected);

        // The planet set itself is untouched.
        assert_eq!(KeyFilterSet::for_kind(EntityKind::Planet).len(), PLANET_KEYS.len());
    }

    #[test]
    fn extended_after_unknown_anchor_appends() {
        let set = KeyFilterSet::new(["a", "b"]).extended_after("zzz", ["c"]);
        assert_eq!(set.fields(), &["a".to_string(), "b".into(), "c".into()]);
    }

    #[test]
    fn duplicate_fields_are_collapsed() {
        let set = KeyFilterSet::new(["name", "url", "name"]).extended(["url", "mass"]);
        let actual: Vec<&str> = set.fields().iter().map(String::as_str).collect();
        assert_eq!(actual, vec!["name", "url", "mass"]);
    }

    #[test]
    fn schema_set_override() {
        let custom = KeyFilterSet::new(["name"]);
        let schemas = SchemaSet::standard().with(EntityKind::Species, custom.clone());
        assert_eq!(schemas.get(EntityKind::Species), &custom);
        assert_eq!(
            schemas.get(EntityKind::Vehicle),
            &KeyFilterSet::for_kind(EntityKind::Vehicle)
        );
    }
}
