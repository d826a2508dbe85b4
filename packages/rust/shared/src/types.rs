//! Core domain types shared by the normalizer, the catalog client and the pipeline.

/// An ordered field-to-value mapping for one catalog or seed entity.
///
/// Backed by `serde_json::Map` with `preserve_order`, so iteration follows
/// insertion order.
pub type Record = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The kinds of entity the catalog serves, plus the compound base-planet variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Planet,
    Starship,
    Species,
    Vehicle,
    /// A planet enriched with system position and indigenous life, used for
    /// the planet hosting the base.
    BasePlanet,
}

impl EntityKind {
    /// All kinds, in a stable order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Person,
        EntityKind::Planet,
        EntityKind::Starship,
        EntityKind::Species,
        EntityKind::Vehicle,
        EntityKind::BasePlanet,
    ];

    /// Catalog collection segment for this kind (e.g. `people`).
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Person => "people",
            EntityKind::Planet | EntityKind::BasePlanet => "planets",
            EntityKind::Starship => "starships",
            EntityKind::Species => "species",
            EntityKind::Vehicle => "vehicles",
        }
    }

    /// Short lowercase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Planet => "planet",
            EntityKind::Starship => "starship",
            EntityKind::Species => "species",
            EntityKind::Vehicle => "vehicle",
            EntityKind::BasePlanet => "base-planet",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered || kind.collection() == lowered)
            .ok_or_else(|| format!("unknown entity kind '{s}'"))
    }
}
