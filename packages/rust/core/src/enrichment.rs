//! Echo Base enrichment.
//!
//! Seed entries in the Echo Base document are merged with catalog search
//! results, projected and normalized, then the evacuation plan is filled in.
//! Every catalog request is awaited before the next one is issued.

use echobase_catalog::CatalogClient;
use echobase_normalize::{Normalizer, assign_roles, combine};
use echobase_shared::{EchoBaseError, EntityKind, Record, Result};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::documents::{record_at, replace_at};
use crate::evacuation::EvacuationFigures;
use crate::pipeline::ProgressReporter;

const BASE_PLANET: &str = "/location/planet";
const COMMANDER: &str = "/garrison/commander";
const OUTRIDER_PILOT: &str = "/visiting_starships/freighters/1/pilot";
const SNOWSPEEDER: &str = "/vehicle_assets/snowspeeders/0/type";
const STARFIGHTER: &str = "/starship_assets/starfighters/0/type";
const TRANSPORT: &str = "/starship_assets/transports/0/type";
const FALCON: &str = "/visiting_starships/freighters/0";
const EVACUATION_PLAN: &str = "/evacuation_plan";

/// Seed entries replaced by `combine(seed, search result)`.
const OVERRIDES: &[(&str, EntityKind, &str)] = &[
    (BASE_PLANET, EntityKind::BasePlanet, "hoth"),
    (SNOWSPEEDER, EntityKind::Vehicle, "snowspeeder"),
    (STARFIGHTER, EntityKind::Starship, "T-65"),
    (TRANSPORT, EntityKind::Starship, "GR-75"),
];

const FALCON_CREW: &[(&str, &str)] = &[("pilot", "han solo"), ("copilot", "Chewbacca")];

const TRANSPORT_NAME: &str = "Bright Hope";
const PASSENGER_MANIFEST: &[&str] = &["leia", "c-3po"];
const ESCORT_CREWS: &[&[(&str, &str)]] = &[
    &[("pilot", "luke skywalker"), ("astromech_droid", "r2-d2")],
    &[("pilot", "wedge antilles"), ("astromech_droid", "r5-d4")],
];

/// Fills in an Echo Base document from the catalog.
pub struct EchoBaseEnricher<'a> {
    catalog: &'a CatalogClient,
    normalizer: Normalizer<'a, CatalogClient>,
    overload_multiplier: i64,
}

impl<'a> EchoBaseEnricher<'a> {
    pub fn new(catalog: &'a CatalogClient, max_reference_depth: usize, overload_multiplier: i64) -> Self {
        Self {
            catalog,
            normalizer: Normalizer::new(catalog).with_max_depth(max_reference_depth),
            overload_multiplier,
        }
    }

    /// Search for `term`, project the match onto `kind` and normalize it.
    pub async fn lookup(&self, kind: EntityKind, term: &str) -> Result<Record> {
        let found = self.catalog.search(kind, term).await?;
        self.normalizer.project_and_normalize(kind, &found).await
    }

    /// Merge the first search match for `term` over `seed`, then project and normalize.
    pub async fn override_seed(&self, kind: EntityKind, seed: Record, term: &str) -> Result<Record> {
        let found = self.catalog.search(kind, term).await?;
        let merged = combine(seed, found);
        self.normalizer.project_and_normalize(kind, &merged).await
    }

    async fn crew(&self, roles: &[(&str, &str)]) -> Result<Vec<(String, Record)>> {
        let mut crew = Vec::with_capacity(roles.len());
        for (role, term) in roles {
            let person = self.lookup(EntityKind::Person, term).await?;
            crew.push((role.to_string(), person));
        }
        Ok(crew)
    }

    /// Enrich `echo_base` in place of the seed values it carries.
    #[instrument(skip_all)]
    pub async fn enrich(&self, mut echo_base: Value, progress: &dyn ProgressReporter) -> Result<Value> {
        progress.phase("Enriching Echo Base");
        let total = OVERRIDES.len() + 4;
        let mut step = 0;
        let mut ready = |label: &str| {
            step += 1;
            progress.record_ready(label, step, total);
        };

        let (pointer, kind, term) = OVERRIDES[0];
        let planet = self
            .override_seed(kind, record_at(&echo_base, pointer)?, term)
            .await?;
        replace_at(&mut echo_base, pointer, Value::Object(planet))?;
        ready(pointer);

        for pointer in [COMMANDER, OUTRIDER_PILOT] {
            let person = self.normalizer.normalize(&record_at(&echo_base, pointer)?).await?;
            replace_at(&mut echo_base, pointer, Value::Object(person))?;
            ready(pointer);
        }

        for &(pointer, kind, term) in &OVERRIDES[1..] {
            let record = self
                .override_seed(kind, record_at(&echo_base, pointer)?, term)
                .await?;
            debug!(pointer, %kind, term, "replaced seed");
            replace_at(&mut echo_base, pointer, Value::Object(record))?;
            ready(pointer);
        }

        let falcon = self
            .override_seed(EntityKind::Starship, record_at(&echo_base, FALCON)?, "millennium")
            .await?;
        let falcon = assign_roles(falcon, self.crew(FALCON_CREW).await?);
        replace_at(&mut echo_base, FALCON, Value::Object(falcon))?;
        ready(FALCON);

        progress.phase("Planning evacuation");
        let figures = EvacuationFigures::compute(&echo_base, self.overload_multiplier)?;
        let assignment = self.bright_hope(&echo_base).await?;

        let mut plan = record_at(&echo_base, EVACUATION_PLAN)?;
        figures.apply_to(&mut plan);
        match plan.get_mut("transport_assignments") {
            Some(Value::Array(assignments)) => assignments.push(Value::Object(assignment)),
            _ => {
                return Err(EchoBaseError::document(format!(
                    "{EVACUATION_PLAN}/transport_assignments is not an array"
                )));
            }
        }
        replace_at(&mut echo_base, EVACUATION_PLAN, Value::Object(plan))?;
        ready(EVACUATION_PLAN);

        info!(
            max_base_personnel = figures.max_base_personnel,
            max_available_transports = figures.max_available_transports,
            max_passenger_overload_capacity = figures.max_passenger_overload_capacity,
            "Echo Base enriched"
        );
        Ok(echo_base)
    }

    /// The transport assignment: a renamed GR-75 carrying its passengers,
    /// escorted by crewed X-wings.
    async fn bright_hope(&self, echo_base: &Value) -> Result<Record> {
        let mut transport = record_at(echo_base, TRANSPORT)?;
        transport.insert("name".into(), Value::String(TRANSPORT_NAME.into()));

        let mut passengers = Vec::with_capacity(PASSENGER_MANIFEST.len());
        for term in PASSENGER_MANIFEST {
            passengers.push(Value::Object(self.lookup(EntityKind::Person, term).await?));
        }
        transport.insert("passenger_manifest".into(), Value::Array(passengers));

        let x_wing = record_at(echo_base, STARFIGHTER)?;
        let mut escorts = Vec::with_capacity(ESCORT_CREWS.len());
        for roles in ESCORT_CREWS {
            let escort = assign_roles(x_wing.clone(), self.crew(roles).await?);
            escorts.push(Value::Object(escort));
        }
        transport.insert("escorts".into(), Value::Array(escorts));

        Ok(transport)
    }
}
