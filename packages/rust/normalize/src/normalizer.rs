//! Type normalizer: applies the coercion table to every field of a record and
//! resolves reference fields into nested normalized records.

use echobase_shared::{EchoBaseError, EntityKind, Record, Result};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::coerce::{self, Coercion, LIST_DELIMITER};
use crate::fetch::{self, Fetch};
use crate::policy::{Cardinality, CoercionPolicy, CoercionTable, ReferenceRule};
use crate::schema::SchemaSet;
use crate::sentinel::is_unknown;

/// Nested records may sit this many reference hops below the top-level record.
pub const DEFAULT_MAX_REFERENCE_DEPTH: usize = 1;

/// Where the normalizer currently is in the reference graph.
#[derive(Debug, Default)]
struct Resolution {
    /// Hops from the top-level record.
    depth: usize,
    /// Locators of the records on the current branch, outermost first.
    chain: Vec<String>,
}

/// Normalizes records against an explicit coercion table and schema set,
/// fetching referenced records through `F`.
///
/// References are resolved one at a time, depth-first, in field order.
pub struct Normalizer<'a, F> {
    fetcher: &'a F,
    policies: CoercionTable,
    schemas: SchemaSet,
    max_depth: usize,
}

impl<'a, F: Fetch> Normalizer<'a, F> {
    /// A normalizer using the standard coercion table and schemas.
    pub fn new(fetcher: &'a F) -> Self {
        Self {
            fetcher,
            policies: CoercionTable::standard(),
            schemas: SchemaSet::standard(),
            max_depth: DEFAULT_MAX_REFERENCE_DEPTH,
        }
    }

    pub fn with_policies(mut self, policies: CoercionTable) -> Self {
        self.policies = policies;
        self
    }

    pub fn with_schemas(mut self, schemas: SchemaSet) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Apply the non-resolving part of the field procedure to one value.
    ///
    /// Sentinels become `null`; numeric and list rules are attempted.
    /// Reference and passthrough fields come back [`Coercion::Unchanged`].
    pub fn coerce_field(&self, field: &str, value: &Value) -> Coercion {
        if is_unknown(value) {
            return Coercion::Converted(Value::Null);
        }

        match self.policies.policy_for(field) {
            CoercionPolicy::Float => coerce::to_float(value),
            CoercionPolicy::Int => coerce::to_int(value),
            CoercionPolicy::List => coerce::to_list(value, LIST_DELIMITER),
            CoercionPolicy::Reference(_) | CoercionPolicy::Passthrough => {
                Coercion::Unchanged(value.clone())
            }
        }
    }

    /// Normalize every field of `record`.
    ///
    /// The output has exactly the input's fields in the input's order.
    #[instrument(skip_all, fields(field_count = record.len()))]
    pub async fn normalize(&self, record: &Record) -> Result<Record> {
        let mut resolution = Resolution::default();
        if let Some(Value::String(url)) = record.get("url") {
            resolution.chain.push(url.clone());
        }
        self.normalize_within(record, &mut resolution).await
    }

    /// Project `record` onto the schema for `kind`, then normalize it.
    pub async fn project_and_normalize(&self, kind: EntityKind, record: &Record) -> Result<Record> {
        let projected = self.schemas.project(kind, record);
        debug!(%kind, kept = projected.len(), dropped = record.len() - projected.len(), "projected record");
        self.normalize(&projected).await
    }

    async fn normalize_within(&self, record: &Record, resolution: &mut Resolution) -> Result<Record> {
        let mut normalized = Record::new();

        for (field, value) in record {
            let out = match self.policies.policy_for(field) {
                CoercionPolicy::Reference(rule) if !is_unknown(value) => {
                    self.resolve_field(field, value, rule, resolution).await?
                }
                _ => self.coerce_field(field, value).into_value(),
            };
            normalized.insert(field.clone(), out);
        }

        Ok(normalized)
    }

    /// Resolve a reference field according to its cardinality.
    ///
    /// Values that are not locators (already-resolved records, null) pass through.
    async fn resolve_field(
        &self,
        field: &str,
        value: &Value,
        rule: ReferenceRule,
        resolution: &mut Resolution,
    ) -> Result<Value> {
        match (rule.cardinality, value) {
            (Cardinality::Single, Value::String(locator)) => {
                let record = self.resolve_locator(field, locator, rule.kind, resolution).await?;
                Ok(Value::Object(record))
            }
            (Cardinality::FirstOfMany, Value::Array(items)) => match items.first() {
                Some(Value::String(locator)) => {
                    let record = self.resolve_locator(field, locator, rule.kind, resolution).await?;
                    Ok(Value::Array(vec![Value::Object(record)]))
                }
                _ => Ok(value.clone()),
            },
            (Cardinality::FirstOfMany, Value::String(locator)) => {
                let record = self.resolve_locator(field, locator, rule.kind, resolution).await?;
                Ok(Value::Array(vec![Value::Object(record)]))
            }
            _ => Ok(value.clone()),
        }
    }

    async fn resolve_locator(
        &self,
        field: &str,
        locator: &str,
        kind: EntityKind,
        resolution: &mut Resolution,
    ) -> Result<Record> {
        let depth = resolution.depth + 1;
        if depth > self.max_depth {
            return Err(EchoBaseError::ReferenceDepth {
                field: field.to_string(),
                locator: locator.to_string(),
                depth,
                max: self.max_depth,
            });
        }
        if resolution.chain.iter().any(|seen| seen == locator) {
            let mut path = resolution.chain.clone();
            path.push(locator.to_string());
            return Err(EchoBaseError::ReferenceCycle {
                locator: locator.to_string(),
                path,
            });
        }

        debug!(field, locator, %kind, depth, "resolving reference");
        let raw = fetch::fetch_record(self.fetcher, locator).await?;
        let projected = self.schemas.project(kind, &raw);

        resolution.depth = depth;
        resolution.chain.push(locator.to_string());
        let nested = Box::pin(self.normalize_within(&projected, resolution)).await;
        resolution.chain.pop();
        resolution.depth = depth - 1;

        nested
    }
}
