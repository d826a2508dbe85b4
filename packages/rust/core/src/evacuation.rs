//! Evacuation plan figures derived from an enriched Echo Base document.

use echobase_shared::{EchoBaseError, Record, Result};
use serde_json::Value;

use crate::documents::{int_at, record_at};

pub(crate) const PERSONNEL: &str = "/garrison/personnel";
pub(crate) const TRANSPORT_COUNT: &str = "/starship_assets/transports/0/num_available";
pub(crate) const TRANSPORT_PASSENGERS: &str = "/starship_assets/transports/0/type/passengers";

/// Capacity figures written onto `evacuation_plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvacuationFigures {
    /// Everyone stationed at the base.
    pub max_base_personnel: i64,
    /// Transports on hand.
    pub max_available_transports: i64,
    /// Passengers a single overloaded lift can carry.
    pub max_passenger_overload_capacity: i64,
}

impl EvacuationFigures {
    /// Compute the figures from `echo_base`.
    ///
    /// Expects the transport type to be normalized already, so that
    /// `passengers` is an integer.
    pub fn compute(echo_base: &Value, overload_multiplier: i64) -> Result<Self> {
        let personnel = record_at(echo_base, PERSONNEL)?;
        let max_base_personnel = personnel
            .iter()
            .try_fold(0_i64, |total, (role, count)| {
                let count = count.as_i64().ok_or_else(|| {
                    EchoBaseError::document(format!(
                        "{PERSONNEL}/{role} is not an integer: {count}"
                    ))
                })?;
                total
                    .checked_add(count)
                    .ok_or_else(|| EchoBaseError::validation("personnel total overflows"))
            })?;

        let max_available_transports = int_at(echo_base, TRANSPORT_COUNT)?;
        let passengers = int_at(echo_base, TRANSPORT_PASSENGERS)?;

        let max_passenger_overload_capacity = max_available_transports
            .checked_mul(passengers)
            .and_then(|n| n.checked_mul(overload_multiplier))
            .ok_or_else(|| EchoBaseError::validation("overload capacity overflows"))?;

        Ok(Self {
            max_base_personnel,
            max_available_transports,
            max_passenger_overload_capacity,
        })
    }

    /// Write the three figures onto `plan`, replacing earlier values.
    pub fn apply_to(&self, plan: &mut Record) {
        plan.insert("max_base_personnel".into(), self.max_base_personnel.into());
        plan.insert(
            "max_available_transports".into(),
            self.max_available_transports.into(),
        );
        plan.insert(
            "max_passenger_overload_capacity".into(),
            self.max_passenger_overload_capacity.into(),
        );
    }
}
