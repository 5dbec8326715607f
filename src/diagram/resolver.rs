// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Functions for resolving configured entities to values, against the host's
//! state-store snapshot.
//!
//! Everything here is a pure lookup: absent entities, unavailable states and
//! unparseable values all resolve to `None`, never to an error.

use crate::diagram::individual::{DownstreamValue, SecondaryValue};
use crate::state_traits::{Entity, EntityStore};

/// State values the host uses for entities that currently have no reading.
const UNAVAILABLE_STATES: [&str; 2] = ["unavailable", "unknown"];

/// Returns the entity's raw state, if the entity exists and has a usable one.
pub(crate) fn generic_state<S: EntityStore>(store: &S, entity_id: &str) -> Option<String> {
    let state = store.entity(entity_id)?.state()?;
    if state.is_empty() || UNAVAILABLE_STATES.contains(&state) {
        return None;
    }
    Some(state.to_owned())
}

/// Resolves a power reading in watts for the given entity.
///
/// Prefers the power value declared by the entity's integration; falls back
/// to parsing the raw state. Returns `None` when neither yields a finite
/// number.
pub(crate) fn power_state<S: EntityStore>(store: &S, entity_id: &str) -> Option<f64> {
    let entity = store.entity(entity_id)?;

    if let Some(watts) = entity.power() {
        if watts.is_finite() {
            return Some(watts);
        }
    }

    generic_state(store, entity_id)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Resolves a downstream device's state.
///
/// A numeric power reading is preferred; a non-numeric state is carried
/// through as text so the device still displays.
pub(crate) fn downstream_state<S: EntityStore>(
    store: &S,
    entity_id: &str,
) -> Option<DownstreamValue> {
    if let Some(watts) = power_state(store, entity_id) {
        return Some(DownstreamValue::Power(watts));
    }
    generic_state(store, entity_id).map(DownstreamValue::Text)
}

/// Resolves a secondary metric from its entity.
///
/// Secondary metrics are not necessarily power values, so numeric states are
/// kept as plain numbers and anything else as text.
pub(crate) fn secondary_state<S: EntityStore>(
    store: &S,
    entity_id: &str,
) -> Option<SecondaryValue> {
    let raw = generic_state(store, entity_id)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(SecondaryValue::Numeric(value)),
        _ => Some(SecondaryValue::Text(raw)),
    }
}
