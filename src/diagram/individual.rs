// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The normalized per-field individual record and its builder.
//!
//! One [`IndividualObject`] is built per configured individual field on every
//! snapshot. Unconfigured or unresolvable fields become the fallback record,
//! so later stages only ever check `has` and never deal with missing records.

use crate::config::{
    ColorConfig, DownstreamConfig, IndividualFieldConfig, SecondaryInfoConfig, TapAction,
};
use crate::diagram::resolver;
use crate::state_traits::{Entity, EntityStore};

/// Icon used when neither the configuration nor the entity declares one.
pub(crate) const DEFAULT_ICON: &str = "mdi:flash";

/// Display name used when neither the configuration nor the entity has one.
const DEFAULT_NAME: &str = "Individual";

/// A downstream device's resolved state.
#[derive(Clone, Debug, PartialEq)]
pub enum DownstreamValue {
    /// A numeric power reading in watts. Drives flow lines and dots.
    Power(f64),
    /// A non-numeric state, displayed but never animated.
    Text(String),
}

/// One resolved downstream device, chained beneath an individual.
#[derive(Clone, Debug, PartialEq)]
pub struct DownstreamDevice {
    pub entity: String,
    pub name: String,
    pub state: Option<DownstreamValue>,
    pub unit: Option<String>,
    pub unit_white_space: bool,
    pub decimals: Option<u8>,
    pub icon: Option<String>,
}

impl DownstreamDevice {
    /// The power this device contributes to line and dot decisions.
    ///
    /// Textual and absent states carry no flow.
    pub fn power(&self) -> f64 {
        match self.state {
            Some(DownstreamValue::Power(watts)) => watts,
            Some(DownstreamValue::Text(_)) | None => 0.0,
        }
    }
}

/// A secondary metric's resolved value.
#[derive(Clone, Debug, PartialEq)]
pub enum SecondaryValue {
    Numeric(f64),
    Text(String),
}

/// The resolved secondary metric of an individual.
#[derive(Clone, Debug, PartialEq)]
pub struct SecondaryObject {
    pub entity: Option<String>,
    pub template: Option<String>,
    pub has: bool,
    pub state: Option<SecondaryValue>,
    pub icon: Option<String>,
    pub unit: Option<String>,
    pub unit_white_space: bool,
    pub display_zero: bool,
    pub display_zero_tolerance: f64,
    pub accept_negative: bool,
    pub decimals: Option<u8>,
    pub tap_action: Option<TapAction>,
}

impl SecondaryObject {
    fn unconfigured() -> Self {
        Self {
            entity: None,
            template: None,
            has: false,
            state: None,
            icon: None,
            unit: None,
            unit_white_space: false,
            display_zero: false,
            display_zero_tolerance: 0.0,
            accept_negative: false,
            decimals: None,
            tap_action: None,
        }
    }

    /// Whether the secondary span should be visible.
    ///
    /// Textual values always display; numeric values must clear the
    /// tolerance (or be forced by `display_zero`) and negative values only
    /// display when `accept_negative` is set.
    pub fn should_display(&self) -> bool {
        if !self.has {
            return false;
        }
        match &self.state {
            None => false,
            Some(SecondaryValue::Text(_)) => true,
            Some(SecondaryValue::Numeric(value)) => {
                if *value < 0.0 && !self.accept_negative {
                    return false;
                }
                self.display_zero || value.abs() > self.display_zero_tolerance
            }
        }
    }
}

/// One normalized individual record, rebuilt from scratch on every snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct IndividualObject {
    /// Position of this field in the configured list. Caller-supplied
    /// per-individual arrays (animation durations, template results) are
    /// indexed with it.
    pub config_index: usize,
    pub entity: String,
    /// Whether this individual occupies a slot.
    pub has: bool,
    /// The resolved power value in watts; `None` when unresolvable.
    pub state: Option<f64>,
    pub display_zero: bool,
    pub display_zero_tolerance: f64,
    pub icon: String,
    pub name: String,
    /// Configured color, normalized to the string form or nothing.
    pub color: Option<String>,
    pub unit: Option<String>,
    pub unit_white_space: bool,
    pub decimals: Option<u8>,
    /// Effective animation inversion: the configured flag, flipped when the
    /// measured value is negative.
    pub invert_animation: bool,
    pub show_direction: bool,
    pub secondary: SecondaryObject,
    /// Resolved downstream devices, in configuration order. Unbounded here;
    /// the renderer uses at most the first two.
    pub downstream: Vec<DownstreamDevice>,
}

impl IndividualObject {
    /// Returns the canonical record for an unconfigured field: inactive,
    /// empty entity, no downstream devices.
    pub fn fallback(config_index: usize) -> Self {
        Self {
            config_index,
            entity: String::new(),
            has: false,
            state: None,
            display_zero: false,
            display_zero_tolerance: 0.0,
            icon: String::new(),
            name: String::new(),
            color: None,
            unit: None,
            unit_white_space: false,
            decimals: None,
            invert_animation: false,
            show_direction: false,
            secondary: SecondaryObject::unconfigured(),
            downstream: Vec::new(),
        }
    }
}

/// Whether an individual with the given resolved state occupies a slot.
///
/// Active when the state resolved at all, and its magnitude strictly clears
/// the tolerance or the `display_zero` override forces visibility.
pub(crate) fn has_individual(display_zero: bool, state: Option<f64>, tolerance: f64) -> bool {
    match state {
        None => false,
        Some(value) => display_zero || value.abs() > tolerance,
    }
}

/// Builds the [`IndividualObject`] for one configured field.
///
/// Never fails: anomalies in the configuration or the store degrade to the
/// fallback record or to empty fields.
pub(crate) fn build_individual<S: EntityStore>(
    store: &S,
    config_index: usize,
    field: &IndividualFieldConfig,
) -> IndividualObject {
    if field.entity.is_empty() {
        return IndividualObject::fallback(config_index);
    }

    let state = resolver::power_state(store, &field.entity);
    if state.is_none() {
        if let Some(raw) = resolver::generic_state(store, &field.entity) {
            tracing::warn!(
                "State of individual entity {} is not a power value: {:?}",
                field.entity,
                raw
            );
        }
    }

    let negative = state.is_some_and(|value| value < 0.0);
    let color = match &field.color {
        Some(ColorConfig::Name(name)) => Some(name.clone()),
        Some(ColorConfig::Rgb(_)) | None => None,
    };

    IndividualObject {
        config_index,
        entity: field.entity.clone(),
        has: has_individual(field.display_zero, state, field.display_zero_tolerance),
        state,
        display_zero: field.display_zero,
        display_zero_tolerance: field.display_zero_tolerance,
        icon: field_icon(store, field),
        name: field_name(store, field),
        color,
        unit: field.unit_of_measurement.clone(),
        unit_white_space: field.unit_white_space,
        decimals: field.decimals,
        invert_animation: negative != field.inverted_animation,
        show_direction: field.show_direction,
        secondary: build_secondary(store, field.secondary_info.as_ref()),
        downstream: field
            .downstream
            .iter()
            .map(|down| build_downstream(store, down))
            .collect(),
    }
}

fn field_icon<S: EntityStore>(store: &S, field: &IndividualFieldConfig) -> String {
    field
        .icon
        .clone()
        .or_else(|| {
            store
                .entity(&field.entity)
                .and_then(|e| e.icon())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| DEFAULT_ICON.to_owned())
}

fn field_name<S: EntityStore>(store: &S, field: &IndividualFieldConfig) -> String {
    field
        .name
        .clone()
        .or_else(|| {
            store
                .entity(&field.entity)
                .and_then(|e| e.friendly_name())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| DEFAULT_NAME.to_owned())
}

fn build_secondary<S: EntityStore>(
    store: &S,
    config: Option<&SecondaryInfoConfig>,
) -> SecondaryObject {
    let Some(config) = config else {
        return SecondaryObject::unconfigured();
    };

    SecondaryObject {
        entity: config.entity.clone(),
        template: config.template.clone(),
        has: config.configured(),
        state: config
            .entity
            .as_deref()
            .and_then(|entity_id| resolver::secondary_state(store, entity_id)),
        icon: config.icon.clone(),
        unit: config.unit_of_measurement.clone(),
        unit_white_space: config.unit_white_space,
        display_zero: config.display_zero,
        display_zero_tolerance: config.display_zero_tolerance,
        accept_negative: config.accept_negative,
        decimals: config.decimals,
        tap_action: config.tap_action.clone(),
    }
}

fn build_downstream<S: EntityStore>(store: &S, config: &DownstreamConfig) -> DownstreamDevice {
    let entity = store.entity(&config.entity);

    DownstreamDevice {
        entity: config.entity.clone(),
        name: config
            .name
            .clone()
            .or_else(|| entity.and_then(|e| e.friendly_name()).map(str::to_owned))
            .unwrap_or_else(|| config.entity.clone()),
        state: resolver::downstream_state(store, &config.entity),
        unit: config
            .unit_of_measurement
            .clone()
            .or_else(|| entity.and_then(|e| e.unit_of_measurement()).map(str::to_owned)),
        unit_white_space: config.unit_white_space,
        decimals: config.decimals,
        icon: config
            .icon
            .clone()
            .or_else(|| entity.and_then(|e| e.icon()).map(str::to_owned)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::test_utils::{field, TestEntity, TestStore};

    #[test]
    fn test_unconfigured_field_is_fallback() {
        let store = TestStore::new();
        let built = build_individual(&store, 3, &IndividualFieldConfig::default());
        assert_eq!(built, IndividualObject::fallback(3));
        assert!(!built.has);
        assert!(built.entity.is_empty());
        assert!(built.downstream.is_empty());
    }

    #[test]
    fn test_missing_entity_is_inactive() {
        let store = TestStore::new();
        let built = build_individual(&store, 0, &field("sensor.missing"));
        assert!(!built.has);
        assert_eq!(built.state, None);
    }

    #[test]
    fn test_has_rule() {
        assert!(!has_individual(false, None, 0.0));
        assert!(!has_individual(true, None, 0.0));
        assert!(has_individual(false, Some(10.0), 0.0));
        assert!(!has_individual(false, Some(3.0), 5.0));
        assert!(has_individual(true, Some(3.0), 5.0));
        // Magnitude clears the tolerance, not the signed value.
        assert!(has_individual(false, Some(-150.0), 0.0));
        // Strictly greater: a value exactly at the tolerance stays inactive.
        assert!(!has_individual(false, Some(5.0), 5.0));
    }

    #[test]
    fn test_invert_animation_is_sign_xor() {
        let store = TestStore::new().with_watts("sensor.a", -150.0);

        let built = build_individual(&store, 0, &field("sensor.a"));
        assert!(built.has);
        assert!(built.invert_animation);

        let mut inverted = field("sensor.a");
        inverted.inverted_animation = true;
        let built = build_individual(&store, 0, &inverted);
        assert!(!built.invert_animation);

        let store = TestStore::new().with_watts("sensor.a", 150.0);
        let built = build_individual(&store, 0, &inverted);
        assert!(built.invert_animation);
    }

    #[test]
    fn test_color_normalization() {
        let store = TestStore::new().with_watts("sensor.a", 100.0);

        let mut named = field("sensor.a");
        named.color = Some(ColorConfig::Name(String::from("var(--teal-color)")));
        assert_eq!(
            build_individual(&store, 0, &named).color,
            Some(String::from("var(--teal-color)"))
        );

        let mut rgb = field("sensor.a");
        rgb.color = Some(ColorConfig::Rgb([0, 128, 128]));
        assert_eq!(build_individual(&store, 0, &rgb).color, None);
    }

    #[test]
    fn test_icon_and_name_fallbacks() {
        let store = TestStore::new().with(
            "sensor.pump",
            TestEntity::with_state("80")
                .icon("mdi:water-pump")
                .friendly_name("Pool Pump"),
        );

        let built = build_individual(&store, 0, &field("sensor.pump"));
        assert_eq!(built.icon, "mdi:water-pump");
        assert_eq!(built.name, "Pool Pump");

        let mut overridden = field("sensor.pump");
        overridden.icon = Some(String::from("mdi:pool"));
        overridden.name = Some(String::from("Pump"));
        let built = build_individual(&store, 0, &overridden);
        assert_eq!(built.icon, "mdi:pool");
        assert_eq!(built.name, "Pump");

        let bare = TestStore::new().with_watts("sensor.pump", 80.0);
        let built = build_individual(&bare, 0, &field("sensor.pump"));
        assert_eq!(built.icon, DEFAULT_ICON);
        assert_eq!(built.name, "Individual");
    }

    #[test]
    fn test_downstream_resolution() {
        let store = TestStore::new()
            .with_watts("sensor.parent", 500.0)
            .with(
                "sensor.charger",
                TestEntity::with_state("350").friendly_name("Wallbox").unit("W"),
            )
            .with("sensor.mode", TestEntity::with_state("eco"));

        let mut parent = field("sensor.parent");
        parent.downstream = vec![
            DownstreamConfig {
                entity: String::from("sensor.charger"),
                ..DownstreamConfig::default()
            },
            DownstreamConfig {
                entity: String::from("sensor.mode"),
                name: Some(String::from("Mode")),
                ..DownstreamConfig::default()
            },
            DownstreamConfig {
                entity: String::from("sensor.absent"),
                ..DownstreamConfig::default()
            },
        ];

        let built = build_individual(&store, 0, &parent);
        assert_eq!(built.downstream.len(), 3);

        assert_eq!(built.downstream[0].name, "Wallbox");
        assert_eq!(
            built.downstream[0].state,
            Some(DownstreamValue::Power(350.0))
        );
        assert_eq!(built.downstream[0].unit, Some(String::from("W")));
        assert_eq!(built.downstream[0].power(), 350.0);

        assert_eq!(built.downstream[1].name, "Mode");
        assert_eq!(
            built.downstream[1].state,
            Some(DownstreamValue::Text(String::from("eco")))
        );
        assert_eq!(built.downstream[1].power(), 0.0);

        // Unresolvable downstream entities fall back to their id and stay
        // stateless instead of failing the build.
        assert_eq!(built.downstream[2].name, "sensor.absent");
        assert_eq!(built.downstream[2].state, None);
    }

    #[test]
    fn test_secondary_resolution() {
        let store = TestStore::new()
            .with_watts("sensor.a", 100.0)
            .with("sensor.temp", TestEntity::with_state("21.5"));

        let mut with_secondary = field("sensor.a");
        with_secondary.secondary_info = Some(SecondaryInfoConfig {
            entity: Some(String::from("sensor.temp")),
            ..SecondaryInfoConfig::default()
        });

        let built = build_individual(&store, 0, &with_secondary);
        assert!(built.secondary.has);
        assert_eq!(built.secondary.state, Some(SecondaryValue::Numeric(21.5)));
        assert!(built.secondary.should_display());

        let built = build_individual(&store, 0, &field("sensor.a"));
        assert!(!built.secondary.has);
        assert!(!built.secondary.should_display());
    }

    #[test]
    fn test_secondary_display_rules() {
        let mut secondary = SecondaryObject::unconfigured();
        secondary.has = true;

        secondary.state = Some(SecondaryValue::Numeric(0.0));
        assert!(!secondary.should_display());

        secondary.display_zero = true;
        assert!(secondary.should_display());

        secondary.display_zero = false;
        secondary.display_zero_tolerance = 10.0;
        secondary.state = Some(SecondaryValue::Numeric(5.0));
        assert!(!secondary.should_display());
        secondary.state = Some(SecondaryValue::Numeric(15.0));
        assert!(secondary.should_display());

        secondary.state = Some(SecondaryValue::Numeric(-15.0));
        assert!(!secondary.should_display());
        secondary.accept_negative = true;
        assert!(secondary.should_display());

        secondary.state = Some(SecondaryValue::Text(String::from("idle")));
        assert!(secondary.should_display());
    }
}
