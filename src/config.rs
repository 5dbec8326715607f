// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `FlowDiagram`.
//!
//! The types mirror the option keys the hosting dashboard passes down as
//! YAML/JSON, so a host configuration block deserializes directly into
//! [`DiagramConfig`]. Every field is optional on the wire; missing keys fall
//! back to the defaults documented on each field.

use serde::{Deserialize, Serialize};

/// An opaque host-defined tap action.
///
/// The library never interprets this beyond handing it back to the host's
/// open-details callback; extra keys are carried through untouched.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TapAction {
    /// The action name, e.g. `"more-info"` or `"navigate"`.
    pub action: String,

    /// Any further action parameters, passed through verbatim.
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// A configured circle color.
///
/// Hosts supply either a color string or a structured RGB triple. Only the
/// string form is usable by the renderer; the builder normalizes everything
/// else to "no color".
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ColorConfig {
    Name(String),
    Rgb([u8; 3]),
}

/// How flow lines behave when the value they represent is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroLineMode {
    /// Draw the line regardless of the value.
    #[default]
    Show,
    /// Draw the line only when the magnitude is non-zero.
    Hide,
    /// Always draw the line, but mark it with the `grey` class when the
    /// magnitude is zero.
    GreyOut,
}

/// Configuration of the optional secondary metric shown inside an
/// individual's circle.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SecondaryInfoConfig {
    /// Entity to read the secondary value from.
    pub entity: Option<String>,

    /// Host template whose rendered result replaces the entity state.
    pub template: Option<String>,

    /// Icon shown next to the secondary value.
    pub icon: Option<String>,

    /// Unit override for the displayed value.
    pub unit_of_measurement: Option<String>,

    /// Whether a space separates value and unit. Default `true`.
    pub unit_white_space: bool,

    /// Show the value even when it does not clear the tolerance.
    pub display_zero: bool,

    /// Magnitude below which the value counts as zero.
    pub display_zero_tolerance: f64,

    /// Whether negative values are displayed.
    pub accept_negative: bool,

    /// Decimal places override for the displayed value.
    pub decimals: Option<u8>,

    /// Tap action for the secondary span.
    pub tap_action: Option<TapAction>,
}

impl Default for SecondaryInfoConfig {
    fn default() -> Self {
        Self {
            entity: None,
            template: None,
            icon: None,
            unit_of_measurement: None,
            unit_white_space: true,
            display_zero: false,
            display_zero_tolerance: 0.0,
            accept_negative: false,
            decimals: None,
            tap_action: None,
        }
    }
}

/// Configuration of one downstream device chained beneath an individual.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Entity to read the device's state from. Empty means unconfigured.
    pub entity: String,

    /// Display name override; defaults to the entity's friendly name.
    pub name: Option<String>,

    /// Icon override; defaults to the entity's icon, then the parent
    /// individual's icon.
    pub icon: Option<String>,

    /// Unit override; defaults to the entity's declared unit.
    pub unit_of_measurement: Option<String>,

    /// Whether a space separates value and unit. Default `true`.
    pub unit_white_space: bool,

    /// Decimal places override for the displayed value.
    pub decimals: Option<u8>,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            entity: String::new(),
            name: None,
            icon: None,
            unit_of_measurement: None,
            unit_white_space: true,
            decimals: None,
        }
    }
}

/// Configuration of one individual device field.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndividualFieldConfig {
    /// Entity to read the power value from. Empty means unconfigured; the
    /// field then renders as an empty spacer.
    pub entity: String,

    /// Display name override; defaults to the entity's friendly name.
    pub name: Option<String>,

    /// Icon override; defaults to the entity's icon. A single space
    /// suppresses the icon entirely.
    pub icon: Option<String>,

    /// Circle color. Only the string form is honored.
    pub color: Option<ColorConfig>,

    /// Unit override for the displayed value.
    pub unit_of_measurement: Option<String>,

    /// Whether a space separates value and unit. Default `true`.
    pub unit_white_space: bool,

    /// Decimal places override for the displayed value.
    pub decimals: Option<u8>,

    /// Treat the individual as active even when its value does not clear
    /// the tolerance.
    pub display_zero: bool,

    /// Magnitude below which the value counts as zero.
    pub display_zero_tolerance: f64,

    /// Whether the value label stays visible when the value counts as zero.
    /// Default `true`; label suppression is opt-in.
    pub display_zero_state: bool,

    /// Flip the flow animation direction for this field.
    pub inverted_animation: bool,

    /// Render a directional arrow glyph next to the value.
    pub show_direction: bool,

    /// Derive the dot animation duration from the caller-computed flow
    /// rate. When `false` a fixed duration is used. Default `true`.
    pub calculate_flow_rate: bool,

    /// Tap action for the main circle.
    pub tap_action: Option<TapAction>,

    /// Optional secondary metric shown inside the circle.
    pub secondary_info: Option<SecondaryInfoConfig>,

    /// Downstream devices chained beneath this individual, in configuration
    /// order. Only the first two are rendered.
    pub downstream: Vec<DownstreamConfig>,
}

impl Default for IndividualFieldConfig {
    fn default() -> Self {
        Self {
            entity: String::new(),
            name: None,
            icon: None,
            color: None,
            unit_of_measurement: None,
            unit_white_space: true,
            decimals: None,
            display_zero: false,
            display_zero_tolerance: 0.0,
            display_zero_state: true,
            inverted_animation: false,
            show_direction: false,
            calculate_flow_rate: true,
            tap_action: None,
            secondary_info: None,
            downstream: Vec::new(),
        }
    }
}

/// Configuration options for the `FlowDiagram`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// The configured individual device fields, in the host's order.
    pub individual: Vec<IndividualFieldConfig>,

    /// Magnitude at which displayed values switch from W to kW.
    /// Default `1000.0`.
    pub watt_threshold: f64,

    /// How flow lines behave for zero values.
    pub display_zero_lines: ZeroLineMode,

    /// Whether animated flow dots are drawn at all. Default `true`.
    pub display_dots: bool,

    /// Whether the home aggregate is hidden. Individual stub lines connect
    /// to the bus around the home circle, so hiding it suppresses them too.
    pub hide_home: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            individual: Vec::new(),
            watt_threshold: 1000.0,
            display_zero_lines: ZeroLineMode::default(),
            display_dots: true,
            hide_home: false,
        }
    }
}

impl SecondaryInfoConfig {
    /// A secondary block counts as configured when it names a source.
    pub(crate) fn configured(&self) -> bool {
        self.entity.is_some() || self.template.is_some()
    }
}
