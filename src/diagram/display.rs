// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Turning resolved values into display strings.
//!
//! Implements the host's display-value contract: a raw value plus unit
//! options in, one formatted string out. Power values without an explicit
//! unit switch from W to kW at the configured threshold.

/// Unit and precision options for one displayed value.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DisplayOptions<'a> {
    /// Explicit unit override; `None` applies the W/kW threshold logic.
    pub unit: Option<&'a str>,
    /// Whether a space separates value and unit.
    pub unit_white_space: bool,
    /// Decimal places; `None` picks the unit's default.
    pub decimals: Option<u8>,
    /// Magnitude at which unit-less power values switch to kW.
    pub watt_threshold: f64,
}

fn join_unit(value: String, unit: &str, white_space: bool) -> String {
    if white_space {
        format!("{value} {unit}")
    } else {
        format!("{value}{unit}")
    }
}

fn round(value: f64, decimals: u8) -> String {
    format!("{value:.prec$}", prec = decimals as usize)
}

/// Formats a numeric value.
///
/// With an explicit unit the value is rounded and suffixed as-is; without
/// one it is treated as watts and converted to kW at the threshold.
pub(crate) fn format_value(value: f64, options: &DisplayOptions<'_>) -> String {
    if let Some(unit) = options.unit {
        let rounded = round(value, options.decimals.unwrap_or(0));
        return join_unit(rounded, unit, options.unit_white_space);
    }

    if value.abs() >= options.watt_threshold {
        let rounded = round(value / 1000.0, options.decimals.unwrap_or(1));
        join_unit(rounded, "kW", options.unit_white_space)
    } else {
        let rounded = round(value, options.decimals.unwrap_or(0));
        join_unit(rounded, "W", options.unit_white_space)
    }
}

/// Formats a textual state, keeping any configured unit as a suffix.
pub(crate) fn format_text(text: &str, options: &DisplayOptions<'_>) -> String {
    match options.unit {
        Some(unit) => join_unit(text.to_owned(), unit, options.unit_white_space),
        None => text.to_owned(),
    }
}
