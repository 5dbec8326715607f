// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Predicates for flow-line visibility and the parameters of the animated
//! dots travelling along them.
//!
//! A power value counts as "no flow" for these predicates when its magnitude
//! does not clear the owning field's zero tolerance; the sign never matters
//! here, reverse flow is still flow.

use crate::config::{DiagramConfig, ZeroLineMode};

/// Dot cycle duration in seconds when rate-based animation is disabled for a
/// field, and when the caller supplied no duration for it.
pub(crate) const STATIC_FLOW_DURATION: f64 = 1.66;

/// Whether a flow line carrying the given power should be drawn.
pub(crate) fn show_line(config: &DiagramConfig, power: f64, tolerance: f64) -> bool {
    match config.display_zero_lines {
        ZeroLineMode::Show | ZeroLineMode::GreyOut => true,
        ZeroLineMode::Hide => power.abs() > tolerance,
    }
}

/// Extra class for a flow line carrying the given power; empty when none
/// applies.
pub(crate) fn line_class(config: &DiagramConfig, power: f64, tolerance: f64) -> &'static str {
    match config.display_zero_lines {
        ZeroLineMode::GreyOut if power.abs() <= tolerance => "grey",
        ZeroLineMode::Show | ZeroLineMode::Hide | ZeroLineMode::GreyOut => "",
    }
}

/// Whether animated dots are enabled at all.
pub(crate) fn show_dots(config: &DiagramConfig) -> bool {
    config.display_dots
}

/// Whether a line's dot should be drawn for the given power.
pub(crate) fn show_dot(config: &DiagramConfig, power: f64, tolerance: f64) -> bool {
    show_dots(config) && power.abs() >= tolerance
}

/// The animation cycle duration for one line.
///
/// When rate-based animation is enabled for the field, the caller-computed
/// duration is used as-is; otherwise the fixed fallback applies. Called once
/// per animated line, never per frame.
pub(crate) fn flow_duration(rate_based: bool, duration: f64) -> f64 {
    if rate_based {
        duration
    } else {
        STATIC_FLOW_DURATION
    }
}
