// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Rendering one occupied slot: the individual's circle, the stub line
//! toward the shared bus, and up to two chained downstream devices.
//!
//! Geometry is fixed: every slot is the same width and the line paths are
//! constant per row and chain layer, so the host's layout never shifts as
//! individuals come and go.

use crate::config::{DiagramConfig, IndividualFieldConfig};
use crate::diagram::animation;
use crate::diagram::display::{self, DisplayOptions};
use crate::diagram::individual::{
    DownstreamDevice, DownstreamValue, IndividualObject, SecondaryValue, DEFAULT_ICON,
};
use crate::diagram::RenderInputs;
use crate::vis_node::{Activation, KeyPoints, VisNode};

/// Icon value that suppresses the glyph entirely.
const BLANK_ICON: &str = " ";

/// Downstream chain tiers rendered per slot.
pub(crate) const MAX_DOWNSTREAM: usize = 2;

/// Which of the two rows a slot belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Row {
    /// Above the shared bus; stubs flow downward into it.
    Top,
    /// Below the shared bus; stubs flow upward toward it.
    Bottom,
}

impl Row {
    pub(crate) fn class(self) -> &'static str {
        match self {
            Row::Top => "top",
            Row::Bottom => "bottom",
        }
    }

    /// Base key-point ordering for this row's links, before the
    /// individual's inversion flag is applied: away from the bus for the
    /// bottom row, toward it for the top row.
    fn base_key_points(self) -> KeyPoints {
        match self {
            Row::Bottom => KeyPoints::Forward,
            Row::Top => KeyPoints::Reverse,
        }
    }

    fn main_stub_path(self) -> &'static str {
        match self {
            Row::Top => "M40 0 v40",
            Row::Bottom => "M40 40 v40",
        }
    }

    fn downstream_path(self, layer: usize) -> &'static str {
        match (self, layer) {
            (Row::Top, 0) => "M40 40 v-40",
            (Row::Top, _) => "M40 80 v-40",
            (Row::Bottom, 0) => "M40 40 v40",
            (Row::Bottom, _) => "M40 80 v40",
        }
    }
}

fn classes(parts: &[&str]) -> String {
    let mut joined = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(part);
    }
    joined
}

/// Renders the visual subtree for one occupied slot.
pub(crate) fn render_slot(
    config: &DiagramConfig,
    field: &IndividualFieldConfig,
    individual: &IndividualObject,
    row: Row,
    index: usize,
    inputs: &RenderInputs<'_>,
) -> VisNode {
    let slot_id = format!("individual-{}-slot-{}", row.class(), index);
    let duration = animation::flow_duration(
        field.calculate_flow_rate,
        inputs
            .flow_durations
            .get(individual.config_index)
            .copied()
            .unwrap_or(animation::STATIC_FLOW_DURATION),
    );

    let circle = main_circle(config, field, individual, row, inputs);
    let label = VisNode::text("label", individual.name.clone());
    let stub = main_stub(config, field, individual, row, &slot_id, duration);
    let downstream = downstream_list(config, individual, row, &slot_id, duration);

    if individual.downstream.len() > MAX_DOWNSTREAM {
        tracing::debug!(
            "Individual {} has {} downstream devices configured, rendering {}.",
            individual.entity,
            individual.downstream.len(),
            MAX_DOWNSTREAM
        );
    }

    // The tree orders children the way they stack visually: top-row slots
    // hang downstream devices above the circle and the stub below it, the
    // bottom row mirrors that.
    let children = match row {
        Row::Top => {
            let mut children = vec![label, circle];
            children.extend(downstream);
            children.push(stub);
            children
        }
        Row::Bottom => {
            let mut children = vec![stub, circle, label];
            children.extend(downstream);
            children
        }
    };

    VisNode::container(
        classes(&[
            "circle-container",
            "individual-slot",
            &format!("individual-row-{}", row.class()),
            &format!("slot-{index}"),
        ]),
        children,
    )
}

fn main_circle(
    config: &DiagramConfig,
    field: &IndividualFieldConfig,
    individual: &IndividualObject,
    row: Row,
    inputs: &RenderInputs<'_>,
) -> VisNode {
    let mut children = Vec::new();

    if let Some(span) = secondary_span(config, individual, inputs) {
        children.push(span);
    }

    if individual.icon != BLANK_ICON {
        children.push(VisNode::icon(individual.icon.clone()));
    }

    let power = individual.state.unwrap_or(0.0);
    let show_value =
        field.display_zero_state || power.abs() > individual.display_zero_tolerance;
    if show_value {
        let mut span = Vec::new();
        if individual.show_direction {
            span.push(VisNode::small_icon(direction_arrow(
                row,
                individual.invert_animation,
            )));
        }
        span.push(VisNode::text(
            "value",
            display::format_value(
                power,
                &DisplayOptions {
                    unit: individual.unit.as_deref(),
                    unit_white_space: individual.unit_white_space,
                    decimals: individual.decimals,
                    watt_threshold: config.watt_threshold,
                },
            ),
        ));
        children.push(VisNode::container(
            format!("individual-{}", row.class()),
            span,
        ));
    }

    VisNode::Circle {
        class: String::from("circle"),
        color: individual.color.clone(),
        activation: Some(Activation {
            entity: individual.entity.clone(),
            tap_action: field.tap_action.clone(),
        }),
        children,
    }
}

/// The arrow glyph for a directional value span.
///
/// Bottom-row individuals draw power down and away from the bus, top-row
/// ones feed it down into the bus; inversion flips either.
fn direction_arrow(row: Row, inverted: bool) -> &'static str {
    match (row, inverted) {
        (Row::Top, false) => "mdi:arrow-up",
        (Row::Top, true) => "mdi:arrow-down",
        (Row::Bottom, false) => "mdi:arrow-down",
        (Row::Bottom, true) => "mdi:arrow-up",
    }
}

fn secondary_span(
    config: &DiagramConfig,
    individual: &IndividualObject,
    inputs: &RenderInputs<'_>,
) -> Option<VisNode> {
    let secondary = &individual.secondary;
    if !secondary.has {
        return None;
    }

    let template_result = inputs
        .secondary_templates
        .get(individual.config_index)
        .and_then(|result| result.clone());

    let content = match template_result {
        Some(text) => text,
        None => {
            if !secondary.should_display() {
                return None;
            }
            let options = DisplayOptions {
                unit: secondary.unit.as_deref(),
                unit_white_space: secondary.unit_white_space,
                decimals: secondary.decimals,
                watt_threshold: config.watt_threshold,
            };
            match secondary.state.as_ref()? {
                SecondaryValue::Numeric(value) => display::format_value(*value, &options),
                SecondaryValue::Text(text) => display::format_text(text, &options),
            }
        }
    };

    let mut children = Vec::new();
    if let Some(icon) = &secondary.icon {
        children.push(VisNode::small_icon(icon.clone()));
    }
    children.push(VisNode::text("value", content));
    Some(VisNode::container("secondary-info", children))
}

fn main_stub(
    config: &DiagramConfig,
    field: &IndividualFieldConfig,
    individual: &IndividualObject,
    row: Row,
    slot_id: &str,
    duration: f64,
) -> VisNode {
    let power = individual.state.unwrap_or(0.0);
    let tolerance = individual.display_zero_tolerance;
    let mut children = Vec::new();

    if animation::show_line(config, power, tolerance) && !config.hide_home {
        let line_id = format!("{slot_id}-main");
        children.push(VisNode::Line {
            id: line_id.clone(),
            path: String::from(row.main_stub_path()),
            class: classes(&[
                animation::line_class(config, power, tolerance),
                "individual-main-line",
            ]),
        });

        if animation::show_dot(config, power, tolerance) {
            children.push(VisNode::Dot {
                path_ref: line_id,
                class: format!("individual-{}", row.class()),
                duration_secs: duration,
                key_points: row
                    .base_key_points()
                    .flipped_if(individual.invert_animation),
            });
        }
    }

    VisNode::container("slot-main-flow", children)
}

fn downstream_list(
    config: &DiagramConfig,
    individual: &IndividualObject,
    row: Row,
    slot_id: &str,
    duration: f64,
) -> Option<VisNode> {
    let rendered: Vec<VisNode> = individual
        .downstream
        .iter()
        .take(MAX_DOWNSTREAM)
        .enumerate()
        .map(|(layer, down)| {
            downstream_item(config, individual, down, row, slot_id, layer, duration)
        })
        .collect();

    if rendered.is_empty() {
        return None;
    }
    Some(VisNode::container("downstream-list", rendered))
}

fn downstream_item(
    config: &DiagramConfig,
    individual: &IndividualObject,
    down: &DownstreamDevice,
    row: Row,
    slot_id: &str,
    layer: usize,
    duration: f64,
) -> VisNode {
    let mut circle_children = vec![VisNode::icon(downstream_icon(individual, down))];

    if let Some(state) = &down.state {
        let options = DisplayOptions {
            unit: down.unit.as_deref(),
            unit_white_space: down.unit_white_space,
            decimals: down.decimals,
            watt_threshold: config.watt_threshold,
        };
        let content = match state {
            DownstreamValue::Power(watts) => display::format_value(*watts, &options),
            DownstreamValue::Text(text) => display::format_text(text, &options),
        };
        circle_children.push(VisNode::text("downstream-value", content));
    }

    let mut children = vec![
        VisNode::text("downstream-label", down.name.clone()),
        VisNode::Circle {
            class: String::from("circle downstream-circle"),
            color: None,
            activation: Some(Activation {
                entity: down.entity.clone(),
                tap_action: None,
            }),
            children: circle_children,
        },
    ];

    let power = down.power();
    let tolerance = individual.display_zero_tolerance;
    if animation::show_line(config, power, tolerance) && !config.hide_home {
        let line_id = format!("{slot_id}-down-{layer}");
        children.push(VisNode::Line {
            id: line_id.clone(),
            path: String::from(row.downstream_path(layer)),
            class: classes(&[
                animation::line_class(config, power, tolerance),
                "downstream-line",
            ]),
        });

        if animation::show_dot(config, power, tolerance) {
            children.push(VisNode::Dot {
                path_ref: line_id,
                class: format!("individual-{}", row.class()),
                duration_secs: duration,
                key_points: row
                    .base_key_points()
                    .flipped_if(individual.invert_animation),
            });
        }
    }

    VisNode::container("downstream-item", children)
}

fn downstream_icon(individual: &IndividualObject, down: &DownstreamDevice) -> String {
    down.icon
        .clone()
        .or_else(|| (!individual.icon.is_empty()).then(|| individual.icon.clone()))
        .unwrap_or_else(|| DEFAULT_ICON.to_owned())
}
