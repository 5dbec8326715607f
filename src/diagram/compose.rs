// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Arranging the occupied slots into the diagram's two rows.
//!
//! Each row always has exactly five children; unoccupied positions become
//! spacers so the fragment keeps its fixed width no matter how many
//! individuals are configured.

use crate::config::{DiagramConfig, IndividualFieldConfig};
use crate::diagram::individual::IndividualObject;
use crate::diagram::layout::{self, SLOTS_PER_ROW};
use crate::diagram::slots::{self, Row};
use crate::diagram::RenderInputs;
use crate::vis_node::VisNode;

/// Renders the individuals fragment: the top row, then the bottom row, each
/// left to right.
pub(crate) fn render_rows(
    config: &DiagramConfig,
    individuals: &[IndividualObject],
    inputs: &RenderInputs<'_>,
) -> VisNode {
    VisNode::container(
        "individual-rows",
        vec![
            render_row(
                config,
                &layout::top_row_individuals(individuals),
                Row::Top,
                inputs,
            ),
            render_row(
                config,
                &layout::bottom_row_individuals(individuals),
                Row::Bottom,
                inputs,
            ),
        ],
    )
}

fn render_row(
    config: &DiagramConfig,
    row_individuals: &[&IndividualObject],
    row: Row,
    inputs: &RenderInputs<'_>,
) -> VisNode {
    let default_field = IndividualFieldConfig::default();

    let children = (0..SLOTS_PER_ROW)
        .map(|index| match row_individuals.get(index) {
            Some(individual) => {
                let field = config
                    .individual
                    .get(individual.config_index)
                    .unwrap_or(&default_field);
                slots::render_slot(config, field, individual, row, index, inputs)
            }
            None => VisNode::Spacer,
        })
        .collect();

    VisNode::container(format!("row individual-row-{}", row.class()), children)
}
