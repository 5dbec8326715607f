// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The power-flow diagram: per-snapshot individual records, their slot
//! assignment, and the rendered visual tree.

mod animation;
mod compose;
mod display;
mod individual;
mod layout;
mod resolver;
mod slots;

#[cfg(test)]
mod test_utils;

pub use individual::{
    DownstreamDevice, DownstreamValue, IndividualObject, SecondaryObject, SecondaryValue,
};
pub use layout::{
    bottom_row_individuals, has_bottom_individual, has_right_individual, has_top_individual,
    top_row_individuals,
};
pub use slots::Row;

use std::collections::HashSet;

use crate::config::DiagramConfig;
use crate::state_traits::EntityStore;
use crate::vis_node::VisNode;
use crate::Error;

/// Caller-supplied inputs for one render pass.
///
/// Both slices are indexed by the individual's position in the configured
/// list; missing entries fall back to defaults (the fixed animation
/// duration, no template result).
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderInputs<'a> {
    /// Precomputed dot-cycle durations in seconds, one per configured
    /// individual.
    pub flow_durations: &'a [f64],

    /// Host-rendered secondary-info template results, one per configured
    /// individual.
    pub secondary_templates: &'a [Option<String>],
}

/// A power-flow diagram with a validated configuration.
///
/// The diagram itself holds no entity state; call
/// [`snapshot`][FlowDiagram::snapshot] with the current store contents to
/// materialize one render pass.
#[derive(Clone, Debug)]
pub struct FlowDiagram {
    config: DiagramConfig,
}

impl FlowDiagram {
    /// Creates a new [`FlowDiagram`] from the given configuration.
    ///
    /// Returns an error if two configured fields name the same entity, which
    /// would make per-individual lookups ambiguous. Everything else the
    /// configuration may get wrong degrades at render time instead.
    pub fn try_new(config: DiagramConfig) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for field in &config.individual {
            if field.entity.is_empty() {
                continue;
            }
            if !seen.insert(field.entity.as_str()) {
                return Err(Error::invalid_config(format!(
                    "Duplicate individual entity found: {}",
                    field.entity
                )));
            }
        }

        Ok(Self { config })
    }

    /// Returns the diagram's configuration.
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Builds the individual records for one render pass from the given
    /// state-store snapshot.
    ///
    /// Records come out in configuration order; reorder with
    /// [`Snapshot::sort_by_power_desc`] (or leave as-is) before rendering,
    /// slot assignment follows whatever order the snapshot holds.
    pub fn snapshot<S: EntityStore>(&self, store: &S) -> Snapshot<'_> {
        Snapshot {
            diagram: self,
            individuals: self
                .config
                .individual
                .iter()
                .enumerate()
                .map(|(index, field)| individual::build_individual(store, index, field))
                .collect(),
        }
    }
}

/// One render pass's materialized records.
///
/// Everything here is recomputed from scratch by
/// [`FlowDiagram::snapshot`]; nothing carries over between passes.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    diagram: &'a FlowDiagram,
    individuals: Vec<IndividualObject>,
}

impl Snapshot<'_> {
    /// Returns all individual records, active or not.
    pub fn individuals(&self) -> &[IndividualObject] {
        &self.individuals
    }

    /// Returns the individual with the given entity id, if one is
    /// configured.
    pub fn individual(&self, entity_id: &str) -> Result<&IndividualObject, Error> {
        self.individuals
            .iter()
            .find(|i| i.entity == entity_id)
            .ok_or_else(|| {
                Error::entity_not_found(format!(
                    "Individual with entity id {} not found.",
                    entity_id
                ))
            })
    }

    /// Sorts the records by descending power magnitude, the conventional
    /// significance order for slot assignment. Ties keep configuration
    /// order.
    pub fn sort_by_power_desc(&mut self) {
        self.individuals.sort_by(|a, b| {
            let a = a.state.unwrap_or(0.0).abs();
            let b = b.state.unwrap_or(0.0).abs();
            b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// The individuals assigned to the bottom row, in slot order.
    pub fn bottom_row(&self) -> Vec<&IndividualObject> {
        layout::bottom_row_individuals(&self.individuals)
    }

    /// The individuals assigned to the top row, in slot order.
    pub fn top_row(&self) -> Vec<&IndividualObject> {
        layout::top_row_individuals(&self.individuals)
    }

    /// Returns true if at least one bottom-row slot is occupied.
    pub fn has_bottom_individual(&self) -> bool {
        layout::has_bottom_individual(&self.individuals)
    }

    /// Returns true if at least one top-row slot is occupied.
    pub fn has_top_individual(&self) -> bool {
        layout::has_top_individual(&self.individuals)
    }

    /// Returns true if the right half of either row is occupied.
    pub fn has_right_individual(&self) -> bool {
        layout::has_right_individual(&self.individuals)
    }

    /// Renders the individuals fragment of the diagram.
    pub fn render(&self, inputs: &RenderInputs<'_>) -> VisNode {
        compose::render_rows(&self.diagram.config, &self.individuals, inputs)
    }
}
