// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `diagram` module.
//!
//! - the `TestEntity` and `TestStore` types, which implement the `Entity` and
//!   `EntityStore` traits respectively.
//! - convenience constructors for configuration fixtures.

use std::collections::HashMap;

use crate::config::{DiagramConfig, IndividualFieldConfig};
use crate::vis_node::VisNode;
use crate::{Entity, EntityStore};

#[derive(Clone, Debug, Default, PartialEq)]
pub(super) struct TestEntity {
    state: Option<String>,
    power: Option<f64>,
    icon: Option<String>,
    friendly_name: Option<String>,
    unit: Option<String>,
}

impl TestEntity {
    pub(super) fn with_state(state: impl Into<String>) -> Self {
        TestEntity {
            state: Some(state.into()),
            ..Self::default()
        }
    }

    pub(super) fn power(mut self, watts: f64) -> Self {
        self.power = Some(watts);
        self
    }

    pub(super) fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub(super) fn friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    pub(super) fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

impl Entity for TestEntity {
    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    fn power(&self) -> Option<f64> {
        self.power
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    fn unit_of_measurement(&self) -> Option<&str> {
        self.unit.as_deref()
    }
}

#[derive(Clone, Debug, Default)]
pub(super) struct TestStore {
    entities: HashMap<String, TestEntity>,
}

impl TestStore {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Adds an entity to the store and returns the store for chaining.
    pub(super) fn with(mut self, entity_id: impl Into<String>, entity: TestEntity) -> Self {
        self.entities.insert(entity_id.into(), entity);
        self
    }

    /// Adds an entity whose state parses as the given wattage.
    pub(super) fn with_watts(self, entity_id: impl Into<String>, watts: f64) -> Self {
        self.with(entity_id, TestEntity::with_state(watts.to_string()))
    }
}

impl EntityStore for TestStore {
    type Entity = TestEntity;

    fn entity(&self, entity_id: &str) -> Option<&Self::Entity> {
        self.entities.get(entity_id)
    }
}

/// Returns the given node and all its descendants, depth-first.
pub(super) fn flatten(node: &VisNode) -> Vec<&VisNode> {
    let mut nodes = vec![node];
    match node {
        VisNode::Container { children, .. } | VisNode::Circle { children, .. } => {
            for child in children {
                nodes.extend(flatten(child));
            }
        }
        _ => {}
    }
    nodes
}

/// Returns a field config with the given entity and everything else default.
pub(super) fn field(entity: &str) -> IndividualFieldConfig {
    IndividualFieldConfig {
        entity: entity.to_owned(),
        ..IndividualFieldConfig::default()
    }
}

/// Returns a diagram config with the given individual fields.
pub(super) fn diagram_config(fields: Vec<IndividualFieldConfig>) -> DiagramConfig {
    DiagramConfig {
        individual: fields,
        ..DiagramConfig::default()
    }
}
