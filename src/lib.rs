// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Frequenz Power Flow Diagram

This is a library for computing the layout and per-device visual state of a
power-flow dashboard diagram: power moving between the grid, solar, battery
and home aggregates, plus a runtime-configured collection of *individual*
sub-devices with their chained *downstream* devices.

The library owns the hard part of that diagram: assigning an arbitrary list
of configured individuals into the fixed 10-slot layout (two rows of five)
and deriving, per slot and per link, what to draw: value text, icons,
direction arrows, flow lines, and the animated dots on them. The result is
an abstract [`VisNode`] tree; materializing it as DOM/SVG and diffing
updates stays with the host's rendering substrate.

## The `Entity` and `EntityStore` traits

Because `power_flow_diagram` is an independent library, it doesn't know
about the host platform's state-store types and instead uses traits to
interact with them.

Therefore, to be usable with this library, the host's entity record and
state-snapshot types must implement the [`Entity`] and [`EntityStore`]
traits, respectively. Check out the documentation for these traits for
sample implementations.

## Snapshots

A [`FlowDiagram`] is created from a [`DiagramConfig`] with the
[`try_new`][FlowDiagram::try_new] method, which rejects configurations
where two fields name the same entity. Every host state update then becomes
one [`snapshot`][FlowDiagram::snapshot] call: all individual records are
rebuilt from scratch against the current store contents, nothing is cached
between passes, and rendering the same snapshot twice yields identical
trees.

## Slot assignment

Active individuals (those whose power magnitude clears their zero
tolerance, or that are forced visible) fill the bottom row first and the
top row next, in the order the snapshot holds; anything past ten stays
configured but unrendered. The caller owns the ordering;
[`Snapshot::sort_by_power_desc`] applies the conventional one.

## Rendering

[`Snapshot::render`] produces the individuals fragment of the diagram:
two fixed-width rows padded with spacers, each occupied slot carrying its
circle, bus stub line, and up to two downstream chain tiers. Per-line flow
dots honor the configured zero tolerances, the global dot switch, and the
per-field animation inversion. Activating a circle is delegated back to the
host through [`dispatch_activation`].
*/

mod config;
pub use config::{
    ColorConfig, DiagramConfig, DownstreamConfig, IndividualFieldConfig, SecondaryInfoConfig,
    TapAction, ZeroLineMode,
};

mod diagram;
pub use diagram::{
    bottom_row_individuals, has_bottom_individual, has_right_individual, has_top_individual,
    top_row_individuals, DownstreamDevice, DownstreamValue, FlowDiagram, IndividualObject,
    RenderInputs, Row, SecondaryObject, SecondaryValue, Snapshot,
};

mod state_traits;
pub use state_traits::{Entity, EntityStore};

mod vis_node;
pub use vis_node::{dispatch_activation, Activation, Interaction, KeyPoints, VisNode};

mod error;
pub use error::Error;
