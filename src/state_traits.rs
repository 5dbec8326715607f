// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the traits that need to be implemented by the types
//! that represent the host platform's entity state store.

/**
This trait needs to be implemented by the type that represents one entity
record in the host's state store.

Because `power_flow_diagram` is an independent library, it doesn't know about
the host platform's state types and instead uses traits to interact with them.

<details>
<summary>Example implementation for a typical dashboard host:</summary>

```ignore
impl frequenz_power_flow_diagram::Entity for host::EntityState {
    fn state(&self) -> Option<&str> {
        Some(self.state.as_str())
    }

    fn power(&self) -> Option<f64> {
        self.attributes.get("power").and_then(|v| v.as_f64())
    }

    fn icon(&self) -> Option<&str> {
        self.attributes.get("icon").and_then(|v| v.as_str())
    }

    fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(|v| v.as_str())
    }

    fn unit_of_measurement(&self) -> Option<&str> {
        self.attributes
            .get("unit_of_measurement")
            .and_then(|v| v.as_str())
    }
}
```

</details>
*/
pub trait Entity {
    /// Returns the entity's raw state value, if it has one.
    fn state(&self) -> Option<&str>;
    /// Returns the power reading declared by the entity's integration, in
    /// watts, if there is one.
    fn power(&self) -> Option<f64>;
    /// Returns the entity's declared icon.
    fn icon(&self) -> Option<&str>;
    /// Returns the entity's human-readable name.
    fn friendly_name(&self) -> Option<&str>;
    /// Returns the entity's declared unit of measurement.
    fn unit_of_measurement(&self) -> Option<&str>;
}

/**
This trait needs to be implemented by the type that represents the host's
state-store snapshot.

<details>
<summary>Example implementation for a typical dashboard host:</summary>

```ignore
impl frequenz_power_flow_diagram::EntityStore for host::StateMap {
    type Entity = host::EntityState;

    fn entity(&self, entity_id: &str) -> Option<&Self::Entity> {
        self.states.get(entity_id)
    }
}
```

</details>
*/
pub trait EntityStore {
    /// The host's entity record type.
    type Entity: Entity;

    /// Returns the entity with the given id, if the snapshot contains it.
    fn entity(&self, entity_id: &str) -> Option<&Self::Entity>;
}
