// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Slot assignment: partitioning the active individuals into the two
//! fixed rows of the diagram.
//!
//! The layout has 10 slots: bottom row 0–4 (closest to the main load,
//! left to right) and top row 5–9. The caller supplies the individuals in
//! significance order (typically descending power magnitude); assignment
//! only filters and slices, it never reorders.

use crate::diagram::individual::IndividualObject;

/// Slots per row; the diagram has two rows.
pub(crate) const SLOTS_PER_ROW: usize = 5;

/// Total layout capacity. Active individuals beyond this never render.
pub(crate) const MAX_SLOTS: usize = 2 * SLOTS_PER_ROW;

fn active_individuals(individuals: &[IndividualObject]) -> Vec<&IndividualObject> {
    individuals.iter().filter(|i| i.has).collect()
}

/// Returns the individuals assigned to the bottom row: the first 5 active
/// ones in the given order.
pub fn bottom_row_individuals(individuals: &[IndividualObject]) -> Vec<&IndividualObject> {
    let mut active = active_individuals(individuals);
    active.truncate(SLOTS_PER_ROW);
    active
}

/// Returns the individuals assigned to the top row: the next 5 active ones
/// after the bottom row.
pub fn top_row_individuals(individuals: &[IndividualObject]) -> Vec<&IndividualObject> {
    let active = active_individuals(individuals);
    if active.len() > MAX_SLOTS {
        tracing::debug!(
            "{} active individuals configured, laying out the first {}.",
            active.len(),
            MAX_SLOTS
        );
    }
    active
        .into_iter()
        .skip(SLOTS_PER_ROW)
        .take(SLOTS_PER_ROW)
        .collect()
}

/// Returns true if at least one bottom-row slot is occupied.
pub fn has_bottom_individual(individuals: &[IndividualObject]) -> bool {
    !bottom_row_individuals(individuals).is_empty()
}

/// Returns true if at least one top-row slot is occupied.
pub fn has_top_individual(individuals: &[IndividualObject]) -> bool {
    !top_row_individuals(individuals).is_empty()
}

/// Returns true if the right half of either row is occupied.
///
/// "Right half" means slot position 3 or 4 within a row. This is the legacy
/// slice heuristic, kept for compatibility with layout-gating callers; it is
/// not a geometric computation.
pub fn has_right_individual(individuals: &[IndividualObject]) -> bool {
    bottom_row_individuals(individuals).len() > 3 || top_row_individuals(individuals).len() > 3
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns `count` active individuals with entities `sensor.0`,
    /// `sensor.1`, … in that order.
    fn actives(count: usize) -> Vec<IndividualObject> {
        (0..count)
            .map(|i| {
                let mut individual = IndividualObject::fallback(i);
                individual.entity = format!("sensor.{i}");
                individual.has = true;
                individual.state = Some(1000.0 - i as f64);
                individual
            })
            .collect()
    }

    fn entities(row: &[&IndividualObject]) -> Vec<String> {
        row.iter().map(|i| i.entity.clone()).collect()
    }

    #[test]
    fn test_row_partition_sizes() {
        for count in 0..13 {
            let individuals = actives(count);
            let bottom = bottom_row_individuals(&individuals);
            let top = top_row_individuals(&individuals);

            assert_eq!(bottom.len(), count.min(5));
            assert_eq!(top.len(), count.min(10).saturating_sub(5));
        }
    }

    #[test]
    fn test_twelve_individuals_drop_last_two() {
        let individuals = actives(12);

        let bottom = entities(&bottom_row_individuals(&individuals));
        let top = entities(&top_row_individuals(&individuals));

        assert_eq!(
            bottom,
            ["sensor.0", "sensor.1", "sensor.2", "sensor.3", "sensor.4"]
        );
        assert_eq!(
            top,
            ["sensor.5", "sensor.6", "sensor.7", "sensor.8", "sensor.9"]
        );
        // sensor.10 and sensor.11 appear in neither row.
        for dropped in ["sensor.10", "sensor.11"] {
            assert!(!bottom.contains(&dropped.to_owned()));
            assert!(!top.contains(&dropped.to_owned()));
        }
    }

    #[test]
    fn test_inactive_individuals_are_skipped() {
        let mut individuals = actives(7);
        individuals[1].has = false;
        individuals[5].has = false;

        let bottom = entities(&bottom_row_individuals(&individuals));
        let top = entities(&top_row_individuals(&individuals));

        assert_eq!(
            bottom,
            ["sensor.0", "sensor.2", "sensor.3", "sensor.4", "sensor.6"]
        );
        assert!(top.is_empty());
    }

    #[test]
    fn test_emptiness_checks() {
        assert!(!has_bottom_individual(&actives(0)));
        assert!(!has_top_individual(&actives(0)));

        assert!(has_bottom_individual(&actives(1)));
        assert!(!has_top_individual(&actives(5)));
        assert!(has_top_individual(&actives(6)));
    }

    #[test]
    fn test_right_side_heuristic() {
        assert!(!has_right_individual(&actives(3)));
        assert!(has_right_individual(&actives(4)));
        // A full bottom row keeps the right side occupied regardless of the
        // top row.
        assert!(has_right_individual(&actives(8)));
        assert!(has_right_individual(&actives(9)));
    }
}
