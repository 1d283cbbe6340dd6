use std::collections::BTreeSet;

use crate::graph::Edge;

use super::normalize::{normalize_actions, normalize_states};

/// Normalized requirement sets of an edge, computed once per resolver pass.
pub(crate) struct Requirements {
    pub actions: BTreeSet<String>,
    pub states: BTreeSet<String>,
}

impl Requirements {
    pub fn of(edge: &Edge) -> Self {
        Self {
            actions: normalize_actions(&edge.actions),
            states: normalize_states(edge),
        }
    }
}

/// Whether `edge` is redundant given that `other` is available, i.e. its
/// requirements are at least as hard to satisfy as `other`'s.
///
/// Normalization can erase all difference between two genuinely distinct
/// observations; on an exact normalized tie the raw sets decide instead, so
/// the surviving edge is still chosen deterministically.
pub fn subsumes(edge: &Edge, other: &Edge) -> bool {
    subsumes_with(
        edge,
        &Requirements::of(edge),
        other,
        &Requirements::of(other),
    )
}

pub(crate) fn subsumes_with(
    edge: &Edge,
    req: &Requirements,
    other: &Edge,
    other_req: &Requirements,
) -> bool {
    if req.actions == other_req.actions && req.states == other_req.states {
        edge.actions.is_superset(&other.actions) && edge.states.is_superset(&other.states)
    } else {
        req.actions.is_superset(&other_req.actions) && req.states.is_superset(&other_req.states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(actions: &[&str], states: &[&str]) -> Edge {
        let mut edge = Edge::new("Garden", "Garden/A", "Garden/B");
        edge.actions = actions.iter().map(|s| s.to_string()).collect();
        edge.states = states.iter().map(|s| s.to_string()).collect();
        edge
    }

    #[test]
    fn test_superset_of_requirements_is_subsumed() {
        let harder = edge(&["Dash", "Hookshot"], &["DoorOpen"]);
        let easier = edge(&["Dash"], &[]);
        assert!(subsumes(&harder, &easier));
        assert!(!subsumes(&easier, &harder));
    }

    #[test]
    fn test_incomparable_sets_do_not_subsume() {
        let left = edge(&["Dash"], &[]);
        let right = edge(&["Hookshot"], &[]);
        assert!(!subsumes(&left, &right));
        assert!(!subsumes(&right, &left));
    }

    #[test]
    fn test_normalized_tie_falls_back_to_raw_sets() {
        // Walk is traversal-irrelevant, so both normalize to {Dash}.
        let padded = edge(&["Walk", "Dash"], &[]);
        let lean = edge(&["Dash"], &[]);
        assert!(subsumes(&padded, &lean));
        assert!(!subsumes(&lean, &padded));
    }

    #[test]
    fn test_identical_edges_subsume_each_other() {
        let a = edge(&["Dash"], &["DoorOpen"]);
        let b = edge(&["Dash"], &["DoorOpen"]);
        assert!(subsumes(&a, &b));
        assert!(subsumes(&b, &a));
    }
}
