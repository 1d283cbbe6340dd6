use std::collections::BTreeMap;

use crate::graph::{Edge, EdgeStatus};

use super::normalize::{normalize_actions, normalize_states};

/// Finds edges that are literal repeat observations of another edge on the
/// same connection, for safe bulk deletion.
///
/// Edges group by connection plus their action and state sets: normalized
/// forms by default, raw sets when `exact` is set (the pre-resolver sweep,
/// run before statuses exist). The newest observation of each group (highest
/// `real_time`, smallest key on ties) is the canonical keeper and is never
/// returned; of the rest, `exact` returns all, otherwise only edges the
/// resolver already marked redundant. At least one member of every group
/// survives.
pub fn duplicate_edges(edges: &[Edge], exact: bool) -> Vec<Edge> {
    let mut sorted: Vec<&Edge> = edges.iter().collect();
    sorted.sort_by(|a, b| {
        b.real_time
            .total_cmp(&a.real_time)
            .then_with(|| b.key.cmp(&a.key))
    });

    let mut groups: BTreeMap<String, Vec<&Edge>> = BTreeMap::new();
    for edge in sorted {
        groups.entry(observation_key(edge, exact)).or_default().push(edge);
    }

    let mut duplicates = Vec::new();
    for repeats in groups.values() {
        for edge in repeats.iter().skip(1) {
            if exact || edge.status == EdgeStatus::Redundant {
                duplicates.push((*edge).clone());
            }
        }
    }
    duplicates
}

fn observation_key(edge: &Edge, exact: bool) -> String {
    let (actions, states) = if exact {
        (edge.actions.clone(), edge.states.clone())
    } else {
        (normalize_actions(&edge.actions), normalize_states(edge))
    };
    let actions = actions.into_iter().collect::<Vec<_>>().join(",");
    let states = states.into_iter().collect::<Vec<_>>().join(",");
    format!(
        "{}|{}|{}|{}",
        edge.source_node, edge.target_node, actions, states
    )
}
