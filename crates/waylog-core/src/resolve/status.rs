use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::graph::{Edge, EdgeStatus, IgnoredConnection};

use super::subsume::{subsumes_with, Requirements};

/// Options for a resolver pass.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Edge keys barred from acting as the active survivor of a comparison,
    /// and kept redundant if already redundant. Used for "what if this were
    /// deleted" previews.
    pub disabled: HashSet<String>,
    /// Overlay to refresh every edge's `ignored` flag from.
    pub ignored: Option<Vec<IgnoredConnection>>,
}

/// Returns a copy of `edges` with statuses reassigned per connection.
///
/// Within each ordered (source, target) group, previously redundant edges
/// are re-examined and every edge not manually pinned ends up `Active` or
/// `Redundant`: an edge goes redundant as soon as some active edge of the
/// group is no harder to satisfy than it is. `Active` and `Rejected` at
/// entry are sticky. The input is never mutated and the relative order of
/// the returned edges is unspecified.
pub fn process_edges(edges: &[Edge], options: &ResolveOptions) -> Vec<Edge> {
    let mut groups: BTreeMap<(String, String), Vec<Edge>> = BTreeMap::new();
    for edge in edges {
        let pair = (edge.source_node.clone(), edge.target_node.clone());
        groups.entry(pair).or_default().push(edge.clone());
    }
    debug!(edges = edges.len(), connections = groups.len(), "resolving edge statuses");

    let mut resolved = Vec::with_capacity(edges.len());
    for group in groups.values_mut() {
        resolve_group(group, options);
        resolved.append(group);
    }
    resolved
}

fn resolve_group(group: &mut [Edge], options: &ResolveOptions) {
    for edge in group.iter_mut() {
        if let Some(overlay) = &options.ignored {
            edge.ignored = overlay.iter().any(|c| c.matches(edge));
        }
        // Disabled edges can never resurface as the active one.
        if edge.status == EdgeStatus::Redundant && !options.disabled.contains(&edge.key) {
            edge.status = EdgeStatus::Unverified;
        }
    }

    let mut eligible = vec![false; group.len()];
    for (edge, eligible) in group.iter_mut().zip(eligible.iter_mut()) {
        if edge.status == EdgeStatus::Unverified {
            edge.status = EdgeStatus::Active;
            *eligible = true;
        }
    }

    // Higher game times get marked off first, so among mutually subsuming
    // edges the one with the lowest game time survives. The key is the
    // secondary sort so equal game times still resolve the same way on
    // every pass.
    let mut order: Vec<usize> = (0..group.len()).collect();
    order.sort_by(|&a, &b| {
        group[b]
            .game_time
            .total_cmp(&group[a].game_time)
            .then_with(|| group[b].key.cmp(&group[a].key))
    });

    let requirements: Vec<Requirements> = group.iter().map(Requirements::of).collect();

    for &i in &order {
        if !eligible[i] {
            continue;
        }
        for &j in &order {
            if i == j
                || group[j].status != EdgeStatus::Active
                || options.disabled.contains(&group[j].key)
            {
                continue;
            }
            if subsumes_with(&group[i], &requirements[i], &group[j], &requirements[j]) {
                group[i].status = EdgeStatus::Redundant;
                break;
            }
        }
    }
}
