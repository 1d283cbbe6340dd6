use std::collections::HashSet;

use waylog_core::{process_edges, Edge, EdgeStatus, IgnoredConnection, ResolveOptions};

fn edge(key: &str, source: &str, target: &str, actions: &[&str], game_time: f64) -> Edge {
    let mut edge = Edge::new("Garden", source, target);
    edge.key = key.to_string();
    edge.actions = actions.iter().map(|s| s.to_string()).collect();
    edge.game_time = game_time;
    edge
}

fn status_of(edges: &[Edge], key: &str) -> EdgeStatus {
    edges.iter().find(|e| e.key == key).unwrap().status
}

#[test]
fn test_single_edge_group_is_active() {
    let edges = vec![edge("only", "Garden/Well", "Garden/Gate", &["Dash"], 3.0)];
    let resolved = process_edges(&edges, &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "only"), EdgeStatus::Active);
}

#[test]
fn test_normalized_tie_marks_raw_superset_redundant() {
    // Walk is irrelevant, so both normalize to {Dash}; the raw superset
    // loses the tie-break.
    let edges = vec![
        edge("padded", "Garden/Well", "Garden/Gate", &["Walk", "Dash"], 10.0),
        edge("lean", "Garden/Well", "Garden/Gate", &["Dash"], 5.0),
    ];
    let resolved = process_edges(&edges, &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "padded"), EdgeStatus::Redundant);
    assert_eq!(status_of(&resolved, "lean"), EdgeStatus::Active);
}

#[test]
fn test_harder_requirements_go_redundant() {
    let edges = vec![
        edge("harder", "Garden/Well", "Garden/Gate", &["Dash", "Hookshot"], 2.0),
        edge("easier", "Garden/Well", "Garden/Gate", &["Dash"], 9.0),
    ];
    let resolved = process_edges(&edges, &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "harder"), EdgeStatus::Redundant);
    assert_eq!(status_of(&resolved, "easier"), EdgeStatus::Active);
}

#[test]
fn test_incomparable_edges_both_stay_active() {
    let edges = vec![
        edge("left", "Garden/Well", "Garden/Gate", &["Dash"], 1.0),
        edge("right", "Garden/Well", "Garden/Gate", &["Hookshot"], 2.0),
    ];
    let resolved = process_edges(&edges, &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "left"), EdgeStatus::Active);
    assert_eq!(status_of(&resolved, "right"), EdgeStatus::Active);
}

#[test]
fn test_opposite_directions_are_distinct_connections() {
    let edges = vec![
        edge("forward", "Garden/Well", "Garden/Gate", &["Dash"], 1.0),
        edge("back", "Garden/Gate", "Garden/Well", &["Dash"], 2.0),
    ];
    let resolved = process_edges(&edges, &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "forward"), EdgeStatus::Active);
    assert_eq!(status_of(&resolved, "back"), EdgeStatus::Active);
}

#[test]
fn test_process_edges_is_idempotent() {
    let edges = vec![
        edge("padded", "Garden/Well", "Garden/Gate", &["Walk", "Dash"], 10.0),
        edge("lean", "Garden/Well", "Garden/Gate", &["Dash"], 5.0),
        edge("other", "Garden/Gate", "Garden/Well", &["Hookshot"], 1.0),
    ];
    let options = ResolveOptions::default();
    let once = process_edges(&edges, &options);
    let mut twice = process_edges(&once, &options);

    let mut once = once;
    once.sort_by(|a, b| a.key.cmp(&b.key));
    twice.sort_by(|a, b| a.key.cmp(&b.key));
    assert_eq!(once, twice);
}

#[test]
fn test_caller_input_is_not_mutated() {
    let edges = vec![
        edge("padded", "Garden/Well", "Garden/Gate", &["Walk", "Dash"], 10.0),
        edge("lean", "Garden/Well", "Garden/Gate", &["Dash"], 5.0),
    ];
    let _ = process_edges(&edges, &ResolveOptions::default());
    assert_eq!(edges[0].status, EdgeStatus::Unverified);
    assert_eq!(edges[1].status, EdgeStatus::Unverified);
}

#[test]
fn test_manual_rejected_is_sticky_and_not_a_survivor() {
    let mut rejected = edge("rejected", "Garden/Well", "Garden/Gate", &["Dash"], 5.0);
    rejected.status = EdgeStatus::Rejected;
    // Would be subsumed by the rejected edge if it still counted as active.
    let padded = edge("padded", "Garden/Well", "Garden/Gate", &["Walk", "Dash"], 10.0);

    let resolved = process_edges(&[rejected, padded], &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "rejected"), EdgeStatus::Rejected);
    assert_eq!(status_of(&resolved, "padded"), EdgeStatus::Active);
}

#[test]
fn test_manual_active_is_sticky() {
    let mut pinned = edge("pinned", "Garden/Well", "Garden/Gate", &["Dash", "Hookshot"], 9.0);
    pinned.status = EdgeStatus::Active;
    let easier = edge("easier", "Garden/Well", "Garden/Gate", &["Dash"], 1.0);

    let resolved = process_edges(&[pinned, easier], &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "pinned"), EdgeStatus::Active);
    assert_eq!(status_of(&resolved, "easier"), EdgeStatus::Active);
}

#[test]
fn test_stale_redundant_is_repromoted() {
    let mut stale = edge("stale", "Garden/Well", "Garden/Gate", &["Dash"], 5.0);
    stale.status = EdgeStatus::Redundant;

    let resolved = process_edges(&[stale], &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "stale"), EdgeStatus::Active);
}

#[test]
fn test_disabled_edge_never_leaves_redundant() {
    let mut disabled = edge("disabled", "Garden/Well", "Garden/Gate", &["Dash"], 5.0);
    disabled.status = EdgeStatus::Redundant;

    let options = ResolveOptions {
        disabled: HashSet::from(["disabled".to_string()]),
        ..ResolveOptions::default()
    };
    let resolved = process_edges(&[disabled], &options);
    assert_eq!(status_of(&resolved, "disabled"), EdgeStatus::Redundant);
}

#[test]
fn test_disabled_survivor_lets_other_edges_resurface() {
    // First pass: the higher game time duplicate goes redundant.
    let edges = vec![
        edge("first", "Garden/Well", "Garden/Gate", &["Dash"], 10.0),
        edge("second", "Garden/Well", "Garden/Gate", &["Dash"], 5.0),
    ];
    let resolved = process_edges(&edges, &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "first"), EdgeStatus::Redundant);
    assert_eq!(status_of(&resolved, "second"), EdgeStatus::Active);

    // Preview deleting the survivor: it no longer counts as active for
    // comparisons, so the redundant edge comes back.
    let options = ResolveOptions {
        disabled: HashSet::from(["second".to_string()]),
        ..ResolveOptions::default()
    };
    let preview = process_edges(&resolved, &options);
    assert_eq!(status_of(&preview, "first"), EdgeStatus::Active);
}

#[test]
fn test_equal_game_time_resolves_by_key() {
    let edges = vec![
        edge("aaa", "Garden/Well", "Garden/Gate", &["Dash"], 5.0),
        edge("zzz", "Garden/Well", "Garden/Gate", &["Dash"], 5.0),
    ];
    let resolved = process_edges(&edges, &ResolveOptions::default());
    // The larger key is scanned first and goes redundant; reversing the
    // input order must not change the outcome.
    assert_eq!(status_of(&resolved, "zzz"), EdgeStatus::Redundant);
    assert_eq!(status_of(&resolved, "aaa"), EdgeStatus::Active);

    let reversed: Vec<Edge> = edges.into_iter().rev().collect();
    let resolved = process_edges(&reversed, &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "zzz"), EdgeStatus::Redundant);
    assert_eq!(status_of(&resolved, "aaa"), EdgeStatus::Active);
}

#[test]
fn test_ignored_overlay_refreshes_flags_both_ways() {
    let edges = vec![
        edge("one", "Garden/Well", "Garden/Gate", &["Dash"], 1.0),
        edge("two", "Garden/Gate", "Garden/Well", &["Dash"], 2.0),
    ];
    let overlay = vec![IgnoredConnection {
        source_node: "Garden/Well".to_string(),
        target_node: "Garden/Gate".to_string(),
    }];

    let options = ResolveOptions {
        ignored: Some(overlay),
        ..ResolveOptions::default()
    };
    let resolved = process_edges(&edges, &options);
    let one = resolved.iter().find(|e| e.key == "one").unwrap();
    let two = resolved.iter().find(|e| e.key == "two").unwrap();
    assert!(one.ignored);
    // Direction matters: the reverse connection is not covered.
    assert!(!two.ignored);
    // Ignored edges still get a status.
    assert_eq!(one.status, EdgeStatus::Active);

    let options = ResolveOptions {
        ignored: Some(Vec::new()),
        ..ResolveOptions::default()
    };
    let cleared = process_edges(&resolved, &options);
    assert!(cleared.iter().all(|e| !e.ignored));
}

#[test]
fn test_states_participate_in_subsumption() {
    let mut door_needed = edge("door", "Garden/Well", "Garden/Gate", &["Dash"], 8.0);
    door_needed.states = ["Garden/DoorOpen"].iter().map(|s| s.to_string()).collect();
    let free = edge("free", "Garden/Well", "Garden/Gate", &["Dash"], 2.0);

    let resolved = process_edges(&[door_needed, free], &ResolveOptions::default());
    assert_eq!(status_of(&resolved, "door"), EdgeStatus::Redundant);
    assert_eq!(status_of(&resolved, "free"), EdgeStatus::Active);
}
