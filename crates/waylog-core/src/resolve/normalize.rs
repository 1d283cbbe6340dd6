use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::graph::Edge;

/// Manually flagged actions that never gate connectivity; dropped before
/// comparing edges.
pub const IRRELEVANT_ACTIONS: [&str; 11] = [
    "Walk",
    "Run",
    "StaminaRecharge",
    "DashAttack",
    "Parry",
    "Grind",
    "JumpUp",
    "CurvedJump",
    "RunningDodge",
    "RunningJump",
    "WallClimb",
];

/// Matches the parametrized broken-rock-block state, either capitalization.
const BROKEN_STATE_PATTERN: &str = r"Rock[Bb]lock_.*_Broken";
const BROKEN_STATE: &str = "RockBlock_Broken";

fn broken_state_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BROKEN_STATE_PATTERN).expect("pattern is valid"))
}

/// Returns a copy of `actions` without the traversal-irrelevant moves.
pub fn normalize_actions(actions: &BTreeSet<String>) -> BTreeSet<String> {
    actions
        .iter()
        .filter(|a| !IRRELEVANT_ACTIONS.contains(&a.as_str()))
        .cloned()
        .collect()
}

/// Canonicalizes an edge's state set for comparison.
///
/// Each state string loses a leading `"{source_scene}/"` prefix, then the
/// naming variants of the breakable-obstacle state collapse to one token.
/// The two rewrites commute.
pub fn normalize_states(edge: &Edge) -> BTreeSet<String> {
    let prefix = format!("{}/", edge.source_scene);
    edge.states
        .iter()
        .map(|state| canonical_state(state.strip_prefix(prefix.as_str()).unwrap_or(state.as_str())))
        .collect()
}

fn canonical_state(state: &str) -> String {
    let state = state.replace("Rockblock", "RockBlock");
    broken_state_regex()
        .replace_all(&state, BROKEN_STATE)
        .into_owned()
}
