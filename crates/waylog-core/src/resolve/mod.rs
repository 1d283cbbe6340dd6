//! The edge-redundancy resolution engine.
//!
//! Given every observed traversal for a connection, decides which edges are
//! logically subsumed by easier ones ([`process_edges`]) and which are
//! literal repeat recordings safe to bulk-delete ([`duplicate_edges`]).
//! The engine is pure: it clones its input and never touches caller-visible
//! state, so concurrent calls over the same base data cannot interfere.

mod duplicates;
mod normalize;
mod status;
mod subsume;

pub use duplicates::duplicate_edges;
pub use normalize::{normalize_actions, normalize_states, IRRELEVANT_ACTIONS};
pub use status::{process_edges, ResolveOptions};
pub use subsume::subsumes;
