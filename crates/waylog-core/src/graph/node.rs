use serde::{Deserialize, Serialize};

/// An in-game location observed in a movement log.
///
/// Nodes are immutable once created and replaced wholesale on reload. The
/// key is stable across re-imports of logs describing the same game world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier, derived from scene and in-scene location name.
    pub key: String,
    /// Scene the node belongs to.
    pub scene: String,
    /// Location label within the scene.
    pub location: String,
    /// Display position.
    pub x: f64,
    pub y: f64,
    pub height: f64,
}

impl Node {
    /// Creates a node, deriving its key from scene and location.
    pub fn new(
        scene: impl Into<String>,
        location: impl Into<String>,
        x: f64,
        y: f64,
        height: f64,
    ) -> Self {
        let scene = scene.into();
        let location = location.into();
        let key = Self::key_for(&scene, &location);
        Self {
            key,
            scene,
            location,
            x,
            y,
            height,
        }
    }

    /// The stable cross-log key for a scene/location pair.
    pub fn key_for(scene: &str, location: &str) -> String {
        format!("{scene}/{location}")
    }
}
