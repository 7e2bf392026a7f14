//! Node types and core node functionality

use egui::Color32;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = usize;

/// Audio resource attached to a node: a file to decode plus a fallback tone
/// frequency used when the file cannot be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioRef {
    pub path: String,
    pub fallback_hz: f32,
}

impl AudioRef {
    pub fn new(path: impl Into<String>, fallback_hz: f32) -> Self {
        Self {
            path: path.into(),
            fallback_hz,
        }
    }
}

/// Core node record: identity, spatial position (immutable after creation),
/// display color and audio resource. Hover/armed flags deliberately live in
/// the editor's visual-state map, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    pub position: Vec3,
    #[serde(with = "color32_serde")]
    pub color: Color32,
    pub audio: AudioRef,
}

impl Node {
    /// Creates a new node with the specified properties
    pub fn new(id: NodeId, title: impl Into<String>, position: Vec3) -> Self {
        Self {
            id,
            title: title.into(),
            position,
            color: Color32::from_rgb(160, 160, 160),
            audio: AudioRef::new("", 220.0),
        }
    }

    /// Sets the color of the node
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    /// Sets the audio resource of the node
    pub fn with_audio(mut self, audio: AudioRef) -> Self {
        self.audio = audio;
        self
    }
}

// Serde helper module for the egui color type
mod color32_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [color.r(), color.g(), color.b(), color.a()].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [r, g, b, a] = <[u8; 4]>::deserialize(deserializer)?;
        Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
    }
}
