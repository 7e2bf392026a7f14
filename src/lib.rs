//! Resona - an interactive graph of audio-emitting nodes
//!
//! Clicking one node arms it; clicking a second node toggles a connection
//! between the two, starting or stopping looping audio on the participants.
//! A second view lays a graph out with a force simulation and grows it
//! through a node-creation form.

pub mod audio;
pub mod editor;
pub mod graph;

// Re-export commonly used types
pub use audio::AudioSink;
pub use editor::App;
pub use graph::{Connection, GraphError, Node, NodeId, NodeSet, SceneGraph, Toggled};
