//! Graph data model: nodes, connections, and the owning scene graph

pub mod connection;
pub mod error;
pub mod node;
pub mod scene;

// Re-export core types
pub use connection::{Connection, NodeSet};
pub use error::GraphError;
pub use node::{AudioRef, Node, NodeId};
pub use scene::{SceneGraph, Toggled};
