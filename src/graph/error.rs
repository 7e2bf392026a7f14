//! Error taxonomy for graph operations

use thiserror::Error;

use super::node::NodeId;

/// Failures a graph operation can report. Removing a connection that does
/// not exist is a silent no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Degenerate input, e.g. a node connected to itself.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A referenced node is not part of the graph.
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),
}
