//! Connections: unordered 2- or 3-node sets with their owned edge records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::GraphError;
use super::node::NodeId;

/// An unordered set of two or three distinct node ids. Construction rejects
/// repeated members; equality ignores member order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum NodeSet {
    Pair([NodeId; 2]),
    Triad([NodeId; 3]),
}

impl NodeSet {
    /// Builds a two-node set, rejecting a node paired with itself.
    pub fn pair(a: NodeId, b: NodeId) -> Result<Self, GraphError> {
        if a == b {
            return Err(GraphError::InvalidOperation(format!(
                "cannot connect node {a} to itself"
            )));
        }
        Ok(Self::Pair([a, b]))
    }

    /// Builds a three-node set, rejecting any repeated member.
    pub fn triad(a: NodeId, b: NodeId, c: NodeId) -> Result<Self, GraphError> {
        if a == b || b == c || a == c {
            return Err(GraphError::InvalidOperation(format!(
                "triad {a}-{b}-{c} repeats a node"
            )));
        }
        Ok(Self::Triad([a, b, c]))
    }

    pub fn members(&self) -> &[NodeId] {
        match self {
            NodeSet::Pair(m) => m,
            NodeSet::Triad(m) => m,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.members().contains(&id)
    }
}

// Logical identity: same arity and same members, order-independent.
impl PartialEq for NodeSet {
    fn eq(&self, other: &Self) -> bool {
        self.members().len() == other.members().len()
            && other.members().iter().all(|&m| self.contains(m))
    }
}

impl Eq for NodeSet {}

impl fmt::Display for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut members = self.members().iter();
        if let Some(first) = members.next() {
            write!(f, "{first}")?;
        }
        for m in members {
            write!(f, "-{m}")?;
        }
        Ok(())
    }
}

/// A stored connection: the unordered node set plus the pairwise edge
/// segments drawn for it. A pair owns one segment; a triad owns the three
/// sides of its triangle. The segments are created and removed as a unit
/// with the connection entry, so no ordering constraint ties them to other
/// connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    set: NodeSet,
    edges: Vec<(NodeId, NodeId)>,
}

impl Connection {
    /// Creates a connection for the given set, deriving its edge records.
    pub fn new(set: NodeSet) -> Self {
        let edges = match set {
            NodeSet::Pair([a, b]) => vec![(a, b)],
            NodeSet::Triad([a, b, c]) => vec![(a, b), (b, c), (c, a)],
        };
        Self { set, edges }
    }

    pub fn set(&self) -> NodeSet {
        self.set
    }

    /// The pairwise segments the renderer draws for this connection.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn involves(&self, id: NodeId) -> bool {
        self.set.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_equality_ignores_order() {
        let ab = NodeSet::pair(1, 2).unwrap();
        let ba = NodeSet::pair(2, 1).unwrap();
        assert_eq!(ab, ba);
        assert_ne!(ab, NodeSet::pair(1, 3).unwrap());
    }

    #[test]
    fn test_triad_equality_ignores_order() {
        let abc = NodeSet::triad(1, 2, 3).unwrap();
        let cab = NodeSet::triad(3, 1, 2).unwrap();
        assert_eq!(abc, cab);
        assert_ne!(abc, NodeSet::triad(1, 2, 4).unwrap());
    }

    #[test]
    fn test_pair_never_equals_triad() {
        let pair = NodeSet::pair(1, 2).unwrap();
        let triad = NodeSet::triad(1, 2, 3).unwrap();
        assert_ne!(pair, triad);
        assert_ne!(triad, pair);
    }

    #[test]
    fn test_degenerate_sets_rejected() {
        assert!(NodeSet::pair(1, 1).is_err());
        assert!(NodeSet::triad(1, 1, 2).is_err());
        assert!(NodeSet::triad(1, 2, 2).is_err());
        assert!(NodeSet::triad(2, 1, 2).is_err());
    }

    #[test]
    fn test_pair_owns_one_edge_record() {
        let conn = Connection::new(NodeSet::pair(1, 2).unwrap());
        assert_eq!(conn.edges(), &[(1, 2)]);
    }

    #[test]
    fn test_triad_owns_three_edge_records() {
        let conn = Connection::new(NodeSet::triad(1, 2, 3).unwrap());
        assert_eq!(conn.edges(), &[(1, 2), (2, 3), (3, 1)]);
    }
}
