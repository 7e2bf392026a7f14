//! Scene graph: owns the nodes and the ordered connection list

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::audio::AudioSink;

use super::connection::{Connection, NodeSet};
use super::error::GraphError;
use super::node::{Node, NodeId};

/// What a toggle call did to the connection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Created,
    Removed,
}

/// The owning repository for nodes and connections. Connections are kept in
/// insertion order; logical identity is the unordered node set, and toggle
/// semantics guarantee no two stored connections share a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneGraph {
    pub nodes: HashMap<NodeId, Node>,
    connections: Vec<Connection>,
    next_node_id: NodeId,
}

impl SceneGraph {
    /// Creates a new empty scene graph
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            connections: Vec::new(),
            next_node_id: 0,
        }
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Removes a node along with every connection involving it, stopping
    /// audio for participants left without a connection.
    pub fn remove_node(&mut self, node_id: NodeId, audio: &mut dyn AudioSink) -> Option<Node> {
        let involved: Vec<NodeSet> = self
            .connections
            .iter()
            .filter(|conn| conn.involves(node_id))
            .map(|conn| conn.set())
            .collect();
        for set in involved {
            self.remove(set, audio);
        }
        self.nodes.remove(&node_id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Index of the first stored connection matching the unordered set.
    pub fn find(&self, set: NodeSet) -> Option<usize> {
        self.connections.iter().position(|conn| conn.set() == set)
    }

    /// Removes the connection matching `set` if one exists, otherwise
    /// creates it. Returns which of the two happened.
    pub fn toggle(
        &mut self,
        set: NodeSet,
        audio: &mut dyn AudioSink,
    ) -> Result<Toggled, GraphError> {
        if self.remove(set, audio).is_some() {
            Ok(Toggled::Removed)
        } else {
            self.create(set, audio)?;
            Ok(Toggled::Created)
        }
    }

    /// Appends a connection for the set and starts audio playback on every
    /// participant. A triad produces its three pairwise edge records as a
    /// unit, stored with the connection entry.
    pub fn create(&mut self, set: NodeSet, audio: &mut dyn AudioSink) -> Result<(), GraphError> {
        for &id in set.members() {
            if !self.nodes.contains_key(&id) {
                return Err(GraphError::NodeNotFound(id));
            }
        }
        self.connections.push(Connection::new(set));
        for &id in set.members() {
            if let Some(node) = self.nodes.get(&id) {
                audio.play(node);
            }
        }
        log::debug!("created connection {set}");
        Ok(())
    }

    /// Removes the first connection matching the unordered set, with all of
    /// its edge records. Audio stops only for participants that are members
    /// of no remaining connection. Absent connections are a silent no-op.
    pub fn remove(&mut self, set: NodeSet, audio: &mut dyn AudioSink) -> Option<Connection> {
        let index = self.find(set)?;
        let removed = self.connections.remove(index);
        for &id in removed.set().members() {
            if !self.is_connected(id) {
                audio.stop(id);
            }
        }
        log::debug!("removed connection {set}");
        Some(removed)
    }

    /// Whether the node is a member of any stored connection.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.connections.iter().any(|conn| conn.involves(id))
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioEvent, RecordingSink};
    use glam::Vec3;

    fn scene_with_nodes(count: usize) -> SceneGraph {
        let mut scene = SceneGraph::new();
        for i in 0..count {
            scene.add_node(Node::new(
                0,
                format!("Node {i}"),
                Vec3::new(i as f32, 0.0, -5.0),
            ));
        }
        scene
    }

    fn pair(a: NodeId, b: NodeId) -> NodeSet {
        NodeSet::pair(a, b).unwrap()
    }

    fn triad(a: NodeId, b: NodeId, c: NodeId) -> NodeSet {
        NodeSet::triad(a, b, c).unwrap()
    }

    #[test]
    fn test_toggle_creates_then_removes() {
        let mut scene = scene_with_nodes(2);
        let mut audio = RecordingSink::default();

        assert_eq!(scene.toggle(pair(0, 1), &mut audio), Ok(Toggled::Created));
        assert_eq!(scene.connections().len(), 1);
        assert_eq!(scene.toggle(pair(0, 1), &mut audio), Ok(Toggled::Removed));
        assert_eq!(scene.connections().len(), 0);
    }

    #[test]
    fn test_toggle_pair_restores_prior_state() {
        let mut scene = scene_with_nodes(3);
        let mut audio = RecordingSink::default();
        scene.create(pair(1, 2), &mut audio).unwrap();

        let before = scene.connections().to_vec();
        scene.toggle(pair(0, 2), &mut audio).unwrap();
        scene.toggle(pair(0, 2), &mut audio).unwrap();
        assert_eq!(scene.connections(), before.as_slice());
    }

    #[test]
    fn test_create_then_remove_counts() {
        let mut scene = scene_with_nodes(2);
        let mut audio = RecordingSink::default();

        scene.create(pair(0, 1), &mut audio).unwrap();
        let matches = scene
            .connections()
            .iter()
            .filter(|conn| conn.set() == pair(1, 0))
            .count();
        assert_eq!(matches, 1);

        assert!(scene.remove(pair(0, 1), &mut audio).is_some());
        assert!(scene.find(pair(0, 1)).is_none());
    }

    #[test]
    fn test_match_is_order_independent() {
        let mut scene = scene_with_nodes(2);
        let mut audio = RecordingSink::default();
        scene.create(pair(0, 1), &mut audio).unwrap();
        assert!(scene.find(pair(1, 0)).is_some());
    }

    #[test]
    fn test_triad_edge_records_live_and_die_together() {
        let mut scene = scene_with_nodes(3);
        let mut audio = RecordingSink::default();

        scene.toggle(triad(0, 1, 2), &mut audio).unwrap();
        assert_eq!(scene.connections().len(), 1);
        assert_eq!(scene.connections()[0].edges().len(), 3);

        // Same set, different member order.
        scene.toggle(triad(1, 2, 0), &mut audio).unwrap();
        assert_eq!(scene.connections().len(), 0);
    }

    #[test]
    fn test_triad_interleaved_with_pairs() {
        let mut scene = scene_with_nodes(5);
        let mut audio = RecordingSink::default();

        scene.toggle(triad(0, 1, 2), &mut audio).unwrap();
        scene.toggle(pair(3, 4), &mut audio).unwrap();
        scene.toggle(triad(0, 1, 2), &mut audio).unwrap();

        // Only the pair remains, with its single edge record intact.
        assert_eq!(scene.connections().len(), 1);
        assert_eq!(scene.connections()[0].set(), pair(3, 4));
        assert_eq!(scene.connections()[0].edges().len(), 1);
    }

    #[test]
    fn test_remove_missing_is_silent_noop() {
        let mut scene = scene_with_nodes(2);
        let mut audio = RecordingSink::default();

        assert!(scene.remove(pair(0, 1), &mut audio).is_none());
        assert!(audio.events.is_empty());
    }

    #[test]
    fn test_create_with_unknown_node_fails() {
        let mut scene = scene_with_nodes(2);
        let mut audio = RecordingSink::default();

        let err = scene.create(pair(0, 9), &mut audio).unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound(9));
        assert_eq!(scene.connections().len(), 0);
        assert!(audio.events.is_empty());
    }

    #[test]
    fn test_toggle_scenario_sequence() {
        let mut scene = scene_with_nodes(4);
        let mut audio = RecordingSink::default();

        scene.toggle(pair(1, 2), &mut audio).unwrap();
        assert_eq!(
            scene
                .connections()
                .iter()
                .map(|c| c.set())
                .collect::<Vec<_>>(),
            vec![pair(1, 2)]
        );

        scene.toggle(pair(1, 3), &mut audio).unwrap();
        assert_eq!(
            scene
                .connections()
                .iter()
                .map(|c| c.set())
                .collect::<Vec<_>>(),
            vec![pair(1, 2), pair(1, 3)]
        );

        scene.toggle(pair(1, 2), &mut audio).unwrap();
        assert_eq!(
            scene
                .connections()
                .iter()
                .map(|c| c.set())
                .collect::<Vec<_>>(),
            vec![pair(1, 3)]
        );
    }

    #[test]
    fn test_audio_starts_on_create_and_stops_on_remove() {
        let mut scene = scene_with_nodes(2);
        let mut audio = RecordingSink::default();

        scene.create(pair(0, 1), &mut audio).unwrap();
        assert_eq!(audio.events, vec![AudioEvent::Play(0), AudioEvent::Play(1)]);

        scene.remove(pair(0, 1), &mut audio);
        assert_eq!(
            audio.events,
            vec![
                AudioEvent::Play(0),
                AudioEvent::Play(1),
                AudioEvent::Stop(0),
                AudioEvent::Stop(1),
            ]
        );
    }

    #[test]
    fn test_shared_node_keeps_playing_until_last_connection() {
        let mut scene = scene_with_nodes(3);
        let mut audio = RecordingSink::default();

        scene.create(pair(0, 1), &mut audio).unwrap();
        scene.create(pair(0, 2), &mut audio).unwrap();
        audio.events.clear();

        // Node 0 still belongs to {0,2}; only node 1 falls silent.
        scene.remove(pair(0, 1), &mut audio);
        assert_eq!(audio.events, vec![AudioEvent::Stop(1)]);

        scene.remove(pair(0, 2), &mut audio);
        assert_eq!(
            audio.events,
            vec![AudioEvent::Stop(1), AudioEvent::Stop(0), AudioEvent::Stop(2)]
        );
    }

    #[test]
    fn test_triad_audio_plays_all_three() {
        let mut scene = scene_with_nodes(3);
        let mut audio = RecordingSink::default();

        scene.create(triad(0, 1, 2), &mut audio).unwrap();
        assert_eq!(
            audio.events,
            vec![
                AudioEvent::Play(0),
                AudioEvent::Play(1),
                AudioEvent::Play(2),
            ]
        );
    }

    #[test]
    fn test_remove_node_drops_its_connections() {
        let mut scene = scene_with_nodes(3);
        let mut audio = RecordingSink::default();

        scene.create(pair(0, 1), &mut audio).unwrap();
        scene.create(pair(1, 2), &mut audio).unwrap();

        assert!(scene.remove_node(1, &mut audio).is_some());
        assert_eq!(scene.connections().len(), 0);
        assert!(!scene.nodes.contains_key(&1));
    }
}
