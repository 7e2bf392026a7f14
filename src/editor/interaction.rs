//! Click-driven selection and connection toggling

use crate::audio::AudioSink;
use crate::graph::{GraphError, NodeId, NodeSet, SceneGraph, Toggled};

/// Two-state selection machine: nothing armed, or exactly one node armed and
/// awaiting the second click of a connection toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Armed(NodeId),
}

/// What a resolved click did, reported for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Armed(NodeId),
    Disarmed(NodeId),
    Toggled {
        first: NodeId,
        second: NodeId,
        result: Toggled,
    },
}

/// Manages the transient selection and the node under the cursor. Clicks
/// that miss every node never reach [`InteractionState::handle_click`]; the
/// caller drops them, so a miss changes nothing.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    selection: Selection,
    pub hovered: Option<NodeId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn armed(&self) -> Option<NodeId> {
        match self.selection {
            Selection::Armed(id) => Some(id),
            Selection::Idle => None,
        }
    }

    /// Drives the machine with a click resolved to `clicked`. Arms an idle
    /// machine, disarms on a repeated click, and consumes the armed node
    /// into a connection toggle on a click of a different node.
    pub fn handle_click(
        &mut self,
        clicked: NodeId,
        scene: &mut SceneGraph,
        audio: &mut dyn AudioSink,
    ) -> Result<ClickOutcome, GraphError> {
        match self.selection {
            Selection::Idle => {
                self.selection = Selection::Armed(clicked);
                log::debug!("armed node {clicked}");
                Ok(ClickOutcome::Armed(clicked))
            }
            Selection::Armed(armed) if armed == clicked => {
                self.selection = Selection::Idle;
                log::debug!("disarmed node {clicked}");
                Ok(ClickOutcome::Disarmed(clicked))
            }
            Selection::Armed(armed) => {
                // The armed node is consumed whatever the toggle outcome.
                self.selection = Selection::Idle;
                let set = NodeSet::pair(armed, clicked)?;
                let result = scene.toggle(set, audio)?;
                log::info!("toggled {set}: {result:?}");
                Ok(ClickOutcome::Toggled {
                    first: armed,
                    second: clicked,
                    result,
                })
            }
        }
    }
}
