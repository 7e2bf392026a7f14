//! Audio playback seam: fire-and-forget looping playback per node

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::graph::{Node, NodeId};

/// Playback collaborator consumed by the scene graph. Calls are
/// fire-and-forget; implementations log failures and never propagate them.
pub trait AudioSink {
    /// Begins looping playback for a node. A no-op when already playing.
    fn play(&mut self, node: &Node);

    /// Stops playback for a node. A no-op when not playing.
    fn stop(&mut self, node_id: NodeId);
}

/// Rodio-backed sink keeping one looping `Sink` per playing node. Decodes
/// the node's audio file when possible and falls back to a sine tone so the
/// demo stays audible without bundled assets.
pub struct RodioSink {
    // Dropping the stream silences every sink; keep it for the app lifetime.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    playing: HashMap<NodeId, Sink>,
}

impl RodioSink {
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            playing: HashMap::new(),
        })
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self, node: &Node) {
        if self.playing.contains_key(&node.id) {
            return;
        }
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::warn!("audio output unavailable: {err}");
                return;
            }
        };
        let decoded = File::open(&node.audio.path)
            .ok()
            .and_then(|file| Decoder::new(BufReader::new(file)).ok());
        match decoded {
            Some(source) => sink.append(source.repeat_infinite().amplify(0.5)),
            None => {
                log::warn!(
                    "could not load '{}' for node {}; falling back to a {} Hz tone",
                    node.audio.path,
                    node.id,
                    node.audio.fallback_hz
                );
                sink.append(SineWave::new(node.audio.fallback_hz).amplify(0.2));
            }
        }
        log::debug!("audio started for node {}", node.id);
        self.playing.insert(node.id, sink);
    }

    fn stop(&mut self, node_id: NodeId) {
        if let Some(sink) = self.playing.remove(&node_id) {
            sink.stop();
            log::debug!("audio stopped for node {node_id}");
        }
    }
}

/// Silent sink used when no audio device is available.
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _node: &Node) {}

    fn stop(&mut self, _node_id: NodeId) {}
}

/// Test sink recording the play/stop call sequence.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AudioEvent>,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Play(NodeId),
    Stop(NodeId),
}

#[cfg(test)]
impl AudioSink for RecordingSink {
    fn play(&mut self, node: &Node) {
        self.events.push(AudioEvent::Play(node.id));
    }

    fn stop(&mut self, node_id: NodeId) {
        self.events.push(AudioEvent::Stop(node_id));
    }
}
