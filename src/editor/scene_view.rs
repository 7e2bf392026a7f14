//! 3D scene view: orbiting camera over audio nodes, click-to-connect

use egui::{Color32, Pos2, Rect, Stroke, Ui};

use crate::audio::AudioSink;
use crate::graph::{AudioRef, Node, SceneGraph};

use super::camera::{OrbitCamera, NODE_RADIUS};
use super::interaction::InteractionState;

/// The scene prototype: a fixed set of audio-emitting nodes in 3D space,
/// connected and disconnected by clicking pairs of them.
pub struct SceneView {
    pub scene: SceneGraph,
    pub camera: OrbitCamera,
    pub interaction: InteractionState,
}

impl SceneView {
    pub fn new() -> Self {
        let mut view = Self {
            scene: SceneGraph::new(),
            camera: OrbitCamera::new(),
            interaction: InteractionState::new(),
        };
        view.add_demo_nodes();
        view
    }

    fn add_demo_nodes(&mut self) {
        let nodes = [
            ("Node 1", (-2.0, 0.0, -5.0), (245, 174, 108), "audio/loop1.ogg", 220.00),
            ("Node 2", (2.0, 0.0, -5.0), (255, 165, 0), "audio/loop2.ogg", 261.63),
            ("Node 3", (0.0, 2.0, -5.0), (255, 192, 203), "audio/loop3.ogg", 329.63),
            ("Node 4", (-4.0, 0.0, -7.0), (242, 204, 85), "audio/loop1.ogg", 196.00),
            ("Node 5", (3.0, 0.0, -3.0), (242, 132, 85), "audio/loop2.ogg", 246.94),
            ("Node 6", (1.0, 2.0, 3.0), (242, 185, 85), "audio/loop3.ogg", 392.00),
        ];
        for (title, (x, y, z), (r, g, b), path, hz) in nodes {
            self.scene.add_node(
                Node::new(0, title, glam::Vec3::new(x, y, z))
                    .with_color(Color32::from_rgb(r, g, b))
                    .with_audio(AudioRef::new(path, hz)),
            );
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, audio: &mut dyn AudioSink) {
        let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
        let viewport = response.rect;

        // Camera controls: drag to orbit, scroll to zoom.
        if response.dragged() {
            self.camera.rotate(response.drag_delta());
        }
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 && response.hovered() {
            self.camera.zoom(scroll);
        }

        let pointer = ui.input(|i| i.pointer.hover_pos());

        // Hover is derived state, resolved afresh every frame.
        self.interaction.hovered = pointer
            .filter(|p| viewport.contains(*p))
            .and_then(|p| self.camera.pick(p, viewport, &self.scene));

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                // A click that misses every node changes nothing.
                if let Some(node_id) = self.camera.pick(pos, viewport, &self.scene) {
                    if let Err(err) =
                        self.interaction
                            .handle_click(node_id, &mut self.scene, audio)
                    {
                        log::warn!("click on node {node_id} ignored: {err}");
                    }
                }
            }
        }

        self.draw(ui.painter(), viewport, pointer);
    }

    fn draw(&self, painter: &egui::Painter, viewport: Rect, pointer: Option<Pos2>) {
        painter.rect_filled(viewport, 0.0, Color32::from_rgb(12, 12, 20));

        let line_stroke = Stroke::new(1.5, Color32::GRAY);

        // Established connections: one segment per owned edge record.
        for conn in self.scene.connections() {
            for &(a, b) in conn.edges() {
                let (Some(na), Some(nb)) = (self.scene.nodes.get(&a), self.scene.nodes.get(&b))
                else {
                    continue;
                };
                if let (Some((pa, _)), Some((pb, _))) = (
                    self.camera.project(na.position, viewport),
                    self.camera.project(nb.position, viewport),
                ) {
                    painter.line_segment([pa, pb], line_stroke);
                }
            }
        }

        // Rubber-band line from the armed node to the cursor.
        if let (Some(armed), Some(pointer)) = (self.interaction.armed(), pointer) {
            if let Some(node) = self.scene.nodes.get(&armed) {
                if let Some((pos, _)) = self.camera.project(node.position, viewport) {
                    painter.line_segment([pos, pointer], line_stroke);
                }
            }
        }

        // Nodes, farthest first so near spheres overdraw far ones.
        let mut projected: Vec<(&Node, Pos2, f32)> = self
            .scene
            .nodes
            .values()
            .filter_map(|node| {
                self.camera
                    .project(node.position, viewport)
                    .map(|(pos, depth)| (node, pos, depth))
            })
            .collect();
        projected.sort_by(|a, b| b.2.total_cmp(&a.2));

        for (node, pos, depth) in projected {
            let radius = self.camera.screen_radius(NODE_RADIUS, depth, viewport);
            let armed = self.interaction.armed() == Some(node.id);
            let hovered = self.interaction.hovered == Some(node.id);

            if armed {
                // Emissive glow around the armed node.
                painter.circle_filled(pos, radius * 2.2, node.color.gamma_multiply(0.15));
                painter.circle_filled(pos, radius * 1.5, node.color.gamma_multiply(0.35));
            }

            let fill = if hovered { lighten(node.color) } else { node.color };
            painter.circle_filled(pos, radius, fill);
            if armed {
                painter.circle_stroke(pos, radius + 2.0, Stroke::new(2.0, Color32::WHITE));
            }
        }
    }
}

impl Default for SceneView {
    fn default() -> Self {
        Self::new()
    }
}

fn lighten(color: Color32) -> Color32 {
    Color32::from_rgb(
        color.r().saturating_add(0x44),
        color.g().saturating_add(0x44),
        color.b().saturating_add(0x44),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_starts_unconnected() {
        let view = SceneView::new();
        assert_eq!(view.scene.nodes.len(), 6);
        assert_eq!(view.scene.connections().len(), 0);
        assert!(view.interaction.armed().is_none());
    }
}
