//! Orbit camera: yaw/pitch/distance around a target, perspective projection
//! into the egui canvas, and screen-space picking

use egui::{Pos2, Rect, Vec2};
use glam::{Mat4, Vec3};

use crate::graph::{NodeId, SceneGraph};

/// World-space radius of a node sphere.
pub const NODE_RADIUS: f32 = 0.3;

const FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;
const ROTATE_SPEED: f32 = 0.006;
const ZOOM_SPEED: f32 = 0.01;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 70.0;
const MAX_PITCH: f32 = 1.5;
const MIN_PICK_RADIUS: f32 = 6.0;

/// Camera orbiting a target point, driven by pointer drag and scroll.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + offset * self.distance
    }

    /// Orbits the camera by a pointer drag delta.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ROTATE_SPEED;
        self.pitch = (self.pitch + delta.y * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Zooms by a scroll delta, clamped to the orbit distance range.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * ZOOM_SPEED).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn view_proj(&self, viewport: Rect) -> Mat4 {
        let aspect = viewport.width() / viewport.height();
        let proj = Mat4::perspective_rh(FOV_Y, aspect, 0.1, 1000.0);
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        proj * view
    }

    /// Projects a world position into the viewport. Returns the screen
    /// position and the view depth, or `None` behind the camera.
    pub fn project(&self, world: Vec3, viewport: Rect) -> Option<(Pos2, f32)> {
        let clip = self.view_proj(viewport) * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let pos = Pos2::new(
            viewport.left() + (ndc_x + 1.0) * 0.5 * viewport.width(),
            viewport.top() + (1.0 - ndc_y) * 0.5 * viewport.height(),
        );
        Some((pos, clip.w))
    }

    /// Screen-space radius of a sphere of `world_radius` at `depth`.
    pub fn screen_radius(&self, world_radius: f32, depth: f32, viewport: Rect) -> f32 {
        let proj_scale = 1.0 / (FOV_Y * 0.5).tan();
        world_radius * proj_scale * viewport.height() * 0.5 / depth
    }

    /// Resolves a pointer position to the node under it, nearest-to-camera
    /// first. Returns `None` when the pointer misses every node.
    pub fn pick(&self, pointer: Pos2, viewport: Rect, scene: &SceneGraph) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for node in scene.nodes.values() {
            if let Some((pos, depth)) = self.project(node.position, viewport) {
                let radius = self
                    .screen_radius(NODE_RADIUS, depth, viewport)
                    .max(MIN_PICK_RADIUS);
                if (pointer - pos).length() <= radius && best.map_or(true, |(_, d)| depth < d) {
                    best = Some((node.id, depth));
                }
            }
        }
        best.map(|(id, _)| id)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_target_projects_to_viewport_center() {
        let camera = OrbitCamera::new();
        let (pos, depth) = camera.project(Vec3::ZERO, viewport()).unwrap();
        assert!((pos - viewport().center()).length() < 1e-3);
        assert!((depth - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        let camera = OrbitCamera::new();
        assert!(camera.project(Vec3::new(0.0, 0.0, 20.0), viewport()).is_none());
    }

    #[test]
    fn test_pick_prefers_node_nearest_to_camera() {
        let mut scene = SceneGraph::new();
        let near = scene.add_node(Node::new(0, "near", Vec3::ZERO));
        let _far = scene.add_node(Node::new(0, "far", Vec3::new(0.0, 0.0, -5.0)));

        let camera = OrbitCamera::new();
        assert_eq!(
            camera.pick(viewport().center(), viewport(), &scene),
            Some(near)
        );
    }

    #[test]
    fn test_pick_miss_returns_none() {
        let mut scene = SceneGraph::new();
        scene.add_node(Node::new(0, "node", Vec3::ZERO));

        let camera = OrbitCamera::new();
        assert_eq!(camera.pick(Pos2::new(10.0, 10.0), viewport(), &scene), None);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = OrbitCamera::new();
        camera.zoom(1.0e6);
        assert_eq!(camera.distance, MIN_DISTANCE);
        camera.zoom(-1.0e6);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }
}
