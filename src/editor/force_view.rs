//! Force-directed prototype: simulated layout, click-to-link, and a
//! node-creation form

use std::path::PathBuf;

use egui::{Align2, Color32, FontId, Pos2, Stroke, Ui, Vec2};
use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

const COLORS: &[Color32] = &[
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0xd6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
    Color32::from_rgb(0xe3, 0x77, 0xc2),
    Color32::from_rgb(0xbc, 0xbd, 0x22),
    Color32::from_rgb(0x17, 0xbe, 0xcf),
];

const NODE_RADIUS: f32 = 8.0;
const HIT_RADIUS: f32 = 12.0;
const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(70, 126, 178, 160);

/// Payload carried by every simulated node.
#[derive(Debug, Clone)]
pub struct ForceNodeInfo {
    pub id: String,
    pub color: Color32,
    pub text: String,
    pub audio: Option<PathBuf>,
    pub image: Option<PathBuf>,
}

/// State of the add-node form.
#[derive(Default)]
struct AddNodeForm {
    id: String,
    text: String,
    audio: Option<PathBuf>,
    image: Option<PathBuf>,
    error: Option<String>,
}

/// The alternate prototype: nodes created through a form, laid out by a
/// force simulation, linked by clicking two of them in sequence.
pub struct ForceView {
    graph: ForceGraph<ForceNodeInfo, ()>,
    ids: Vec<(String, DefaultNodeIdx)>,
    edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
    armed: Option<DefaultNodeIdx>,
    shown: Option<DefaultNodeIdx>,
    dragging: Option<DefaultNodeIdx>,
    hovered: Option<DefaultNodeIdx>,
    form: AddNodeForm,
}

impl ForceView {
    pub fn new() -> Self {
        // Simulation parameters follow the tuning that reads well for small
        // hand-built graphs.
        let graph = ForceGraph::new(SimulationParameters {
            force_charge: 150.0,
            force_spring: 0.05,
            force_max: 100.0,
            node_speed: 3000.0,
            damping_factor: 0.9,
        });
        Self {
            graph,
            ids: Vec::new(),
            edges: Vec::new(),
            armed: None,
            shown: None,
            dragging: None,
            hovered: None,
            form: AddNodeForm::default(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn link_count(&self) -> usize {
        self.edges.len()
    }

    /// Appends a node, seeding it on a ring around the layout origin.
    pub fn add_node(&mut self, info: ForceNodeInfo) -> DefaultNodeIdx {
        let i = self.ids.len();
        let angle = i as f32 * std::f32::consts::TAU / 8.0;
        let id = info.id.clone();
        let idx = self.graph.add_node(NodeData {
            x: 100.0 * angle.cos(),
            y: 100.0 * angle.sin(),
            mass: 10.0,
            is_anchor: false,
            user_data: info,
        });
        self.ids.push((id, idx));
        idx
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.ids.iter().any(|(existing, _)| existing == id)
    }

    /// Links two simulated nodes; repeated links are dropped.
    pub fn link(&mut self, a: DefaultNodeIdx, b: DefaultNodeIdx) {
        if a == b {
            return;
        }
        if self
            .edges
            .iter()
            .any(|&(s, t)| (s == a && t == b) || (s == b && t == a))
        {
            return;
        }
        self.graph.add_edge(a, b, EdgeData::default());
        self.edges.push((a, b));
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        egui::SidePanel::right("force_panel")
            .resizable(false)
            .default_width(260.0)
            .show_inside(ui, |ui| {
                self.form_ui(ui);
                ui.separator();
                self.content_ui(ui);
            });
        egui::CentralPanel::default().show_inside(ui, |ui| self.canvas_ui(ui));
    }

    fn canvas_ui(&mut self, ui: &mut Ui) {
        let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
        let center = response.rect.center();

        let dt = ui.input(|i| i.stable_dt).min(0.064);
        self.graph.update(dt);

        self.hovered = ui
            .input(|i| i.pointer.hover_pos())
            .filter(|p| response.rect.contains(*p))
            .and_then(|p| self.node_at(p, center));

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.dragging = self.node_at(pos, center);
            }
        }
        if response.dragged() {
            if let Some(idx) = self.dragging {
                let delta = response.drag_delta();
                self.graph.visit_nodes_mut(|node| {
                    if node.index() == idx {
                        node.data.x += delta.x;
                        node.data.y += delta.y;
                        node.data.is_anchor = true;
                    }
                });
            }
        }
        if response.drag_stopped() {
            self.dragging = None;
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                match self.node_at(pos, center) {
                    Some(idx) => self.handle_node_click(idx),
                    // Misses close the content panel but leave the armed
                    // node untouched.
                    None => self.shown = None,
                }
            }
        }

        self.draw(ui.painter(), response.rect, center);
    }

    fn handle_node_click(&mut self, clicked: DefaultNodeIdx) {
        self.shown = Some(clicked);
        match self.armed {
            None => self.armed = Some(clicked),
            Some(armed) if armed == clicked => self.armed = None,
            Some(armed) => {
                self.link(armed, clicked);
                log::info!("linked force-view nodes");
                self.armed = None;
            }
        }
    }

    fn node_at(&self, pointer: Pos2, center: Pos2) -> Option<DefaultNodeIdx> {
        let mut found = None;
        self.graph.visit_nodes(|node| {
            let pos = center + Vec2::new(node.x(), node.y());
            if (pointer - pos).length() < HIT_RADIUS {
                found = Some(node.index());
            }
        });
        found
    }

    fn node_info(&self, idx: DefaultNodeIdx) -> Option<ForceNodeInfo> {
        let mut found = None;
        self.graph.visit_nodes(|node| {
            if node.index() == idx {
                found = Some(node.data.user_data.clone());
            }
        });
        found
    }

    fn draw(&self, painter: &egui::Painter, rect: egui::Rect, center: Pos2) {
        painter.rect_filled(rect, 0.0, Color32::from_rgb(26, 26, 46));

        self.graph.visit_edges(|a, b, _| {
            let pa = center + Vec2::new(a.x(), a.y());
            let pb = center + Vec2::new(b.x(), b.y());
            painter.line_segment([pa, pb], Stroke::new(1.5, EDGE_COLOR));
        });

        let armed = self.armed;
        let hovered = self.hovered;
        self.graph.visit_nodes(|node| {
            let pos = center + Vec2::new(node.x(), node.y());
            let info = &node.data.user_data;
            let radius = if hovered == Some(node.index()) {
                NODE_RADIUS + 2.0
            } else {
                NODE_RADIUS
            };
            painter.circle_filled(pos, radius, info.color);
            if armed == Some(node.index()) {
                painter.circle_stroke(pos, radius + 3.0, Stroke::new(2.0, Color32::WHITE));
            }
            painter.text(
                pos + Vec2::new(0.0, radius + 4.0),
                Align2::CENTER_TOP,
                &info.id,
                FontId::proportional(11.0),
                Color32::LIGHT_GRAY,
            );
        });
    }

    fn form_ui(&mut self, ui: &mut Ui) {
        ui.heading("Add node");
        ui.label("Id");
        ui.text_edit_singleline(&mut self.form.id);
        ui.label("Text");
        ui.text_edit_multiline(&mut self.form.text);

        ui.horizontal(|ui| {
            if ui.button("Audio file…").clicked() {
                self.form.audio = rfd::FileDialog::new()
                    .add_filter("audio", &["mp3", "ogg", "wav", "flac"])
                    .pick_file();
            }
            if let Some(path) = &self.form.audio {
                ui.label(file_name(path));
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Image file…").clicked() {
                self.form.image = rfd::FileDialog::new()
                    .add_filter("image", &["png", "jpg", "jpeg", "gif"])
                    .pick_file();
            }
            if let Some(path) = &self.form.image {
                ui.label(file_name(path));
            }
        });

        if ui.button("Add").clicked() {
            self.submit_form();
        }
        if let Some(error) = &self.form.error {
            ui.colored_label(Color32::LIGHT_RED, error);
        }
    }

    fn submit_form(&mut self) {
        let id = self.form.id.trim().to_string();
        if id.is_empty() {
            self.form.error = Some("an id is required".into());
            return;
        }
        if self.has_node(&id) {
            self.form.error = Some(format!("node '{id}' already exists"));
            return;
        }
        let info = ForceNodeInfo {
            id: id.clone(),
            color: COLORS[self.ids.len() % COLORS.len()],
            text: self.form.text.trim().to_string(),
            audio: self.form.audio.take(),
            image: self.form.image.take(),
        };
        self.add_node(info);
        log::info!("added force-view node '{id}'");
        self.form.id.clear();
        self.form.text.clear();
        self.form.error = None;
    }

    fn content_ui(&mut self, ui: &mut Ui) {
        let Some(info) = self.shown.and_then(|idx| self.node_info(idx)) else {
            ui.label("Click a node to see its content.");
            return;
        };
        ui.heading(&info.id);
        if info.text.is_empty() {
            ui.label("No text available.");
        } else {
            ui.label(&info.text);
        }
        if let Some(path) = &info.audio {
            ui.label(format!("Audio: {}", file_name(path)));
        }
        if let Some(path) = &info.image {
            ui.label(format!("Image: {}", file_name(path)));
        }
    }
}

impl Default for ForceView {
    fn default() -> Self {
        Self::new()
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str) -> ForceNodeInfo {
        ForceNodeInfo {
            id: id.to_string(),
            color: COLORS[0],
            text: String::new(),
            audio: None,
            image: None,
        }
    }

    #[test]
    fn test_add_node_tracks_ids() {
        let mut view = ForceView::new();
        view.add_node(info("alpha"));
        view.add_node(info("beta"));
        assert_eq!(view.node_count(), 2);
        assert!(view.has_node("alpha"));
        assert!(!view.has_node("gamma"));
    }

    #[test]
    fn test_link_drops_duplicates_and_self_links() {
        let mut view = ForceView::new();
        let a = view.add_node(info("alpha"));
        let b = view.add_node(info("beta"));

        view.link(a, b);
        view.link(b, a);
        view.link(a, a);
        assert_eq!(view.link_count(), 1);
    }

    #[test]
    fn test_click_sequence_links_two_nodes() {
        let mut view = ForceView::new();
        let a = view.add_node(info("alpha"));
        let b = view.add_node(info("beta"));

        view.handle_node_click(a);
        assert_eq!(view.armed, Some(a));
        view.handle_node_click(b);
        assert_eq!(view.armed, None);
        assert_eq!(view.link_count(), 1);
        assert_eq!(view.shown, Some(b));
    }

    #[test]
    fn test_clicking_armed_node_disarms_without_linking() {
        let mut view = ForceView::new();
        let a = view.add_node(info("alpha"));

        view.handle_node_click(a);
        view.handle_node_click(a);
        assert_eq!(view.armed, None);
        assert_eq!(view.link_count(), 0);
    }
}
