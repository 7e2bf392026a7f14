//! Editor shell: the two prototype views and the eframe update loop

pub mod camera;
pub mod force_view;
pub mod interaction;
pub mod scene_view;

pub use camera::OrbitCamera;
pub use force_view::ForceView;
pub use interaction::{ClickOutcome, InteractionState, Selection};
pub use scene_view::SceneView;

use eframe::egui;

use crate::audio::{AudioSink, NullSink, RodioSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Scene,
    Force,
}

/// Top-level application state: both prototypes plus the shared audio sink.
pub struct App {
    view: View,
    scene_view: SceneView,
    force_view: ForceView,
    audio: Box<dyn AudioSink>,
}

impl App {
    pub fn new() -> Self {
        let audio: Box<dyn AudioSink> = match RodioSink::new() {
            Ok(sink) => Box::new(sink),
            Err(err) => {
                log::warn!("no audio output available: {err}");
                Box::new(NullSink)
            }
        };
        Self {
            view: View::Scene,
            scene_view: SceneView::new(),
            force_view: ForceView::new(),
            audio,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint continuously: the force simulation and the rubber-band
        // line animate outside of input events.
        ctx.request_repaint();

        egui::TopBottomPanel::top("view_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Resona");
                ui.separator();
                ui.selectable_value(&mut self.view, View::Scene, "Scene");
                ui.selectable_value(&mut self.view, View::Force, "Force graph");
                ui.separator();
                match self.view {
                    View::Scene => {
                        ui.label(format!(
                            "{} connections",
                            self.scene_view.scene.connections().len()
                        ));
                        if let Some(armed) = self.scene_view.interaction.armed() {
                            ui.label(format!("armed: node {armed}"));
                        }
                    }
                    View::Force => {
                        ui.label(format!(
                            "{} nodes, {} links",
                            self.force_view.node_count(),
                            self.force_view.link_count()
                        ));
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Scene => self.scene_view.ui(ui, self.audio.as_mut()),
            View::Force => self.force_view.ui(ui),
        });
    }
}
