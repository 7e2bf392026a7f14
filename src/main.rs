//! Resona application entry point

use eframe::egui;
use resona::App;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Resona",
        options,
        Box::new(|_cc| Ok(Box::new(App::new()))),
    )
}
