//! chargen-import - a character-import dialog flow built with egui
//!
//! Architecture:
//! - Main thread: runs the egui shell and the script runner
//! - Scripts drive an in-memory window engine through the UiHost trait
//! - Button presses flow shell -> runner via crossbeam channels

use eframe::egui;

use chargen_import::app::ImportApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 420.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Character Import",
        options,
        Box::new(|cc| Ok(Box::new(ImportApp::new(cc)))),
    )
}
