//! The eframe application shell around the script engine.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::config::load_settings;
use crate::engine::ScriptEngine;
use crate::events::{self, event_channel, UiEvent};
use crate::import_dialog::{ImportDialog, SCRIPT_IMPORT, SCRIPT_START};
use crate::logging::Logger;
use crate::resources::ResourceSet;
use crate::script::{GuiScript, ScriptRegistry, ScriptRunner};
use crate::start_screen::StartScreen;
use crate::ui;

pub struct ImportApp {
    engine: ScriptEngine,
    runner: ScriptRunner,

    // Channels for shell -> runner input delivery
    event_tx: Sender<UiEvent>,
    event_rx: Receiver<UiEvent>,

    // Recent script activity shown in the side panel
    system_log: Vec<String>,

    // Event logger for persisting script activity to disk
    logger: Option<Logger>,
}

impl ImportApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_settings().unwrap_or_default();

        match settings.theme.as_str() {
            "light" => cc.egui_ctx.set_visuals(egui::Visuals::light()),
            _ => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
        }

        let mut system_log: Vec<String> = Vec::new();

        // On-disk resources override the compiled-in set; a broken resource
        // dir falls back rather than aborting the shell.
        let resources = match &settings.resource_dir {
            Some(dir) => match ResourceSet::load_dir(dir) {
                Ok(set) => set,
                Err(e) => {
                    system_log.push(format!("⚠ {}; using built-in resources", e));
                    ResourceSet::builtin()
                }
            },
            None => ResourceSet::builtin(),
        };

        let logger = if settings.log_events {
            Logger::new().ok()
        } else {
            None
        };

        let mut registry = ScriptRegistry::new();
        registry.register(SCRIPT_IMPORT, || {
            Box::new(ImportDialog::new()) as Box<dyn GuiScript>
        });
        registry.register(SCRIPT_START, || {
            Box::new(StartScreen::new()) as Box<dyn GuiScript>
        });

        let mut engine = ScriptEngine::new(resources);
        let mut runner = ScriptRunner::new(registry);
        if let Err(e) = runner.start(SCRIPT_IMPORT, &mut engine) {
            system_log.push(format!("⚠ failed to open import screen: {}", e));
        }

        let (event_tx, event_rx) = event_channel();

        Self {
            engine,
            runner,
            event_tx,
            event_rx,
            system_log,
            logger,
        }
    }
}

impl eframe::App for ImportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Deliver any presses from the last frame before drawing
        events::process_events(
            &self.event_rx,
            &mut self.runner,
            &mut self.engine,
            &mut self.system_log,
            self.logger.as_ref(),
        );

        // Side panel: script activity log
        egui::SidePanel::right("activity_panel")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Script activity");
                ui.separator();
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.system_log {
                            ui.label(line);
                        }
                    });
            });

        // Central panel: which script is in control
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.runner.current_script() {
                Some(name) => ui.label(format!("Active script: {}", name)),
                None => ui.label("No active script"),
            };
        });

        // The modal window itself
        ui::render_modal_window(ctx, &self.engine, &self.event_tx);

        // Keep polling for queued events
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
