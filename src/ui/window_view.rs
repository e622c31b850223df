//! Renders the engine's modal window from live control state.
//!
//! The view is a pure projection of `ScriptEngine` state: text areas and the
//! list render read-only, buttons honor their enabled state, and clicks go
//! back to the runner over the event channel rather than mutating anything
//! here.

use crossbeam_channel::Sender;
use eframe::egui;

use crate::engine::{ScriptEngine, WindowInstance};
use crate::events::UiEvent;
use crate::host::ButtonState;
use crate::resources::ControlKind;

/// Draw the current modal window, if any. Button clicks are sent as
/// `UiEvent`s for the runner to pick up next frame.
pub fn render_modal_window(
    ctx: &egui::Context,
    engine: &ScriptEngine,
    event_tx: &Sender<UiEvent>,
) {
    let Some(win) = engine.modal_window() else {
        return;
    };

    egui::Window::new(&win.title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            render_text_controls(ui, win);
            ui.separator();
            render_buttons(ui, win, event_tx);
        });
}

fn render_text_controls(ui: &mut egui::Ui, win: &WindowInstance) {
    for control in &win.controls {
        match control.kind {
            ControlKind::TextArea => {
                ui.label(&control.text);
                ui.add_space(6.0);
            }
            ControlKind::ListBox => {
                egui::ScrollArea::vertical()
                    .max_height(120.0)
                    .show(ui, |ui| {
                        if control.text.is_empty() {
                            ui.weak("(no characters available)");
                        } else {
                            ui.label(&control.text);
                        }
                    });
            }
            ControlKind::Button => {}
        }
    }
}

fn render_buttons(ui: &mut egui::Ui, win: &WindowInstance, event_tx: &Sender<UiEvent>) {
    ui.horizontal(|ui| {
        for control in &win.controls {
            if control.kind != ControlKind::Button {
                continue;
            }
            let enabled = control.state == ButtonState::Enabled;
            let response = ui.add_enabled(enabled, egui::Button::new(&control.text));
            if response.clicked() {
                let _ = event_tx.send(UiEvent::ButtonPressed {
                    window: win.handle,
                    control: control.handle,
                });
            }
        }
    });
}
