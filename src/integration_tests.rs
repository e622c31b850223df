//! Integration tests for chargen-import
//!
//! These tests exercise full workflows across the engine, the event channel,
//! and the script runner together, driving the import dialog the way the
//! egui shell does: by sending button presses and letting the runner follow
//! next-script transitions.

use crossbeam_channel::Receiver;

use crate::engine::ScriptEngine;
use crate::events::{event_channel, process_events, UiEvent};
use crate::host::{ButtonState, ControlHandle, UiHost, WindowHandle};
use crate::import_dialog::{
    ImportDialog, CANCEL_BUTTON, DONE_BUTTON, SCRIPT_IMPORT, SCRIPT_START,
};
use crate::script::{GuiScript, ScriptRegistry, ScriptRunner};
use crate::start_screen::{StartScreen, IMPORT_BUTTON};

fn registry() -> ScriptRegistry {
    let mut registry = ScriptRegistry::new();
    registry.register(SCRIPT_IMPORT, || {
        Box::new(ImportDialog::new()) as Box<dyn GuiScript>
    });
    registry.register(SCRIPT_START, || {
        Box::new(StartScreen::new()) as Box<dyn GuiScript>
    });
    registry
}

fn started() -> (ScriptRunner, ScriptEngine) {
    let mut runner = ScriptRunner::new(registry());
    let mut engine = ScriptEngine::with_builtin_resources();
    runner.start(SCRIPT_IMPORT, &mut engine).unwrap();
    (runner, engine)
}

fn press(engine: &ScriptEngine, index: u32) -> UiEvent {
    let window = engine.modal_window().expect("a modal window is open").handle;
    let control = engine.get_control(window, index).unwrap();
    UiEvent::ButtonPressed { window, control }
}

fn drain(
    rx: &Receiver<UiEvent>,
    runner: &mut ScriptRunner,
    engine: &mut ScriptEngine,
) -> Vec<String> {
    let mut log = Vec::new();
    process_events(rx, runner, engine, &mut log, None);
    log
}

/// The import screen opens modally with Done disabled and Cancel enabled.
#[test]
fn test_import_screen_opens_modal() {
    let (runner, engine) = started();

    assert_eq!(runner.current_script(), Some(SCRIPT_IMPORT));
    let win = engine.modal_window().expect("import window is modal");
    assert_eq!(win.title, "Import Character");
    assert_eq!(engine.live_window_count(), 1);

    let done = engine.get_control(win.handle, DONE_BUTTON).unwrap();
    let cancel = engine.get_control(win.handle, CANCEL_BUTTON).unwrap();
    assert_eq!(win.control(done).unwrap().state, ButtonState::Disabled);
    assert_eq!(win.control(cancel).unwrap().state, ButtonState::Enabled);
}

/// Cancelling the import screen reopens it: the runner follows the
/// next-script pointer back to a fresh instance of the same screen.
#[test]
fn test_cancel_reopens_import_screen() {
    let (mut runner, mut engine) = started();
    let (tx, rx) = event_channel();
    let first_window = engine.modal_window().unwrap().handle;

    tx.send(press(&engine, CANCEL_BUTTON)).unwrap();
    let log = drain(&rx, &mut runner, &mut engine);

    assert_eq!(log.len(), 1);
    assert!(log[0].contains("CancelPress"));

    // Old window gone, a fresh import screen is up, pointer consumed.
    assert!(!engine.is_window_live(first_window));
    assert_eq!(runner.current_script(), Some(SCRIPT_IMPORT));
    let win = engine.modal_window().expect("reopened import window");
    assert_ne!(win.handle, first_window);
    assert_eq!(engine.live_window_count(), 1);
    assert!(engine.next_script().is_none());
}

/// A press on the disabled Done button is dropped by the host and never
/// reaches the script.
#[test]
fn test_disabled_done_press_is_dropped() {
    let (mut runner, mut engine) = started();
    let (tx, rx) = event_channel();
    let window = engine.modal_window().unwrap().handle;

    tx.send(press(&engine, DONE_BUTTON)).unwrap();
    let log = drain(&rx, &mut runner, &mut engine);

    assert!(log.is_empty());
    assert!(engine.is_window_live(window));
    assert_eq!(runner.current_script(), Some(SCRIPT_IMPORT));
}

/// The full two-stage Done confirmation hands flow to the start screen.
/// The stages are driven through runner dispatch after enabling Done the
/// way a populated character list would.
#[test]
fn test_done_confirmation_reaches_start_screen() {
    let (mut runner, mut engine) = started();
    let (tx, rx) = event_channel();
    let window = engine.modal_window().unwrap().handle;
    let done = engine.get_control(window, DONE_BUTTON).unwrap();

    // Selecting a character would enable Done; emulate the host doing so.
    engine
        .set_button_state(window, done, ButtonState::Enabled)
        .unwrap();

    // First press: relabel to "Import", still in the import screen.
    tx.send(UiEvent::ButtonPressed { window, control: done }).unwrap();
    let log = drain(&rx, &mut runner, &mut engine);
    assert!(log[0].contains("Done1Press"));
    assert_eq!(runner.current_script(), Some(SCRIPT_IMPORT));
    let ctrl = engine.window(window).unwrap().control(done).unwrap();
    assert_eq!(ctrl.text, "Import");
    assert_eq!(ctrl.state, ButtonState::Disabled);

    // Second press: re-enable (the relabel re-disabled it) and confirm.
    engine
        .set_button_state(window, done, ButtonState::Enabled)
        .unwrap();
    tx.send(UiEvent::ButtonPressed { window, control: done }).unwrap();
    let log = drain(&rx, &mut runner, &mut engine);
    assert!(log[0].contains("Done2Press"));

    // Import window destroyed; the start screen took over.
    assert!(!engine.is_window_live(window));
    assert_eq!(runner.current_script(), Some(SCRIPT_START));
    assert_eq!(engine.modal_window().unwrap().title, "Main Menu");
    assert_eq!(engine.live_window_count(), 1);
}

/// The start screen's import button loops back to the import screen.
#[test]
fn test_start_screen_loops_back_to_import() {
    let mut runner = ScriptRunner::new(registry());
    let mut engine = ScriptEngine::with_builtin_resources();
    runner.start(SCRIPT_START, &mut engine).unwrap();
    let (tx, rx) = event_channel();

    tx.send(press(&engine, IMPORT_BUTTON)).unwrap();
    drain(&rx, &mut runner, &mut engine);

    assert_eq!(runner.current_script(), Some(SCRIPT_IMPORT));
    assert_eq!(engine.modal_window().unwrap().title, "Import Character");
}

/// Presses that arrive for an already-unloaded window are dropped, so a
/// double-click on Cancel cannot re-cancel a closed dialog.
#[test]
fn test_stale_press_after_cancel_is_dropped() {
    let (mut runner, mut engine) = started();
    let (tx, rx) = event_channel();

    // Two clicks land in the queue before the runner drains it.
    let cancel_press = press(&engine, CANCEL_BUTTON);
    tx.send(cancel_press).unwrap();
    tx.send(cancel_press).unwrap();
    let log = drain(&rx, &mut runner, &mut engine);

    // Only the first dispatches; the second refers to a dead window.
    assert_eq!(log.len(), 1);
    assert_eq!(runner.current_script(), Some(SCRIPT_IMPORT));
    assert_eq!(engine.live_window_count(), 1);
}

/// Events for unknown windows or controls are ignored outright.
#[test]
fn test_unknown_handles_are_ignored() {
    let (mut runner, mut engine) = started();
    let (tx, rx) = event_channel();

    tx.send(UiEvent::ButtonPressed {
        window: WindowHandle(999),
        control: ControlHandle(0),
    })
    .unwrap();
    let log = drain(&rx, &mut runner, &mut engine);

    assert!(log.is_empty());
    assert_eq!(runner.current_script(), Some(SCRIPT_IMPORT));
    assert!(engine.modal_window().is_some());
}
