//! The character-import modal dialog.
//!
//! A finite-state controller over one window with two buttons. Done carries
//! a two-stage confirmation (its label changes from "Done" to "Import" on
//! the first press); Cancel tears the dialog down from either stage and
//! reopens the import screen. Completing the confirmation hands program
//! flow to the start script.

use crate::host::{ButtonState, TextRef, UiHost, WindowHandle};
use crate::script::{GuiScript, ScriptError};

/// Pack holding the character generation screens.
pub const CHARGEN_PACK: &str = "GUICG";
/// Window id of the import screen within the chargen pack.
pub const IMPORT_WINDOW: u32 = 20;

// Control indices in the import window layout.
pub const DONE_BUTTON: u32 = 0;
pub const CANCEL_BUTTON: u32 = 1;
pub const CHARACTER_LIST: u32 = 2;
pub const INFO_TEXT: u32 = 4;

// Strrefs for the dialog's captions.
pub const STR_IMPORT_HELP: u32 = 53774;
pub const STR_DONE: u32 = 2610;
pub const STR_IMPORT: u32 = 11973;
pub const STR_CANCEL: u32 = 15416;

// Handler names bound to the buttons.
pub const HANDLER_DONE1: &str = "Done1Press";
pub const HANDLER_DONE2: &str = "Done2Press";
pub const HANDLER_CANCEL: &str = "CancelPress";

/// Next-script target after a completed import.
pub const SCRIPT_START: &str = "Start";
/// Next-script target that reopens this screen (its own registered name).
pub const SCRIPT_IMPORT: &str = "GUICG24";

/// Lifecycle of one dialog instance. Terminal state is `Closed`; a closed
/// instance never reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    AwaitingStart,
    AwaitingConfirm,
    AwaitingDoneConfirm,
    Closed,
}

impl DialogState {
    fn name(&self) -> &'static str {
        match self {
            DialogState::AwaitingStart => "AwaitingStart",
            DialogState::AwaitingConfirm => "AwaitingConfirm",
            DialogState::AwaitingDoneConfirm => "AwaitingDoneConfirm",
            DialogState::Closed => "Closed",
        }
    }
}

/// Controller for the import dialog. Owns its window handle for the dialog's
/// lifetime; there is no shared window state outside this instance.
pub struct ImportDialog {
    state: DialogState,
    window: Option<WindowHandle>,
}

impl ImportDialog {
    pub fn new() -> Self {
        Self {
            state: DialogState::AwaitingStart,
            window: None,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    fn invalid(&self, handler: &str) -> ScriptError {
        ScriptError::InvalidStateTransition {
            handler: handler.to_string(),
            state: self.state.name().to_string(),
        }
    }

    /// Build the import window and show it modally.
    ///
    /// Done starts disabled, Cancel enabled. Valid only once per instance.
    pub fn open(&mut self, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        if self.state != DialogState::AwaitingStart || self.window.is_some() {
            return Err(self.invalid("open"));
        }

        host.load_window_pack(CHARGEN_PACK)?;
        let window = host.load_window(IMPORT_WINDOW)?;

        let info = host.get_control(window, INFO_TEXT)?;
        host.set_text(window, info, TextRef::StrRef(STR_IMPORT_HELP))?;

        // TODO: populate the list with importable characters from disk.
        let _list = host.get_control(window, CHARACTER_LIST)?;

        let done = host.get_control(window, DONE_BUTTON)?;
        host.set_text(window, done, TextRef::StrRef(STR_DONE))?;
        host.set_button_state(window, done, ButtonState::Disabled)?;

        let cancel = host.get_control(window, CANCEL_BUTTON)?;
        host.set_text(window, cancel, TextRef::StrRef(STR_CANCEL))?;

        host.set_button_press_handler(window, done, HANDLER_DONE1)?;
        host.set_button_press_handler(window, cancel, HANDLER_CANCEL)?;

        self.window = Some(window);
        self.state = DialogState::AwaitingConfirm;
        host.show_modal(window)?;
        Ok(())
    }

    /// First Done press: relabel to the confirmation caption and rebind.
    ///
    /// The button is re-disabled even though it was never enabled — the
    /// original dialog does the same, and the redundancy is kept rather than
    /// silently repaired so both confirmation stages stay observable.
    pub fn on_done_press(&mut self, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        if self.state != DialogState::AwaitingConfirm {
            return Err(self.invalid(HANDLER_DONE1));
        }
        let window = self.window.ok_or_else(|| self.invalid(HANDLER_DONE1))?;

        let done = host.get_control(window, DONE_BUTTON)?;
        host.set_text(window, done, TextRef::StrRef(STR_IMPORT))?;
        host.set_button_state(window, done, ButtonState::Disabled)?;
        host.set_button_press_handler(window, done, HANDLER_DONE2)?;

        self.state = DialogState::AwaitingDoneConfirm;
        Ok(())
    }

    /// Second Done press: tear down and hand flow to the start script.
    pub fn on_done_confirm_press(&mut self, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        if self.state != DialogState::AwaitingDoneConfirm {
            return Err(self.invalid(HANDLER_DONE2));
        }
        let window = self.window.ok_or_else(|| self.invalid(HANDLER_DONE2))?;

        host.unload_window(window)?;
        self.window = None;
        self.state = DialogState::Closed;
        host.set_next_script(SCRIPT_START);
        Ok(())
    }

    /// Cancel: tear down and reopen the import screen. Valid from either
    /// confirmation stage; unconditional once it runs.
    pub fn on_cancel_press(&mut self, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        match self.state {
            DialogState::AwaitingConfirm | DialogState::AwaitingDoneConfirm => {}
            _ => return Err(self.invalid(HANDLER_CANCEL)),
        }
        let window = self.window.ok_or_else(|| self.invalid(HANDLER_CANCEL))?;

        host.unload_window(window)?;
        self.window = None;
        self.state = DialogState::Closed;
        host.set_next_script(SCRIPT_IMPORT);
        Ok(())
    }
}

impl Default for ImportDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl GuiScript for ImportDialog {
    fn name(&self) -> &'static str {
        SCRIPT_IMPORT
    }

    fn on_load(&mut self, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        self.open(host)
    }

    fn dispatch(&mut self, handler: &str, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        match handler {
            HANDLER_DONE1 => self.on_done_press(host),
            HANDLER_DONE2 => self.on_done_confirm_press(host),
            HANDLER_CANCEL => self.on_cancel_press(host),
            other => Err(ScriptError::ResourceNotFound(format!(
                "handler '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptEngine;

    fn opened() -> (ImportDialog, ScriptEngine) {
        let mut engine = ScriptEngine::with_builtin_resources();
        let mut dialog = ImportDialog::new();
        dialog.open(&mut engine).unwrap();
        (dialog, engine)
    }

    fn button_state(engine: &ScriptEngine, dialog: &ImportDialog, index: u32) -> ButtonState {
        let window = dialog.window().unwrap();
        let handle = engine.get_control(window, index).unwrap();
        engine
            .window(window)
            .unwrap()
            .control(handle)
            .unwrap()
            .state
    }

    #[test]
    fn test_handler_before_open_is_invalid() {
        let mut engine = ScriptEngine::with_builtin_resources();
        let mut dialog = ImportDialog::new();

        let err = dialog.on_done_press(&mut engine).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidStateTransition { .. }));
        let err = dialog.on_cancel_press(&mut engine).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidStateTransition { .. }));
        assert_eq!(dialog.state(), DialogState::AwaitingStart);
    }

    #[test]
    fn test_open_sets_captions_and_states() {
        let (dialog, engine) = opened();
        assert_eq!(dialog.state(), DialogState::AwaitingConfirm);

        let window = dialog.window().unwrap();
        let win = engine.window(window).unwrap();
        assert_eq!(engine.modal_window().unwrap().handle, window);
        assert_eq!(engine.live_window_count(), 1);

        let done = engine.get_control(window, DONE_BUTTON).unwrap();
        let cancel = engine.get_control(window, CANCEL_BUTTON).unwrap();
        assert_eq!(win.control(done).unwrap().text, "Done");
        assert_eq!(win.control(cancel).unwrap().text, "Cancel");
        assert_eq!(button_state(&engine, &dialog, DONE_BUTTON), ButtonState::Disabled);
        assert_eq!(button_state(&engine, &dialog, CANCEL_BUTTON), ButtonState::Enabled);

        let info = engine.get_control(window, INFO_TEXT).unwrap();
        assert!(!win.control(info).unwrap().text.is_empty());

        assert_eq!(
            win.control(done).unwrap().press_handler.as_deref(),
            Some(HANDLER_DONE1)
        );
        assert_eq!(
            win.control(cancel).unwrap().press_handler.as_deref(),
            Some(HANDLER_CANCEL)
        );
    }

    #[test]
    fn test_open_twice_is_invalid() {
        let (mut dialog, mut engine) = opened();
        let err = dialog.open(&mut engine).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_done_press_relabels_and_rebinds() {
        let (mut dialog, mut engine) = opened();
        dialog.on_done_press(&mut engine).unwrap();
        assert_eq!(dialog.state(), DialogState::AwaitingDoneConfirm);

        let window = dialog.window().unwrap();
        let done = engine.get_control(window, DONE_BUTTON).unwrap();
        let ctrl = engine.window(window).unwrap().control(done).unwrap();
        assert_eq!(ctrl.text, "Import");
        assert_eq!(ctrl.state, ButtonState::Disabled);
        assert_eq!(ctrl.press_handler.as_deref(), Some(HANDLER_DONE2));

        // Window stays open after the first press.
        assert!(engine.modal_window().is_some());
    }

    #[test]
    fn test_done_press_twice_is_invalid() {
        let (mut dialog, mut engine) = opened();
        dialog.on_done_press(&mut engine).unwrap();
        let err = dialog.on_done_press(&mut engine).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_confirm_without_first_press_is_invalid() {
        let (mut dialog, mut engine) = opened();
        let err = dialog.on_done_confirm_press(&mut engine).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidStateTransition { .. }));
        assert_eq!(dialog.state(), DialogState::AwaitingConfirm);
    }

    #[test]
    fn test_done_confirm_closes_and_targets_start() {
        let (mut dialog, mut engine) = opened();
        let window = dialog.window().unwrap();

        dialog.on_done_press(&mut engine).unwrap();
        dialog.on_done_confirm_press(&mut engine).unwrap();

        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(dialog.window().is_none());
        assert!(!engine.is_window_live(window));
        assert_eq!(engine.next_script(), Some(SCRIPT_START));
    }

    #[test]
    fn test_cancel_closes_and_reopens_import_screen() {
        let (mut dialog, mut engine) = opened();
        let window = dialog.window().unwrap();

        dialog.on_cancel_press(&mut engine).unwrap();

        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(!engine.is_window_live(window));
        assert_eq!(engine.next_script(), Some(SCRIPT_IMPORT));
    }

    #[test]
    fn test_cancel_after_done_press_still_cancels() {
        let (mut dialog, mut engine) = opened();
        dialog.on_done_press(&mut engine).unwrap();
        dialog.on_cancel_press(&mut engine).unwrap();

        assert_eq!(dialog.state(), DialogState::Closed);
        assert_eq!(engine.next_script(), Some(SCRIPT_IMPORT));
    }

    #[test]
    fn test_cancel_twice_is_invalid() {
        let (mut dialog, mut engine) = opened();
        dialog.on_cancel_press(&mut engine).unwrap();

        let err = dialog.on_cancel_press(&mut engine).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidStateTransition { .. }));
        assert_eq!(dialog.state(), DialogState::Closed);
    }

    #[test]
    fn test_dispatch_by_handler_name() {
        let mut engine = ScriptEngine::with_builtin_resources();
        let mut dialog = ImportDialog::new();
        dialog.on_load(&mut engine).unwrap();

        dialog.dispatch(HANDLER_DONE1, &mut engine).unwrap();
        dialog.dispatch(HANDLER_DONE2, &mut engine).unwrap();
        assert_eq!(engine.next_script(), Some(SCRIPT_START));

        let err = dialog.dispatch("NoSuchHandler", &mut engine).unwrap_err();
        assert!(matches!(err, ScriptError::ResourceNotFound(_)));
    }
}
