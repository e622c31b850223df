//! Start screen the import dialog hands off to.
//!
//! Stands in for the engine's main game-start flow: one text area and a
//! button that loops back to the import screen, so the demo can exercise
//! next-script transitions in both directions.

use crate::host::{ButtonState, TextRef, UiHost, WindowHandle};
use crate::import_dialog::{SCRIPT_IMPORT, SCRIPT_START};
use crate::script::{GuiScript, ScriptError};

pub const START_PACK: &str = "START";
pub const START_WINDOW: u32 = 0;
pub const STATUS_TEXT: u32 = 0;
pub const IMPORT_BUTTON: u32 = 1;

pub const HANDLER_IMPORT: &str = "ImportPress";

pub struct StartScreen {
    window: Option<WindowHandle>,
}

impl StartScreen {
    pub fn new() -> Self {
        Self { window: None }
    }

    fn on_import_press(&mut self, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        let window = self.window.ok_or_else(|| ScriptError::InvalidStateTransition {
            handler: HANDLER_IMPORT.to_string(),
            state: "unloaded".to_string(),
        })?;
        host.unload_window(window)?;
        self.window = None;
        host.set_next_script(SCRIPT_IMPORT);
        Ok(())
    }
}

impl Default for StartScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl GuiScript for StartScreen {
    fn name(&self) -> &'static str {
        SCRIPT_START
    }

    fn on_load(&mut self, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        host.load_window_pack(START_PACK)?;
        let window = host.load_window(START_WINDOW)?;

        let status = host.get_control(window, STATUS_TEXT)?;
        host.set_text(
            window,
            status,
            TextRef::Literal("The game would begin here with the imported character.".to_string()),
        )?;

        let import = host.get_control(window, IMPORT_BUTTON)?;
        host.set_text(window, import, TextRef::Literal("Import Another".to_string()))?;
        host.set_button_state(window, import, ButtonState::Enabled)?;
        host.set_button_press_handler(window, import, HANDLER_IMPORT)?;

        self.window = Some(window);
        host.show_modal(window)?;
        Ok(())
    }

    fn dispatch(&mut self, handler: &str, host: &mut dyn UiHost) -> Result<(), ScriptError> {
        match handler {
            HANDLER_IMPORT => self.on_import_press(host),
            other => Err(ScriptError::ResourceNotFound(format!(
                "handler '{}'",
                other
            ))),
        }
    }
}
