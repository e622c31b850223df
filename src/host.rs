//! Host-side GUI abstraction consumed by scripts.
//!
//! Scripts never touch window or control storage directly; they drive the
//! host through this trait, mirroring how the engine exposes its GUI to the
//! scripting layer. Handles are opaque and owned by the host — a script only
//! keeps non-owning copies for the lifetime of its dialog.

use crate::script::ScriptError;

/// Opaque identifier for a live window instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub(crate) u32);

/// Opaque identifier for a control within a window.
///
/// Controls are addressed by their index in the window definition, so the
/// handle is stable across lookups of the same control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub(crate) u32);

impl ControlHandle {
    /// The control's index within its window definition.
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Enabled/disabled state of a button control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Enabled,
    Disabled,
}

/// Text for a control: a string-table reference or a literal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRef {
    /// Localized text looked up in the host's string table.
    StrRef(u32),
    /// Raw text used as-is.
    Literal(String),
}

impl From<u32> for TextRef {
    fn from(strref: u32) -> Self {
        TextRef::StrRef(strref)
    }
}

impl From<&str> for TextRef {
    fn from(s: &str) -> Self {
        TextRef::Literal(s.to_string())
    }
}

/// GUI surface the host exposes to scripts.
///
/// All resource lookups are fallible: an unknown pack, window id, control
/// index, or strref is a `ScriptError::ResourceNotFound` and is fatal to the
/// calling dialog. The host performs no recovery on the script's behalf.
pub trait UiHost {
    /// Make the named window pack the source for subsequent window loads.
    fn load_window_pack(&mut self, name: &str) -> Result<(), ScriptError>;

    /// Instantiate a window from the active pack by its numeric id.
    fn load_window(&mut self, id: u32) -> Result<WindowHandle, ScriptError>;

    /// Look up a control in a live window by its index.
    fn get_control(
        &self,
        window: WindowHandle,
        index: u32,
    ) -> Result<ControlHandle, ScriptError>;

    /// Set a control's display text.
    fn set_text(
        &mut self,
        window: WindowHandle,
        control: ControlHandle,
        text: TextRef,
    ) -> Result<(), ScriptError>;

    /// Enable or disable a button.
    fn set_button_state(
        &mut self,
        window: WindowHandle,
        control: ControlHandle,
        state: ButtonState,
    ) -> Result<(), ScriptError>;

    /// Bind a named handler to a button's press event.
    ///
    /// The handler name is resolved by the active script's `dispatch` when
    /// the press is delivered.
    fn set_button_press_handler(
        &mut self,
        window: WindowHandle,
        control: ControlHandle,
        handler: &str,
    ) -> Result<(), ScriptError>;

    /// Display a window modally. Input goes only to this window until it is
    /// unloaded.
    fn show_modal(&mut self, window: WindowHandle) -> Result<(), ScriptError>;

    /// Destroy a live window and release its controls.
    fn unload_window(&mut self, window: WindowHandle) -> Result<(), ScriptError>;

    /// Point the host's global program flow at the named script. The runner
    /// picks this up after the current handler returns.
    fn set_next_script(&mut self, name: &str);
}
