//! In-memory GUI engine implementing `UiHost`.
//!
//! The engine owns all live window state: instantiated windows with their
//! per-control text, enabled state and handler bindings, the modal window,
//! and the global next-script pointer. Scripts drive it through the `UiHost`
//! trait; the egui shell and the tests read it back through the accessors.

use std::collections::HashMap;

use crate::host::{ButtonState, ControlHandle, TextRef, UiHost, WindowHandle};
use crate::resources::{ControlKind, ResourceSet};
use crate::script::ScriptError;

/// A live control: definition index plus mutable display state.
#[derive(Debug, Clone)]
pub struct ControlInstance {
    pub handle: ControlHandle,
    pub kind: ControlKind,
    pub text: String,
    pub state: ButtonState,
    pub press_handler: Option<String>,
}

/// A live window instantiated from a pack definition.
#[derive(Debug, Clone)]
pub struct WindowInstance {
    pub handle: WindowHandle,
    pub def_id: u32,
    pub title: String,
    pub controls: Vec<ControlInstance>,
}

impl WindowInstance {
    pub fn control(&self, handle: ControlHandle) -> Option<&ControlInstance> {
        self.controls.iter().find(|c| c.handle == handle)
    }

    fn control_mut(&mut self, handle: ControlHandle) -> Option<&mut ControlInstance> {
        self.controls.iter_mut().find(|c| c.handle == handle)
    }
}

/// The host: resources, live windows, modal focus, and program flow pointer.
pub struct ScriptEngine {
    resources: ResourceSet,
    active_pack: Option<String>,
    windows: HashMap<WindowHandle, WindowInstance>,
    modal: Option<WindowHandle>,
    next_script: Option<String>,
    next_handle: u32,
}

impl ScriptEngine {
    pub fn new(resources: ResourceSet) -> Self {
        Self {
            resources,
            active_pack: None,
            windows: HashMap::new(),
            modal: None,
            next_script: None,
            next_handle: 1,
        }
    }

    pub fn with_builtin_resources() -> Self {
        Self::new(ResourceSet::builtin())
    }

    /// The window currently shown modally, if any.
    pub fn modal_window(&self) -> Option<&WindowInstance> {
        self.modal.and_then(|h| self.windows.get(&h))
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&WindowInstance> {
        self.windows.get(&handle)
    }

    pub fn is_window_live(&self, handle: WindowHandle) -> bool {
        self.windows.contains_key(&handle)
    }

    /// Number of live windows. One open dialog holds exactly one.
    pub fn live_window_count(&self) -> usize {
        self.windows.len()
    }

    /// The pending next-script target, without consuming it.
    pub fn next_script(&self) -> Option<&str> {
        self.next_script.as_deref()
    }

    /// Consume the pending next-script target. The runner calls this after
    /// every handler return.
    pub fn take_next_script(&mut self) -> Option<String> {
        self.next_script.take()
    }

    /// Handler name bound to a button's press event, if any.
    pub fn handler_for(&self, window: WindowHandle, control: ControlHandle) -> Option<String> {
        self.windows
            .get(&window)
            .and_then(|w| w.control(control))
            .and_then(|c| c.press_handler.clone())
    }

    /// Whether a control is a button that currently accepts input. Presses
    /// on anything else are dropped, never delivered to scripts.
    pub fn is_button_enabled(&self, window: WindowHandle, control: ControlHandle) -> bool {
        self.windows
            .get(&window)
            .and_then(|w| w.control(control))
            .map(|c| c.kind == ControlKind::Button && c.state == ButtonState::Enabled)
            .unwrap_or(false)
    }

    fn window_mut(&mut self, handle: WindowHandle) -> Result<&mut WindowInstance, ScriptError> {
        self.windows
            .get_mut(&handle)
            .ok_or_else(|| ScriptError::ResourceNotFound(format!("window handle {:?}", handle)))
    }
}

impl UiHost for ScriptEngine {
    fn load_window_pack(&mut self, name: &str) -> Result<(), ScriptError> {
        if self.resources.pack(name).is_none() {
            return Err(ScriptError::ResourceNotFound(format!(
                "window pack '{}'",
                name
            )));
        }
        self.active_pack = Some(name.to_string());
        Ok(())
    }

    fn load_window(&mut self, id: u32) -> Result<WindowHandle, ScriptError> {
        let pack_name = self
            .active_pack
            .clone()
            .ok_or_else(|| ScriptError::ResourceNotFound("no window pack loaded".to_string()))?;
        let def = self
            .resources
            .pack(&pack_name)
            .and_then(|p| p.window(id))
            .ok_or_else(|| {
                ScriptError::ResourceNotFound(format!("window {} in pack '{}'", id, pack_name))
            })?;

        let handle = WindowHandle(self.next_handle);
        self.next_handle += 1;

        let controls = def
            .controls
            .iter()
            .map(|c| ControlInstance {
                handle: ControlHandle(c.index),
                kind: c.kind,
                text: c.label.clone(),
                state: ButtonState::Enabled,
                press_handler: None,
            })
            .collect();

        self.windows.insert(
            handle,
            WindowInstance {
                handle,
                def_id: def.id,
                title: def.title.clone(),
                controls,
            },
        );
        Ok(handle)
    }

    fn get_control(
        &self,
        window: WindowHandle,
        index: u32,
    ) -> Result<ControlHandle, ScriptError> {
        let win = self
            .windows
            .get(&window)
            .ok_or_else(|| ScriptError::ResourceNotFound(format!("window handle {:?}", window)))?;
        win.control(ControlHandle(index))
            .map(|c| c.handle)
            .ok_or_else(|| {
                ScriptError::ResourceNotFound(format!(
                    "control {} in window {}",
                    index, win.def_id
                ))
            })
    }

    fn set_text(
        &mut self,
        window: WindowHandle,
        control: ControlHandle,
        text: TextRef,
    ) -> Result<(), ScriptError> {
        let resolved = match text {
            TextRef::StrRef(strref) => self
                .resources
                .strings
                .lookup(strref)
                .ok_or_else(|| ScriptError::ResourceNotFound(format!("strref {}", strref)))?
                .to_string(),
            TextRef::Literal(s) => s,
        };
        let win = self.window_mut(window)?;
        let def_id = win.def_id;
        let ctrl = win.control_mut(control).ok_or_else(|| {
            ScriptError::ResourceNotFound(format!(
                "control {} in window {}",
                control.index(),
                def_id
            ))
        })?;
        ctrl.text = resolved;
        Ok(())
    }

    fn set_button_state(
        &mut self,
        window: WindowHandle,
        control: ControlHandle,
        state: ButtonState,
    ) -> Result<(), ScriptError> {
        let win = self.window_mut(window)?;
        let def_id = win.def_id;
        let ctrl = win.control_mut(control).ok_or_else(|| {
            ScriptError::ResourceNotFound(format!(
                "control {} in window {}",
                control.index(),
                def_id
            ))
        })?;
        ctrl.state = state;
        Ok(())
    }

    fn set_button_press_handler(
        &mut self,
        window: WindowHandle,
        control: ControlHandle,
        handler: &str,
    ) -> Result<(), ScriptError> {
        let win = self.window_mut(window)?;
        let def_id = win.def_id;
        let ctrl = win.control_mut(control).ok_or_else(|| {
            ScriptError::ResourceNotFound(format!(
                "control {} in window {}",
                control.index(),
                def_id
            ))
        })?;
        ctrl.press_handler = Some(handler.to_string());
        Ok(())
    }

    fn show_modal(&mut self, window: WindowHandle) -> Result<(), ScriptError> {
        if !self.windows.contains_key(&window) {
            return Err(ScriptError::ResourceNotFound(format!(
                "window handle {:?}",
                window
            )));
        }
        self.modal = Some(window);
        Ok(())
    }

    fn unload_window(&mut self, window: WindowHandle) -> Result<(), ScriptError> {
        if self.windows.remove(&window).is_none() {
            return Err(ScriptError::ResourceNotFound(format!(
                "window handle {:?}",
                window
            )));
        }
        if self.modal == Some(window) {
            self.modal = None;
        }
        Ok(())
    }

    fn set_next_script(&mut self, name: &str) {
        self.next_script = Some(name.to_string());
    }
}
