//! Script trait, error taxonomy, and the next-script runner.
//!
//! A `GuiScript` is one screen's worth of control flow: it builds its window
//! in `on_load` and reacts to button presses dispatched to it by handler
//! name. The `ScriptRunner` owns the active script and follows the host's
//! "next script" pointer, which is how one screen hands off to another.

use std::collections::HashMap;
use std::fmt;

use crate::engine::ScriptEngine;
use crate::events::UiEvent;
use crate::host::UiHost;

/// Errors surfaced by scripts and the host. Both variants are fatal to the
/// dialog instance that raised them; there is no local recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A window pack, window id, control index, strref, handler, or script
    /// name failed to resolve.
    ResourceNotFound(String),
    /// A handler was invoked outside the dialog state that permits it.
    InvalidStateTransition { handler: String, state: String },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ResourceNotFound(what) => {
                write!(f, "resource not found: {}", what)
            }
            ScriptError::InvalidStateTransition { handler, state } => {
                write!(f, "invalid state transition: {} in state {}", handler, state)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// A GUI script driving one screen through the host.
pub trait GuiScript {
    /// The script's registered name (also the "next script" target that
    /// reaches it).
    fn name(&self) -> &'static str;

    /// Build the script's window: load resources, set captions, bind
    /// handlers, show modally.
    fn on_load(&mut self, host: &mut dyn UiHost) -> Result<(), ScriptError>;

    /// Invoke a button handler by its registered name.
    fn dispatch(&mut self, handler: &str, host: &mut dyn UiHost) -> Result<(), ScriptError>;
}

type ScriptCtor = Box<dyn Fn() -> Box<dyn GuiScript>>;

/// Maps script names to constructors so the runner can instantiate the next
/// script when the host's flow pointer changes.
#[derive(Default)]
pub struct ScriptRegistry {
    ctors: HashMap<String, ScriptCtor>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a script name.
    pub fn register<F>(&mut self, name: &str, ctor: F)
    where
        F: Fn() -> Box<dyn GuiScript> + 'static,
    {
        self.ctors.insert(name.to_string(), Box::new(ctor));
    }

    /// Instantiate a fresh script by name.
    pub fn create(&self, name: &str) -> Option<Box<dyn GuiScript>> {
        self.ctors.get(name).map(|ctor| ctor())
    }
}

/// Drives the active script: delivers button presses and follows next-script
/// transitions.
///
/// Handler invocations are strictly sequential — the runner processes one
/// event at a time, so scripts never observe concurrent dispatch.
pub struct ScriptRunner {
    registry: ScriptRegistry,
    current: Option<Box<dyn GuiScript>>,
}

impl ScriptRunner {
    pub fn new(registry: ScriptRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    /// Name of the script currently in control, if any.
    pub fn current_script(&self) -> Option<&'static str> {
        self.current.as_ref().map(|s| s.name())
    }

    /// Make the named script active and run its `on_load`.
    pub fn start(&mut self, name: &str, engine: &mut ScriptEngine) -> Result<(), ScriptError> {
        let mut script = self
            .registry
            .create(name)
            .ok_or_else(|| ScriptError::ResourceNotFound(format!("script '{}'", name)))?;
        script.on_load(engine)?;
        self.current = Some(script);
        // A script may hand off immediately from on_load.
        self.follow_transition(engine)
    }

    /// Deliver one UI event to the active script.
    ///
    /// Presses land only on live, bound, enabled buttons; anything else is
    /// dropped the way the host drops input for inert controls. Returns the
    /// dispatched handler name, or `None` if the event was ignored.
    pub fn deliver(
        &mut self,
        event: UiEvent,
        engine: &mut ScriptEngine,
    ) -> Result<Option<String>, ScriptError> {
        let UiEvent::ButtonPressed { window, control } = event;

        if !engine.is_button_enabled(window, control) {
            return Ok(None);
        }
        let Some(handler) = engine.handler_for(window, control) else {
            return Ok(None);
        };
        let Some(script) = self.current.as_mut() else {
            return Ok(None);
        };

        script.dispatch(&handler, engine)?;
        self.follow_transition(engine)?;
        Ok(Some(handler))
    }

    /// Swap in the next script if the current handler set one.
    fn follow_transition(&mut self, engine: &mut ScriptEngine) -> Result<(), ScriptError> {
        while let Some(next) = engine.take_next_script() {
            let mut script = self
                .registry
                .create(&next)
                .ok_or_else(|| ScriptError::ResourceNotFound(format!("script '{}'", next)))?;
            script.on_load(engine)?;
            self.current = Some(script);
        }
        Ok(())
    }
}
