//! UI event plumbing between the egui shell and the script runner.

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::engine::ScriptEngine;
use crate::host::{ControlHandle, WindowHandle};
use crate::logging::{LogEntry, Logger};
use crate::script::ScriptRunner;

/// Input events produced by the shell (or by tests) and consumed by the
/// runner. The host serializes input, so these are delivered one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ButtonPressed {
        window: WindowHandle,
        control: ControlHandle,
    },
}

/// Create the shell → runner event channel.
pub fn event_channel() -> (Sender<UiEvent>, Receiver<UiEvent>) {
    unbounded()
}

/// Drain all pending UI events into the runner.
///
/// Dispatch outcomes land in the system log; script errors are fatal to the
/// dialog that raised them and are logged rather than retried.
pub fn process_events(
    event_rx: &Receiver<UiEvent>,
    runner: &mut ScriptRunner,
    engine: &mut ScriptEngine,
    system_log: &mut Vec<String>,
    logger: Option<&Logger>,
) {
    while let Ok(event) = event_rx.try_recv() {
        let script = runner.current_script().unwrap_or("-").to_string();
        match runner.deliver(event, engine) {
            Ok(Some(handler)) => {
                let ts = Local::now().format("%H:%M:%S").to_string();
                system_log.push(format!("[{}] {} → {}", ts, script, handler));
                if let Some(logger) = logger {
                    logger.log(LogEntry {
                        script: script.clone(),
                        timestamp: ts,
                        event: "press".to_string(),
                        detail: handler,
                    });
                }
            }
            Ok(None) => {
                // Press on an unbound or disabled control; the host drops it.
            }
            Err(e) => {
                let ts = Local::now().format("%H:%M:%S").to_string();
                system_log.push(format!("[{}] ⚠ {}: {}", ts, script, e));
                if let Some(logger) = logger {
                    logger.log(LogEntry {
                        script: script.clone(),
                        timestamp: ts,
                        event: "error".to_string(),
                        detail: e.to_string(),
                    });
                }
            }
        }
    }
}
