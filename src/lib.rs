//! chargen-import library.
//!
//! This module re-exports the core components for testing and extension.

pub mod app;
pub mod config;
pub mod engine;
pub mod events;
pub mod host;
pub mod import_dialog;
pub mod logging;
pub mod resources;
pub mod script;
pub mod start_screen;
pub mod ui;

#[cfg(test)]
mod integration_tests;
