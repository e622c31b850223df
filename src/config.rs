use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

// Default configuration
pub const DEFAULT_THEME: &str = "dark";

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_log_events() -> bool {
    true
}

#[derive(Serialize, Deserialize)]
pub struct Settings {
    /// Directory with window packs and a string table overriding the
    /// built-in resources. None uses the compiled-in set.
    #[serde(default)]
    pub resource_dir: Option<PathBuf>,
    /// Write script activity to the event log on disk.
    #[serde(default = "default_log_events")]
    pub log_events: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resource_dir: None,
            log_events: true,
            theme: default_theme(),
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("org", "chargen", "chargen-import") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings).unwrap();
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}
