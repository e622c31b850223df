//! Window pack and string table resource model.
//!
//! A window pack is a named bundle of window layouts; windows carry controls
//! addressed by index, and control captions resolve through a string table
//! keyed by numeric strref. Resources are serde types so packs can be loaded
//! from JSON on disk, with a built-in set compiled in so the demo runs
//! without external files.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Kind of an addressable control inside a window.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    TextArea,
    ListBox,
}

/// One control in a window definition.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ControlDef {
    pub index: u32,
    pub kind: ControlKind,
    /// Default caption; scripts usually overwrite this via `set_text`.
    #[serde(default)]
    pub label: String,
}

/// One window layout in a pack.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WindowDef {
    pub id: u32,
    pub title: String,
    pub controls: Vec<ControlDef>,
}

impl WindowDef {
    pub fn control(&self, index: u32) -> Option<&ControlDef> {
        self.controls.iter().find(|c| c.index == index)
    }
}

/// A named bundle of window layouts.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WindowPack {
    pub name: String,
    pub windows: Vec<WindowDef>,
}

impl WindowPack {
    pub fn window(&self, id: u32) -> Option<&WindowDef> {
        self.windows.iter().find(|w| w.id == id)
    }
}

/// Localized strings keyed by strref.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct StringTable {
    entries: HashMap<u32, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, strref: u32, text: &str) {
        self.entries.insert(strref, text.to_string());
    }

    pub fn lookup(&self, strref: u32) -> Option<&str> {
        self.entries.get(&strref).map(|s| s.as_str())
    }
}

/// Everything the engine can hand out: window packs plus the string table.
#[derive(Clone, Debug, Default)]
pub struct ResourceSet {
    packs: HashMap<String, WindowPack>,
    pub strings: StringTable,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pack(&mut self, pack: WindowPack) {
        self.packs.insert(pack.name.clone(), pack);
    }

    pub fn pack(&self, name: &str) -> Option<&WindowPack> {
        self.packs.get(name)
    }

    /// The compiled-in resources for the character-import flow.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Load packs (`*.pack.json`) and the string table (`strings.json`) from
    /// a directory, overriding the built-in resources.
    pub fn load_dir(dir: &Path) -> Result<Self, String> {
        let mut set = Self::new();

        let entries = fs::read_dir(dir)
            .map_err(|e| format!("Failed to read resource dir {}: {}", dir.display(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| format!("Failed to read dir entry: {}", e))?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if file_name.ends_with(".pack.json") {
                let content = fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
                let pack: WindowPack = serde_json::from_str(&content)
                    .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
                set.add_pack(pack);
            } else if file_name == "strings.json" {
                let content = fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
                set.strings = serde_json::from_str(&content)
                    .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
            }
        }

        Ok(set)
    }
}

static BUILTIN: Lazy<ResourceSet> = Lazy::new(build_builtin);

fn build_builtin() -> ResourceSet {
    let mut set = ResourceSet::new();

    // Character generation pack. Window 20 is the import screen; control
    // index 3 is intentionally absent, matching the layout it was taken from.
    set.add_pack(WindowPack {
        name: "GUICG".to_string(),
        windows: vec![WindowDef {
            id: 20,
            title: "Import Character".to_string(),
            controls: vec![
                ControlDef {
                    index: 0,
                    kind: ControlKind::Button,
                    label: String::new(),
                },
                ControlDef {
                    index: 1,
                    kind: ControlKind::Button,
                    label: String::new(),
                },
                ControlDef {
                    index: 2,
                    kind: ControlKind::ListBox,
                    label: String::new(),
                },
                ControlDef {
                    index: 4,
                    kind: ControlKind::TextArea,
                    label: String::new(),
                },
            ],
        }],
    });

    // Minimal start screen the import dialog hands off to.
    set.add_pack(WindowPack {
        name: "START".to_string(),
        windows: vec![WindowDef {
            id: 0,
            title: "Main Menu".to_string(),
            controls: vec![
                ControlDef {
                    index: 0,
                    kind: ControlKind::TextArea,
                    label: String::new(),
                },
                ControlDef {
                    index: 1,
                    kind: ControlKind::Button,
                    label: String::new(),
                },
            ],
        }],
    });

    let mut strings = StringTable::new();
    strings.insert(
        53774,
        "Choose a character from a previous game to bring into this one. \
         The imported character keeps their experience, abilities and \
         equipment.",
    );
    strings.insert(2610, "Done");
    strings.insert(11973, "Import");
    strings.insert(15416, "Cancel");
    set.strings = strings;

    set
}
