use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the optional settings file inside the notes root
pub const CONFIG_FILE_NAME: &str = ".manda.toml";

/// Environment variable naming the notes root
pub const ROOT_ENV_VAR: &str = "MANDA_DIR";

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding every daily note
    pub root: PathBuf,
    pub file: ConfigFile,
}

/// Settings read from `.manda.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Explicit editor command; wins over $EDITOR and $VISUAL
    #[serde(default)]
    pub command: Option<String>,
    /// Editors probed on PATH, in order, when nothing else is set
    #[serde(default = "default_preferred")]
    pub preferred: Vec<String>,
    /// Used when no preferred editor is installed
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            command: None,
            preferred: default_preferred(),
            fallback: default_fallback(),
        }
    }
}

fn default_preferred() -> Vec<String> {
    ["micro", "vim", "vi", "nano"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_fallback() -> String {
    "nano".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// How many days the oldest-note scan covers, starting one year back
    #[serde(default = "default_search_window_days")]
    pub search_window_days: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            search_window_days: default_search_window_days(),
        }
    }
}

fn default_search_window_days() -> u32 {
    365
}

/// `[ui]` section: color overrides for the preview and task screens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme slot name to `#RRGGBB`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
