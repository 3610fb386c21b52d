use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

const DEFAULT_CLIENT: &str = "svn";

/// Settings for the tool itself, read from `<config dir>/nts/config.yaml`.
///
/// The project list lives elsewhere (see `projects`); this only controls
/// which client binary is driven and where diagnostics are logged.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_client")]
    pub client: String,
    #[serde(default = "default_logs_dir", deserialize_with = "deserialize_path")]
    pub logs_dir: PathBuf,
}

fn default_client() -> String {
    DEFAULT_CLIENT.to_string()
}

fn default_logs_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("nts")
        .join("logs")
}

fn deserialize_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    expand_tilde(&s).ok_or_else(|| serde::de::Error::custom("could not determine home directory"))
}

fn expand_tilde(path: &str) -> Option<PathBuf> {
    if let Some(stripped) = path.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(stripped))
    } else if path == "~" {
        dirs::home_dir()
    } else {
        Some(PathBuf::from(path))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client: default_client(),
            logs_dir: default_logs_dir(),
        }
    }
}

/// Where the settings came from. Logging is not up yet when settings are
/// read, so `main` logs this once the loggers exist.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsSource {
    File(PathBuf),
    Ignored { path: PathBuf, reason: String },
    Defaults(Option<PathBuf>),
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::File(path) => write!(f, "loaded from {}", path.display()),
            SettingsSource::Ignored { path, reason } => {
                write!(f, "ignoring {} ({}), using defaults", path.display(), reason)
            }
            SettingsSource::Defaults(Some(path)) => {
                write!(f, "using defaults (no settings file at {})", path.display())
            }
            SettingsSource::Defaults(None) => {
                write!(f, "using defaults (no config directory)")
            }
        }
    }
}

impl Settings {
    pub fn load() -> (Self, SettingsSource) {
        let settings_path = dirs::config_dir().map(|p| p.join("nts").join("config.yaml"));
        Self::load_from(settings_path)
    }

    pub fn load_from(settings_path: Option<PathBuf>) -> (Self, SettingsSource) {
        let Some(path) = settings_path.clone().filter(|p| p.exists()) else {
            return (Self::default(), SettingsSource::Defaults(settings_path));
        };

        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                serde_yml::from_str::<Settings>(&contents).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(settings) => (settings, SettingsSource::File(path)),
            Err(reason) => (Self::default(), SettingsSource::Ignored { path, reason }),
        }
    }

    /// Apply a command-line client override on top of the file settings.
    pub fn with_client(mut self, client: Option<String>) -> Self {
        if let Some(client) = client.filter(|c| !c.trim().is_empty()) {
            self.client = client;
        }
        self
    }
}
