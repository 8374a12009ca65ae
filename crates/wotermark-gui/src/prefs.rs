use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use wotermark_core::api::DEFAULT_ENDPOINT;

const PREFS_FILE: &str = "preferences.toml";

/// Light/dark/system theme choice, persisted across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }

    pub fn apply(&self, ctx: &egui::Context) {
        let theme = match self {
            Self::Light => egui::ThemePreference::Light,
            Self::Dark => egui::ThemePreference::Dark,
            Self::System => egui::ThemePreference::System,
        };
        ctx.set_theme(theme);
    }
}

/// Small persisted preferences file (theme + endpoint), stored next to the
/// watermark slot in the app's data directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: ThemePreference,
    pub endpoint: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemePreference::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Preferences {
    fn path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("wotermark");
        path.push(PREFS_FILE);
        path
    }

    /// Load preferences, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load() -> Self {
        let path = Self::path();
        match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("ignoring malformed preferences {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Best-effort save; a failure degrades to session-only preferences.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            warn!("failed to save preferences: {e:#}");
        }
    }

    fn try_save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
