//! Display theme store — peripheral, process-wide state.
//!
//! One injectable source of truth for light/dark mode. Seeding order on
//! init: the persisted preference file if present, otherwise the system
//! appearance probe, otherwise light. Changes persist back to disk and
//! notify subscribers. Nothing in the capture/export path reads this;
//! it exists purely so consumers style themselves consistently.
//!
//! The preference lives in the platform config directory:
//!   macOS:   ~/Library/Application Support/snapclip/theme.json
//!   Linux:   ~/.config/snapclip/theme.json
//!   Windows: %APPDATA%/snapclip/theme.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Probe for the operating system's preferred appearance, kept behind a
/// trait so hosts wire in whatever their windowing layer reports and
/// tests stay deterministic.
pub trait SystemAppearance: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

/// Fallback probe for hosts without an appearance signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPreference;

impl SystemAppearance for NoPreference {
    fn prefers_dark(&self) -> bool {
        false
    }
}

#[derive(Serialize, Deserialize)]
struct StoredPreference {
    theme: Theme,
}

/// Process-wide theme holder with persistence and change notification.
#[derive(Debug)]
pub struct ThemeStore {
    current: watch::Sender<Theme>,
    path: Option<PathBuf>,
}

impl ThemeStore {
    /// Loads the persisted preference from the default location, falling
    /// back to the system probe.
    pub fn init(system: &dyn SystemAppearance) -> Self {
        Self::init_at(default_preference_path(), system)
    }

    /// Like [`init`](Self::init) with an explicit preference file, or
    /// `None` for a purely in-memory store.
    pub fn init_at(path: Option<PathBuf>, system: &dyn SystemAppearance) -> Self {
        let seeded = path
            .as_deref()
            .and_then(load_preference)
            .unwrap_or_else(|| {
                if system.prefers_dark() {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            });

        log::info!("Theme store initialized: {:?}", seeded);
        let (current, _) = watch::channel(seeded);
        Self { current, path }
    }

    pub fn theme(&self) -> Theme {
        *self.current.borrow()
    }

    /// Sets the theme, persists it, and notifies subscribers. A failed
    /// persist is logged and otherwise ignored; the in-memory value is
    /// still authoritative for this process.
    pub fn set(&self, theme: Theme) {
        self.current.send_replace(theme);
        if let Some(path) = &self.path {
            if let Err(e) = store_preference(path, theme) {
                log::warn!("Failed to persist theme preference: {}", e);
            }
        }
    }

    pub fn toggle(&self) {
        self.set(self.theme().toggled());
    }

    /// Subscribes to theme changes. Receivers observe the current value
    /// immediately and every change thereafter.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.current.subscribe()
    }
}

fn default_preference_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snapclip").join("theme.json"))
}

fn load_preference(path: &std::path::Path) -> Option<Theme> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<StoredPreference>(&raw) {
        Ok(stored) => Some(stored.theme),
        Err(e) => {
            log::warn!("Ignoring malformed theme preference at {}: {}", path.display(), e);
            None
        }
    }
}

fn store_preference(path: &std::path::Path, theme: Theme) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&StoredPreference { theme })?;
    std::fs::write(path, json)
}
