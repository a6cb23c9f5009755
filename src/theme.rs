// src/theme.rs
// =============================================================================
// Light/dark theme preference and the terminal colours that go with it.
//
// The preference is the only thing this program persists. It lives behind
// the ThemeStore trait so the command handlers never touch the filesystem
// directly:
// - FileThemeStore: a tiny TOML file with one key, `app-theme`
// - MemoryThemeStore: used by tests
//
// Loading never fails. An absent or unreadable preference falls back to
// DEFAULT_THEME.
// =============================================================================

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{AppError, Result};

#[cfg(test)]
use std::cell::Cell;

pub const DEFAULT_THEME: Theme = Theme::Dark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(AppError::InvalidInput(format!("unknown theme '{}'", other))),
        }
    }
}

pub trait ThemeStore {
    fn load(&self) -> Theme;
    fn save(&self, theme: Theme) -> Result<()>;
}

// On-disk layout of the preference file:
//
//   app-theme = "dark"
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreference {
    #[serde(rename = "app-theme", skip_serializing_if = "Option::is_none")]
    app_theme: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    // <config dir>/repo-finder/theme.toml, or ./theme.toml when the platform
    // has no config directory
    pub fn default_location() -> Self {
        let path = dirs::config_dir()
            .map(|dir| dir.join("repo-finder").join("theme.toml"))
            .unwrap_or_else(|| PathBuf::from("theme.toml"));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Theme {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no stored theme, using default");
                return DEFAULT_THEME;
            }
        };

        let stored: StoredPreference = match toml::from_str(&content) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable theme file, using default");
                return DEFAULT_THEME;
            }
        };

        match stored.app_theme.as_deref().map(Theme::from_str) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                warn!(error = %e, "invalid stored theme, using default");
                DEFAULT_THEME
            }
            None => DEFAULT_THEME,
        }
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let stored = StoredPreference {
            app_theme: Some(theme.as_str().to_string()),
        };
        let content = toml::to_string(&stored).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(&self.path, content)?;

        debug!(path = %self.path.display(), %theme, "theme saved");
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    stored: Cell<Option<Theme>>,
}

#[cfg(test)]
impl MemoryThemeStore {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            stored: Cell::new(Some(theme)),
        }
    }
}

#[cfg(test)]
impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Theme {
        self.stored.get().unwrap_or(DEFAULT_THEME)
    }

    fn save(&self, theme: Theme) -> Result<()> {
        self.stored.set(Some(theme));
        Ok(())
    }
}

// Loads the current theme, flips it, saves it, and returns the new value
pub fn toggle_theme(store: &dyn ThemeStore) -> Result<Theme> {
    let next = store.load().toggle();
    store.save(next)?;
    Ok(next)
}

// Terminal styles for one theme.
//
// Light terminals get darker colours, dark terminals brighter ones. Whether
// colour is emitted at all is decided globally through
// colored::control::set_override (see --no-color).
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    theme: Theme,
}

impl Palette {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn title(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.blue().bold(),
            Theme::Dark => text.bright_cyan().bold(),
        }
    }

    pub fn heading(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.black().bold(),
            Theme::Dark => text.white().bold(),
        }
    }

    pub fn muted(&self, text: &str) -> ColoredString {
        text.bright_black()
    }

    pub fn link(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.blue().underline(),
            Theme::Dark => text.bright_blue().underline(),
        }
    }

    pub fn stat(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.yellow(),
            Theme::Dark => text.bright_yellow(),
        }
    }

    pub fn code(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.magenta(),
            Theme::Dark => text.bright_magenta(),
        }
    }

    pub fn error(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.red(),
            Theme::Dark => text.bright_red(),
        }
    }

    pub fn selected(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.white().on_blue().bold(),
            Theme::Dark => text.black().on_bright_cyan().bold(),
        }
    }

    pub fn disabled(&self, text: &str) -> ColoredString {
        text.bright_black().dimmed()
    }
}
