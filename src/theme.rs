use crate::storage::KeyValueStorage;
use std::{fmt, str::FromStr, sync::Arc};
use tracing::{debug, error};

pub const THEME_KEY: &str = "vt-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// system -> dark -> light -> system
    pub fn next(self) -> Theme {
        match self {
            Theme::System => Theme::Dark,
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::System,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Appearance preference, kept apart from the health data.
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStorage>,
    theme: Theme,
}

impl ThemeStore {
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => Theme::System,
            Err(err) => {
                error!("failed to read theme: {err}");
                Theme::System
            }
        };
        Self { storage, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        let result = match theme {
            Theme::System => self.storage.remove(THEME_KEY),
            other => self.storage.set(THEME_KEY, other.as_str()),
        };
        match result {
            Ok(()) => debug!(%theme, "theme saved"),
            Err(err) => error!("failed to persist theme: {err}"),
        }
    }

    pub fn cycle(&mut self) -> Theme {
        let next = self.theme.next();
        self.set_theme(next);
        next
    }
}
