//! Light/dark preference: parsing, persistence, and the document style scope.

use log::Level;
use serde_json::json;
use thiserror::Error;

use crate::logging::log_event;

pub const THEME_KEY: &str = "theme";
pub const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored preference. Anything other than `light`/`dark` is `None`.
    pub fn from_stored(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("light") {
            Some(Self::Light)
        } else if value.eq_ignore_ascii_case("dark") {
            Some(Self::Dark)
        } else {
            None
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Shows the theme a click switches to.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

/// What the root element carries for a given theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleScope {
    pub dark_class: bool,
    pub data_theme: &'static str,
}

pub fn style_scope(theme: Theme) -> StyleScope {
    StyleScope {
        dark_class: matches!(theme, Theme::Dark),
        data_theme: theme.as_str(),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("preference storage failed: {0}")]
    Backend(String),
}

/// Durable key-value slot for the theme preference.
pub trait ThemeStore {
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&self, value: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Debug)]
pub struct ThemeService<S> {
    store: S,
}

impl<S: ThemeStore> ThemeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored preference, or [`Theme::Light`] when it is absent or unusable.
    pub fn resolve(&self) -> Theme {
        match self.store.read() {
            Ok(Some(value)) => Theme::from_stored(&value).unwrap_or_else(|| {
                log_event(
                    Level::Warn,
                    "theme.malformed_preference",
                    json!({ "value": value }),
                );
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(error) => {
                log_event(
                    Level::Warn,
                    "theme.read_failed",
                    json!({ "error": error.to_string() }),
                );
                Theme::default()
            }
        }
    }

    /// Flips `current` and persists the result. A failed write keeps the toggle.
    pub fn toggle(&self, current: Theme) -> Theme {
        let next = current.toggled();

        if let Err(error) = self.store.write(next.as_str()) {
            log_event(
                Level::Warn,
                "theme.write_failed",
                json!({ "theme": next.as_str(), "error": error.to_string() }),
            );
        }

        log_event(Level::Debug, "theme.toggled", json!({ "theme": next.as_str() }));
        next
    }
}
