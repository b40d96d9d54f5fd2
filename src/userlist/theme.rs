//! Light/dark theme preference, persisted under a single `"theme"` key in an
//! injected preference store.

use super::errors::PreferenceError;
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Mutex,
};
use tracing::debug;

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
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
        match value {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Key/value storage for local preferences.
pub trait PreferenceStore {
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Volatile store, handy for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in a file. A missing file reads as
/// empty; parent directories are created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn load(&self) -> Result<Map<String, Value>, PreferenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&contents).map_err(|source| PreferenceError::Json {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self
            .load()?
            .get(key)
            .and_then(Value::as_str)
            .map(ToString::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        let contents = serde_json::to_string_pretty(&values).map_err(|source| {
            PreferenceError::Json {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        fs::write(&self.path, contents).map_err(|err| self.io_error(err))?;

        debug!(path = %self.path.display(), key, value, "preference saved");

        Ok(())
    }
}

/// Theme preference service over an injected store.
#[derive(Debug)]
pub struct ThemePreference<S> {
    store: S,
}

impl<S: PreferenceStore> ThemePreference<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the startup theme: `"dark"` or nothing stored means dark,
    /// anything else means light. The resolved value is written back.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn init(&self) -> Result<Theme, PreferenceError> {
        let theme = self.get()?;
        self.set(theme)?;

        Ok(theme)
    }

    /// The stored theme, without writing. Unknown values read as light,
    /// nothing stored reads as dark.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn get(&self) -> Result<Theme, PreferenceError> {
        Ok(match self.store.get(THEME_KEY)?.as_deref() {
            None | Some("dark") => Theme::Dark,
            Some(_) => Theme::Light,
        })
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn set(&self, theme: Theme) -> Result<(), PreferenceError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Flip the stored theme and return the new one.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn toggle(&self) -> Result<Theme, PreferenceError> {
        let next = match self.store.get(THEME_KEY)?.as_deref() {
            Some("dark") => Theme::Light,
            _ => Theme::Dark,
        };
        self.set(next)?;

        Ok(next)
    }
}
