use crate::cli::commands::{
    ARG_API_URL, ARG_IGNORE_ERRORS, ARG_NO_COLOR, ARG_PREFERENCES, ARG_TIMEOUT,
};
use crate::userlist::{DEFAULT_API_URL, ErrorPolicy, FileStore, ThemePreference};
use std::{io::IsTerminal, path::PathBuf, time::Duration};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub preferences: PathBuf,
    pub timeout: Option<Duration>,
    pub policy: ErrorPolicy,
    pub color: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            preferences: default_preferences_path(),
            timeout: None,
            policy: ErrorPolicy::Surface,
            color: false,
        }
    }

    /// Read the global options from the matches of any (sub)command.
    #[must_use]
    pub fn parse(matches: &clap::ArgMatches) -> Self {
        let api_url = matches
            .get_one::<String>(ARG_API_URL)
            .cloned()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut globals = Self::new(api_url);

        if let Some(path) = matches.get_one::<String>(ARG_PREFERENCES) {
            globals.preferences = expand_tilde(path);
        }

        globals.timeout = matches
            .get_one::<u64>(ARG_TIMEOUT)
            .copied()
            .map(Duration::from_secs);

        if matches.get_flag(ARG_IGNORE_ERRORS) {
            globals.policy = ErrorPolicy::Ignore;
        }

        globals.color = !matches.get_flag(ARG_NO_COLOR) && std::io::stdout().is_terminal();

        globals
    }

    #[must_use]
    pub fn theme_preference(&self) -> ThemePreference<FileStore> {
        ThemePreference::new(FileStore::new(&self.preferences))
    }
}

/// `<config dir>/userlist/preferences.json`, falling back to `~/.userlist`.
#[must_use]
pub fn default_preferences_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("userlist").join(PREFERENCES_FILE);
    }

    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".userlist").join(PREFERENCES_FILE);
    }

    PathBuf::from(PREFERENCES_FILE)
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}
