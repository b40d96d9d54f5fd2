use crate::cli::globals::GlobalArgs;
use crate::userlist::{PreferenceStore, Theme, ThemePreference};
use anyhow::{Context, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Show,
    Toggle,
    Set(Theme),
}

impl Mode {
    /// # Errors
    /// Returns an error for an unknown mode name.
    pub fn parse(mode: &str) -> Result<Self> {
        match mode {
            "show" => Ok(Self::Show),
            "toggle" => Ok(Self::Toggle),
            other => other
                .parse::<Theme>()
                .map(Self::Set)
                .map_err(|err| anyhow::anyhow!(err)),
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub mode: Mode,
}

/// Execute the theme action against the preference file.
/// # Errors
/// Returns an error if the preference file cannot be read or written.
pub fn execute(args: &Args) -> Result<()> {
    let preference = args.globals.theme_preference();
    let theme = apply(&preference, args.mode).with_context(|| {
        format!(
            "Failed to update theme in {}",
            args.globals.preferences.display()
        )
    })?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "theme: {theme}")?;

    Ok(())
}

/// Resolve the startup theme, then apply `mode` on top of it.
/// # Errors
/// Returns an error if the store cannot be read or written.
pub fn apply<S: PreferenceStore>(preference: &ThemePreference<S>, mode: Mode) -> Result<Theme> {
    let current = preference.init()?;

    let theme = match mode {
        Mode::Show => current,
        Mode::Toggle => preference.toggle()?,
        Mode::Set(theme) => {
            preference.set(theme)?;
            theme
        }
    };

    Ok(theme)
}
