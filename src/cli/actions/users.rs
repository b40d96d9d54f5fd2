use crate::cli::globals::GlobalArgs;
use crate::userlist::{
    ErrorPolicy, HttpStore, NewUser, RemoteStore, SyncError, Theme, ViewState,
    render::{self, Palette},
};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List {
        search: Option<String>,
    },
    Show {
        id: String,
    },
    Create(NewUser),
    Edit {
        id: String,
        name: Option<String>,
        city: Option<String>,
    },
    Delete {
        id: String,
    },
}

impl Command {
    /// Commands that work on the cached collection load it first.
    fn needs_collection(&self) -> bool {
        matches!(self, Self::List { .. } | Self::Show { .. } | Self::Edit { .. })
    }
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// Execute a user command against the configured collection.
/// # Errors
/// Returns an error if the API client cannot be built, the input is invalid, or
/// (unless errors are ignored) a remote call fails.
pub async fn execute(args: Args) -> Result<()> {
    let Args { globals, command } = args;

    let theme = match globals.theme_preference().init() {
        Ok(theme) => theme,
        Err(err) => {
            warn!("{err}");
            Theme::Dark
        }
    };
    let palette = Palette::new(theme, globals.color);

    let store = HttpStore::new(&globals.api_url, globals.timeout)
        .context("Failed to set up the API client")?;
    debug!("collection URL: {}", store.base_url());

    let mut state = ViewState::new(store);
    let mut stdout = std::io::stdout();

    run(&mut state, command, globals.policy, palette, &mut stdout).await
}

/// Run `command` on `state`, writing the resulting view to `out`.
/// # Errors
/// See [`execute`].
pub async fn run<S: RemoteStore, W: Write>(
    state: &mut ViewState<S>,
    command: Command,
    policy: ErrorPolicy,
    palette: Palette,
    out: &mut W,
) -> Result<()> {
    if command.needs_collection() {
        policy.handle(state.refresh().await.map(|_| ()))?;
    }

    match command {
        Command::List { search } => {
            if let Some(term) = search {
                state.set_search(term);
            }
            write!(out, "{}", render::table(&state.visible(), palette))?;
        }
        Command::Show { id } => {
            let found = state
                .find(&id)
                .cloned()
                .ok_or_else(|| SyncError::NotFound(id.trim().to_string()));
            if let Some(user) = policy.handle(found)? {
                write!(out, "{}", render::detail(&user, palette))?;
            }
        }
        Command::Create(new_user) => {
            new_user.validate().context("Invalid user")?;

            if let Some(created) = policy.handle(state.create(&new_user).await)? {
                writeln!(out, "Created user {}", created.id)?;
                write!(out, "{}", render::table(&state.visible(), palette))?;
            }
        }
        Command::Edit { id, name, city } => {
            if policy.handle(state.open_edit(&id).map(|_| ()))?.is_none() {
                return Ok(());
            }
            if let Some(name) = name {
                state.session_mut().set_name(name)?;
            }
            if let Some(city) = city {
                state.session_mut().set_city(city)?;
            }
            if let Some((_, patch)) = state.session().pending() {
                patch.validate().context("Invalid user")?;
            }

            if let Some(Some(updated)) = policy.handle(state.save_edit().await)? {
                writeln!(out, "Updated user {}", updated.id)?;
                write!(out, "{}", render::table(&state.visible(), palette))?;
            }
        }
        Command::Delete { id } => {
            if policy.handle(state.delete(&id).await)?.is_some() {
                writeln!(out, "Deleted user {}", id.trim())?;
                write!(out, "{}", render::table(&state.visible(), palette))?;
            }
        }
    }

    Ok(())
}
