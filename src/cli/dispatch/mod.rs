//! Maps parsed CLI arguments to the action to run.

use crate::cli::actions::{
    Action, server,
    theme::{self, Mode},
    users::{self, Command},
};
use crate::cli::commands::{
    server::{ARG_PORT, ARG_SEED, CMD_SERVE},
    theme::{ARG_MODE, CMD_THEME},
    users::{
        ARG_ACTIVE, ARG_AVATAR, ARG_CITY, ARG_EMAIL, ARG_ID, ARG_NAME, ARG_PHONE, ARG_SEARCH,
        CMD_CREATE, CMD_DELETE, CMD_EDIT, CMD_LIST, CMD_SHOW,
    },
};
use crate::cli::globals::GlobalArgs;
use crate::userlist::NewUser;
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    string(matches, id).with_context(|| format!("missing required argument: {id}"))
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the subcommand is unknown or a required argument is missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let (name, sub_m) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("missing subcommand"))?;

    let globals = GlobalArgs::parse(sub_m);

    let action = match name {
        CMD_LIST => users_action(
            globals,
            Command::List {
                search: string(sub_m, ARG_SEARCH),
            },
        ),
        CMD_SHOW => users_action(
            globals,
            Command::Show {
                id: required(sub_m, ARG_ID)?,
            },
        ),
        CMD_CREATE => users_action(
            globals,
            Command::Create(NewUser {
                name: required(sub_m, ARG_NAME)?,
                city: required(sub_m, ARG_CITY)?,
                email: required(sub_m, ARG_EMAIL)?,
                phone: required(sub_m, ARG_PHONE)?,
                status: sub_m.get_flag(ARG_ACTIVE),
                avatar: required(sub_m, ARG_AVATAR)?,
            }),
        ),
        CMD_EDIT => users_action(
            globals,
            Command::Edit {
                id: required(sub_m, ARG_ID)?,
                name: string(sub_m, ARG_NAME),
                city: string(sub_m, ARG_CITY),
            },
        ),
        CMD_DELETE => users_action(
            globals,
            Command::Delete {
                id: required(sub_m, ARG_ID)?,
            },
        ),
        CMD_THEME => Action::Theme(theme::Args {
            globals,
            mode: Mode::parse(&required(sub_m, ARG_MODE)?)?,
        }),
        CMD_SERVE => Action::Server(server::Args {
            port: sub_m.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080),
            seed: string(sub_m, ARG_SEED),
        }),
        other => return Err(anyhow!("unknown command: {other}")),
    };

    Ok(action)
}

fn users_action(globals: GlobalArgs, command: Command) -> Action {
    Action::Users(users::Args { globals, command })
}
