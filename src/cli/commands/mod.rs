pub mod logging;
pub mod server;
pub mod theme;
pub mod users;

use crate::userlist::DEFAULT_API_URL;
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_PREFERENCES: &str = "preferences";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_IGNORE_ERRORS: &str = "ignore-errors";
pub const ARG_NO_COLOR: &str = "no-color";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("userlist")
        .about("User list client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("URL of the user collection")
                .env("USERLIST_API_URL")
                .default_value(DEFAULT_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_PREFERENCES)
                .long("preferences")
                .help("Preference file (default: <config dir>/userlist/preferences.json)")
                .env("USERLIST_PREFERENCES")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds (default: none)")
                .env("USERLIST_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_IGNORE_ERRORS)
                .long("ignore-errors")
                .help("Log failed requests and keep showing the last known data")
                .env("USERLIST_IGNORE_ERRORS")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_NO_COLOR)
                .long("no-color")
                .help("Disable colored output")
                .env("USERLIST_NO_COLOR")
                .global(true)
                .action(ArgAction::SetTrue),
        );

    let command = users::with_subcommands(command);
    let command = theme::with_subcommands(command);
    let command = server::with_subcommands(command);
    logging::with_args(command)
}
