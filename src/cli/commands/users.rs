use clap::{Arg, ArgAction, ArgGroup, Command};

pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_CREATE: &str = "create";
pub const CMD_EDIT: &str = "edit";
pub const CMD_DELETE: &str = "delete";

pub const ARG_ID: &str = "id";
pub const ARG_SEARCH: &str = "search";
pub const ARG_AVATAR: &str = "avatar";
pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_CITY: &str = "city";
pub const ARG_PHONE: &str = "phone";
pub const ARG_ACTIVE: &str = "active";

fn id_arg() -> Arg {
    Arg::new(ARG_ID).help("User id").required(true)
}

fn required_field(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help).required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LIST)
                .about("Show the user table")
                .arg(
                    Arg::new(ARG_SEARCH)
                        .short('s')
                        .long("search")
                        .help("Only show users whose name contains this text (case-insensitive)"),
                ),
        )
        .subcommand(
            Command::new(CMD_SHOW)
                .about("Show the profile of a user")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new(CMD_CREATE)
                .about("Add a user")
                .arg(required_field(ARG_AVATAR, "Avatar URL"))
                .arg(required_field(ARG_NAME, "Name"))
                .arg(required_field(ARG_EMAIL, "Email"))
                .arg(required_field(ARG_CITY, "City"))
                .arg(required_field(ARG_PHONE, "Phone"))
                .arg(
                    Arg::new(ARG_ACTIVE)
                        .long("active")
                        .help("Mark the user as active")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new(CMD_EDIT)
                .about("Change the name and/or city of a user")
                .arg(id_arg())
                .arg(Arg::new(ARG_NAME).long("name").help("New name"))
                .arg(Arg::new(ARG_CITY).long("city").help("New city"))
                .group(
                    ArgGroup::new("fields")
                        .args([ARG_NAME, ARG_CITY])
                        .multiple(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a user")
                .arg(id_arg()),
        )
}
