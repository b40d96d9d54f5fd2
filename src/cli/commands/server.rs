use clap::{Arg, Command};

pub const CMD_SERVE: &str = "serve";
pub const ARG_PORT: &str = "port";
pub const ARG_SEED: &str = "seed";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new(CMD_SERVE)
            .about("Run an in-memory mock of the user collection")
            .arg(
                Arg::new(ARG_PORT)
                    .short('p')
                    .long("port")
                    .help("Port to listen on")
                    .default_value("8080")
                    .env("USERLIST_PORT")
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new(ARG_SEED)
                    .long("seed")
                    .help("JSON file with an array of users to start with")
                    .env("USERLIST_SEED"),
            ),
    )
}
