use clap::{Arg, Command, builder::PossibleValuesParser};

pub const CMD_THEME: &str = "theme";
pub const ARG_MODE: &str = "mode";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new(CMD_THEME)
            .about("Show, toggle or set the color theme")
            .arg(
                Arg::new(ARG_MODE)
                    .help("What to do with the theme")
                    .default_value("show")
                    .value_parser(PossibleValuesParser::new([
                        "show", "toggle", "dark", "light",
                    ])),
            ),
    )
}
