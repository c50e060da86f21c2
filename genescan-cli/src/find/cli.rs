use clap::{Command, arg, value_parser};

pub const FIND_CMD: &str = "find";

pub fn create_find_cli() -> Command {
    Command::new(FIND_CMD)
        .about("Report the genes whose padded span contains each query position")
        .arg_required_else_help(true)
        .arg(
            arg!(-a --annotation <annotation> "Gene annotation file: name, min, max, chromosome")
                .required(true),
        )
        .arg(
            arg!(-q --queries <queries> "Query positions (chromosome<TAB>position), or '-' for stdin")
                .required(false)
                .default_value("-"),
        )
        .arg(
            arg!(-m --margin <margin> "Padding added to both ends of every gene")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(arg!(-c --config <config> "TOML scan config").required(false))
}
