use clap::{Command, arg, value_parser};

pub const SCORE_CMD: &str = "score";

pub fn create_score_cli() -> Command {
    Command::new(SCORE_CMD)
        .about("Combine association p-values into one score per gene")
        .arg_required_else_help(true)
        .arg(
            arg!(-a --annotation <annotation> "Gene annotation file: name, min, max, chromosome")
                .required(true),
        )
        .arg(
            arg!(-r --results <results> "Association file, or a glob of them (quote it)")
                .required(true),
        )
        .arg(
            arg!(-o --output <output> "Score file; only valid when a single association file matches")
                .required(false),
        )
        .arg(
            arg!(-m --margin <margin> "Padding added to both ends of every gene")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(arg!(-c --config <config> "TOML scan config").required(false))
        .arg(
            arg!(-t --threads <threads> "Number of worker threads")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
}
