mod common;
mod find;
mod score;

use anyhow::Result;
use clap::Command;
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "genescan";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Gene-level scanning of association results over padded gene annotations.")
        .subcommand_required(true)
        .subcommand(find::cli::create_find_cli())
        .subcommand(score::cli::create_score_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // GENE LOOKUP
        //
        Some((find::cli::FIND_CMD, matches)) => {
            find::handlers::run_find(matches)?;
        }

        //
        // GENE SCORING
        //
        Some((score::cli::SCORE_CMD, matches)) => {
            score::handlers::run_score(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
