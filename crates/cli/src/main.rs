use std::process::ExitCode;

use clap::{ArgAction, Parser};

mod commands;
mod printer;

use commands::Command;
use filedeck_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "filedeck",
    version,
    about = "List, sort and filter project files the way an editor file panel does",
    propagate_version = true
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_verbose(cli.verbose).ok();

    match cli.command {
        Command::List(args) => commands::list::run(args),
        Command::Types(args) => commands::types::run(args),
        Command::Fav(args) => commands::fav::run(args),
    }
}
