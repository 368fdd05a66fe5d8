//! # Command Line Interface
//!
//! Argument definitions are in `cli.rs`, the subcommands are in the `commands` module.

use env_logger;
#[cfg(windows)]
use colored;
use rapidkit::commands;
use rapidkit::commands::CommandError;

mod cli;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    #[cfg(windows)]
    if colored::control::set_virtual_terminal(true).is_err() {
        log::warn!("could not enable ANSI colors");
    }

    let main_cmd = cli::build_cli();
    let matches = main_cmd.clone().get_matches();

    if let Some(cmd) = matches.subcommand_matches("completions") {
        return commands::completions::generate(main_cmd,cmd);
    }

    if let Some(cmd) = matches.subcommand_matches("outline") {
        return commands::outline::outline(cmd);
    }

    if let Some(cmd) = matches.subcommand_matches("highlight") {
        return commands::highlight::highlight(cmd);
    }

    log::error!("No subcommand was found, try `rapidkit --help`");
    return Err(Box::new(CommandError::InvalidCommand));
}
