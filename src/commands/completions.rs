use clap_complete::shells;
use super::CommandError;
use crate::STDRESULT;

const BIN: &str = "rapidkit";

pub fn generate(mut main_cmd: clap::Command,cmd: &clap::ArgMatches) -> STDRESULT {
    let shell = match cmd.get_one::<String>("shell") {
        Some(s) => s.as_str(),
        None => return Err(Box::new(CommandError::InvalidCommand))
    };
    match shell {
        "bash" => clap_complete::generate(shells::Bash,&mut main_cmd,BIN,&mut std::io::stdout()),
        "elv" => clap_complete::generate(shells::Elvish,&mut main_cmd,BIN,&mut std::io::stdout()),
        "fish" => clap_complete::generate(shells::Fish,&mut main_cmd,BIN,&mut std::io::stdout()),
        "ps1" => clap_complete::generate(shells::PowerShell,&mut main_cmd,BIN,&mut std::io::stdout()),
        "zsh" => clap_complete::generate(shells::Zsh,&mut main_cmd,BIN,&mut std::io::stdout()),
        _ => {
            log::error!("unknown shell {}",shell);
            return Err(Box::new(CommandError::InvalidCommand));
        }
    }
    Ok(())
}
