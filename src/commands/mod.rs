//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod outline;
pub mod highlight;
pub mod completions;

use std::str::FromStr;

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("Output format is unknown")]
    UnknownFormat,
    #[error("File not found")]
    FileNotFound,
    #[error("Module or routine not found")]
    ItemNotFound
}

/// Ways the subcommands can present their results
#[derive(PartialEq,Clone,Copy,Debug)]
pub enum OutputFormat {
    /// indented tree for the console
    Text,
    /// console text with ANSI colors
    Ansi,
    /// the library structures serialized
    Json,
    /// LSP structures serialized
    Lsp
}

impl FromStr for OutputFormat {
    type Err = CommandError;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "ansi" => Ok(Self::Ansi),
            "json" => Ok(Self::Json),
            "lsp" => Ok(Self::Lsp),
            _ => Err(CommandError::UnknownFormat)
        }
    }
}

/// Display name of the input, the file name if there is a path
pub fn display_name(cmd: &clap::ArgMatches) -> String {
    if let Some(name) = cmd.get_one::<String>("name") {
        return name.to_string();
    }
    match cmd.get_one::<String>("file") {
        Some(path) => match std::path::Path::new(path).file_name() {
            Some(f) => f.to_string_lossy().to_string(),
            None => path.to_string()
        },
        None => "stdin".to_string()
    }
}
