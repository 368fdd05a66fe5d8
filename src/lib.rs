//! # `rapidkit` main library
//!
//! This library analyzes source files written in RAPID, the programming language of ABB industrial
//! robot controllers.  It is meant to back an editor or a command line tool, so it never declines to
//! produce a result for text that decodes: malformed structure is recovered as well as possible.
//!
//! ## Architecture
//!
//! There are two independent services in `lang::rapid`:
//! * `parser::StructureParser` decodes raw bytes and breaks the text into modules, routines, and
//!   module level declarations, tolerating missing or stray end markers
//! * `highlighter::Classifier` assigns a lexical category to every byte of any text, line by line,
//!   with no knowledge of structure
//!
//! Results can be converted for an LSP client using `lang::rapid::symbols` (document outline)
//! and `lang::rapid::semantic_tokens` (highlighting).
//!
//! ## Vocabulary
//!
//! Declaration keywords, reserved words, data types, and instructions are lookup tables that are
//! compiled into the library from JSON.  The tables can be replaced at runtime using a settings
//! string, see `lang::rapid::settings`.

pub mod lang;
pub mod commands;

use std::io::Read;
use log::{debug,error};

pub type DYNERR = Box<dyn std::error::Error>;
pub type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Read the bytes of a source file, or of stdin if there is no path.
/// Stdin is refused if it is a console, since line entry is not supported.
pub fn read_source(maybe_path: Option<&String>) -> Result<Vec<u8>,DYNERR> {
    let mut ans = Vec::new();
    match maybe_path {
        Some(path) => {
            if !std::path::Path::new(path).exists() {
                error!("could not find {}",path);
                return Err(Box::new(commands::CommandError::FileNotFound));
            }
            ans = std::fs::read(path)?;
        },
        None => {
            if atty::is(atty::Stream::Stdin) {
                error!("line entry is not supported, please pipe something in or use `--file`");
                return Err(Box::new(commands::CommandError::InvalidCommand));
            }
            std::io::stdin().read_to_end(&mut ans)?;
        }
    }
    debug!("read {} bytes",ans.len());
    Ok(ans)
}

/// Read the settings file if one was given, otherwise return the defaults.
pub fn read_settings(maybe_path: Option<&String>) -> Result<lang::rapid::settings::Settings,DYNERR> {
    match maybe_path {
        Some(path) => {
            let json = match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    error!("could not read settings from {}",path);
                    return Err(Box::new(e));
                }
            };
            lang::rapid::settings::parse(&json)
        },
        None => Ok(lang::rapid::settings::Settings::new())
    }
}

/// Serialize for output, `indent` of `None` minifies.
pub fn to_json<T: serde::Serialize>(obj: &T, indent: Option<u16>) -> Result<String,DYNERR> {
    match indent {
        None => Ok(serde_json::to_string(obj)?),
        Some(spaces) => {
            let pad = vec![b' ';spaces as usize];
            let fmt = serde_json::ser::PrettyFormatter::with_indent(&pad);
            let mut buf = Vec::new();
            let mut ser = serde_json::Serializer::with_formatter(&mut buf,fmt);
            obj.serialize(&mut ser)?;
            Ok(String::from_utf8(buf)?)
        }
    }
}
