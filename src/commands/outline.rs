//! ## Outline subcommand
//!
//! Parse a source file and write its structure to stdout.

use std::str::FromStr;
use colored::Colorize;
use super::{CommandError,OutputFormat};
use crate::lang::rapid::{SourceFile,Module,Routine};
use crate::lang::rapid::parser::StructureParser;
use crate::lang::rapid::symbols;
use crate::STDRESULT;

const RCH: &str = "unreachable was reached";

fn routine_line(routine: &Routine) -> String {
    let mut ans = String::new();
    if routine.local {
        ans += "LOCAL ";
    }
    ans += routine.kind.keyword();
    ans += " ";
    if let Some(typ) = &routine.return_type {
        ans += typ;
        ans += " ";
    }
    format!("{}{}({}) [{}-{}]",ans,routine.name.bold(),routine.parameters.join(", "),routine.line_number,routine.end_line)
}

fn module_lines(module: &Module) -> Vec<String> {
    let mut ans = vec![format!("{} {} [{}-{}]",
        module.kind.keyword().blue(),module.name.bold(),module.line_number,module.end_line)];
    for dec in &module.declarations {
        ans.push(format!("    {}",dec.green()));
    }
    for routine in &module.routines {
        ans.push(format!("    {}",routine_line(routine)));
    }
    ans
}

/// Indented tree, one module per paragraph
pub fn text_outline(file: &SourceFile) -> String {
    let mut ans = String::new();
    for module in &file.modules {
        for line in module_lines(module) {
            ans += &line;
            ans += "\n";
        }
    }
    ans
}

pub fn outline(cmd: &clap::ArgMatches) -> STDRESULT {
    let fmt = OutputFormat::from_str(cmd.get_one::<String>("format").expect(RCH))?;
    let indent = cmd.get_one::<u16>("indent").copied();
    let settings = crate::read_settings(cmd.get_one::<String>("config"))?;
    let bytes = crate::read_source(cmd.get_one::<String>("file"))?;
    let parser = StructureParser::with_vocabulary(settings.vocabulary);
    let name = super::display_name(cmd);
    let file = match parser.parse(&bytes,Some(name.as_str())) {
        Ok(f) => f,
        Err(e) => {
            log::error!("could not decode the source: {}",e);
            return Err(Box::new(e));
        }
    };
    match fmt {
        OutputFormat::Text => {
            print!("{}",text_outline(&file));
            eprintln!("{} modules, {}",file.modules.len(),file.encoding);
        },
        OutputFormat::Json => println!("{}",crate::to_json(&file,indent)?),
        OutputFormat::Lsp => println!("{}",crate::to_json(&symbols::document_symbols(&file),indent)?),
        OutputFormat::Ansi => {
            log::error!("use `text` to outline for the console");
            return Err(Box::new(CommandError::UnknownFormat));
        }
    }
    Ok(())
}
