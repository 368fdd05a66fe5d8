//! ## Highlight subcommand
//!
//! Classify a whole file, or the content of one module or routine, and write the spans to stdout.

use std::str::FromStr;
use colored::{Colorize,ColoredString};
use super::{CommandError,OutputFormat};
use crate::lang::rapid::{Category,ClassifiedSpan};
use crate::lang::rapid::highlighter::Classifier;
use crate::lang::rapid::parser::StructureParser;
use crate::lang::rapid::semantic_tokens::{self,SemanticTokensBuilder};
use crate::{STDRESULT,DYNERR};

const RCH: &str = "unreachable was reached";

/// Semantic tokens together with the legend that decodes their types
#[derive(serde::Serialize)]
struct LspTokens {
    legend: lsp_types::SemanticTokensLegend,
    tokens: lsp_types::SemanticTokens
}

fn paint(txt: &str, cat: Category) -> ColoredString {
    match cat {
        Category::Keyword => txt.blue().bold(),
        Category::DataType => txt.cyan(),
        Category::Instruction => txt.yellow(),
        Category::Comment => txt.green(),
        Category::StringLiteral => txt.red(),
        Category::NumberLiteral => txt.magenta(),
        Category::Plain => txt.normal()
    }
}

/// Text colored for the console, spans must be from `text`
pub fn ansi_text(text: &str, spans: &[ClassifiedSpan]) -> String {
    let mut ans = String::new();
    for span in spans {
        ans += &paint(&text[span.range()],span.category).to_string();
    }
    ans
}

/// The text selected by the `module` and `routine` arguments
fn select_text(cmd: &clap::ArgMatches, parser: &StructureParser, bytes: &[u8]) -> Result<String,DYNERR> {
    let name = super::display_name(cmd);
    let file = match parser.parse(bytes,Some(name.as_str())) {
        Ok(f) => f,
        Err(e) => {
            log::error!("could not decode the source: {}",e);
            return Err(Box::new(e));
        }
    };
    let mod_name = match cmd.get_one::<String>("module") {
        Some(m) => m,
        None => return Ok(file.text)
    };
    let module = match file.module(mod_name) {
        Some(m) => m,
        None => {
            log::error!("module {} was not found",mod_name);
            return Err(Box::new(CommandError::ItemNotFound));
        }
    };
    match cmd.get_one::<String>("routine") {
        Some(rout_name) => match module.routine(rout_name) {
            Some(r) => Ok(r.content.clone()),
            None => {
                log::error!("routine {} was not found in {}",rout_name,module.name);
                Err(Box::new(CommandError::ItemNotFound))
            }
        },
        None => Ok(module.content.clone())
    }
}

pub fn highlight(cmd: &clap::ArgMatches) -> STDRESULT {
    let fmt = OutputFormat::from_str(cmd.get_one::<String>("format").expect(RCH))?;
    let indent = cmd.get_one::<u16>("indent").copied();
    let settings = crate::read_settings(cmd.get_one::<String>("config"))?;
    let bytes = crate::read_source(cmd.get_one::<String>("file"))?;
    let parser = StructureParser::with_vocabulary(settings.vocabulary.clone());
    let text = select_text(cmd,&parser,&bytes)?;
    let spans = Classifier::with_settings(&settings).classify(&text);
    log::debug!("{} spans",spans.len());
    match fmt {
        OutputFormat::Ansi => print!("{}",ansi_text(&text,&spans)),
        OutputFormat::Json => println!("{}",crate::to_json(&spans,indent)?),
        OutputFormat::Lsp => {
            let out = LspTokens {
                legend: semantic_tokens::legend(),
                tokens: SemanticTokensBuilder::new().build(&text,&spans)
            };
            println!("{}",crate::to_json(&out,indent)?);
        },
        OutputFormat::Text => {
            log::error!("use `ansi` to highlight for the console");
            return Err(Box::new(CommandError::UnknownFormat));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn plain_when_uncolored() {
        colored::control::set_override(false);
        let text = "MoveL p1, v10;\n";
        let spans = crate::lang::rapid::classify(text);
        assert_eq!(ansi_text(text,&spans),text);
    }
}
