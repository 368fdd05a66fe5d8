//! # RAPID structure and highlighting
//!
//! RAPID is the structured, line oriented language of ABB robot controllers.
//! Source files arrive from controller exports and hand edits, so this module never
//! rejects a program.  There are two independent services:
//! * `parser` splits a file into modules, routines, and declarations, recovering from
//!   missing or misplaced closing keywords
//! * `highlighter` classifies substrings of any text for presentation
//!
//! The two never call each other, and neither holds state between calls.
//! Downstream views receive the outline from `parse` and the spans from `classify`.

pub mod decode;
pub mod parser;
pub mod highlighter;
pub mod vocabulary;
pub mod settings;
pub mod semantic_tokens;
pub mod symbols;

#[cfg(test)]
mod highlight_test;

use std::fmt;
use serde::Serialize;

/// Opening keyword of a module
#[derive(Clone,Copy,PartialEq,Eq,Debug,Serialize)]
pub enum ModuleKind {
    Program,
    System,
    User
}

#[derive(Clone,Copy,PartialEq,Eq,Debug,Serialize)]
pub enum RoutineKind {
    Procedure,
    Function,
    Trap
}

/// Semantic category of a classified span
#[derive(Clone,Copy,PartialEq,Eq,Debug,Serialize)]
pub enum Category {
    Keyword,
    DataType,
    Instruction,
    Comment,
    StringLiteral,
    NumberLiteral,
    Plain
}

impl ModuleKind {
    /// Kind from the (case insensitive) opening keyword, anything unrecognized is a program module.
    pub fn from_keyword(kw: &str) -> Self {
        match kw.to_uppercase().as_str() {
            "SYSMODULE" => Self::System,
            "USERMODULE" => Self::User,
            _ => Self::Program
        }
    }
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Program => "MODULE",
            Self::System => "SYSMODULE",
            Self::User => "USERMODULE"
        }
    }
}

impl RoutineKind {
    pub fn from_keyword(kw: &str) -> Self {
        match kw.to_uppercase().as_str() {
            "FUNC" => Self::Function,
            "TRAP" => Self::Trap,
            _ => Self::Procedure
        }
    }
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Procedure => "PROC",
            Self::Function => "FUNC",
            Self::Trap => "TRAP"
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"{}",self.keyword())
    }
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"{}",self.keyword())
    }
}

/// A named callable unit inside a module.
#[derive(Clone,Debug,Serialize)]
pub struct Routine {
    pub name: String,
    pub kind: RoutineKind,
    /// carries the `LOCAL` modifier
    pub local: bool,
    /// declared type of a function, `None` for procedures and traps
    pub return_type: Option<String>,
    /// raw parameter strings, comma split and trimmed, never parsed further
    pub parameters: Vec<String>,
    /// opening line through closing line inclusive, each line terminated by `\n`
    pub content: String,
    /// 1-based line of the opening keyword
    pub line_number: usize,
    /// 1-based line of the last line in `content`
    pub end_line: usize
}

#[derive(Clone,Debug,Serialize)]
pub struct Module {
    pub name: String,
    pub kind: ModuleKind,
    pub routines: Vec<Routine>,
    /// module level data declarations, trimmed but otherwise verbatim
    pub declarations: Vec<String>,
    /// header through footer, each line terminated by `\n`
    pub content: String,
    pub line_number: usize,
    pub end_line: usize
}

/// The outline of one source file.  Built once by `parse` and never mutated.
/// There is no separate identifier, a file is identified by its display name `name`,
/// and parsing the same bytes under the same name gives an equal outline.
#[derive(Clone,Debug,Serialize)]
pub struct SourceFile {
    /// display name, used to name the implicit module
    pub name: String,
    /// name of the encoding the bytes were decoded with
    pub encoding: String,
    /// decoded text with all line terminators normalized to `\n`
    pub text: String,
    pub modules: Vec<Module>
}

/// A classified range of the input text.  Offsets are byte offsets, `end` is exclusive.
#[derive(Clone,Copy,PartialEq,Eq,Debug,Serialize)]
pub struct ClassifiedSpan {
    pub start: usize,
    pub end: usize,
    pub category: Category
}

impl ClassifiedSpan {
    pub fn new(start: usize, end: usize, category: Category) -> Self {
        Self { start, end, category }
    }
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl SourceFile {
    /// Find a module by name, ignoring case
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

impl Module {
    /// Find a routine by name, ignoring case.  If there are duplicates the first is returned.
    pub fn routine(&self, name: &str) -> Option<&Routine> {
        self.routines.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

/// Decode and parse a source file using the default vocabulary.
/// The only error is `lang::Error::UnsupportedEncoding`.
pub fn parse(bytes: &[u8], display_name: Option<&str>) -> Result<SourceFile,crate::lang::Error> {
    parser::StructureParser::new().parse(bytes,display_name)
}

/// Classify text using the default vocabulary, never fails.
pub fn classify(text: &str) -> Vec<ClassifiedSpan> {
    highlighter::Classifier::new().classify(text)
}
