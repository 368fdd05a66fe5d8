//! Structural parser
//!
//! A single pass over the lines of a file with two nested states, the open module and the
//! open routine.  Each line is tested against the rules below in order, first match wins:
//!
//! 1. module header, closes any open routine and module
//! 2. routine header, closes any open routine
//! 3. routine footer, only if a routine is open
//! 4. `ENDMODULE`, closes any open routine and the module
//! 5. inside a module outside a routine, maybe a declaration
//! 6. inside a routine, body text
//! 7. outside any module
//!
//! Nothing is rejected.  Unterminated units run to end of file, and a file without module
//! headers yields one implicit module.  Lines outside any module are attached to a neighboring
//! module so that the module contents together reproduce every line of the file.

use std::path::Path;
use regex::{Regex,Captures};
use log::{debug,trace};
use super::{SourceFile,Module,ModuleKind,Routine,RoutineKind};
use super::vocabulary::Vocabulary;
use super::decode;
use crate::lang::Error;

const DEFAULT_NAME: &str = "Untitled";

struct OpenRoutine {
    name: String,
    kind: RoutineKind,
    local: bool,
    return_type: Option<String>,
    parameters: Vec<String>,
    content: String,
    line_number: usize,
    end_line: usize
}

struct OpenModule {
    name: String,
    kind: ModuleKind,
    routines: Vec<Routine>,
    declarations: Vec<String>,
    content: String,
    line_number: usize,
    end_line: usize
}

/// Lines seen while no module is open, with whatever routines and declarations they held.
#[derive(Default)]
struct Loose {
    routines: Vec<Routine>,
    declarations: Vec<String>,
    content: String,
    first_line: Option<usize>,
    end_line: usize
}

impl OpenRoutine {
    fn push(&mut self, line: &str, row: usize) {
        self.content += line;
        self.content += "\n";
        self.end_line = row;
    }
    fn close(self) -> Routine {
        Routine {
            name: self.name,
            kind: self.kind,
            local: self.local,
            return_type: self.return_type,
            parameters: self.parameters,
            content: self.content,
            line_number: self.line_number,
            end_line: self.end_line
        }
    }
}

impl OpenModule {
    fn push(&mut self, line: &str, row: usize) {
        self.content += line;
        self.content += "\n";
        self.end_line = row;
    }
}

impl Loose {
    fn push(&mut self, line: &str, row: usize) {
        self.content += line;
        self.content += "\n";
        self.first_line.get_or_insert(row);
        self.end_line = row;
    }
    fn is_empty(&self) -> bool {
        self.first_line.is_none() && self.routines.is_empty()
    }
    /// Append to a module that was already closed
    fn append_to(self, module: &mut Module) {
        module.content += &self.content;
        module.routines.extend(self.routines);
        module.declarations.extend(self.declarations);
        if self.first_line.is_some() {
            module.end_line = module.end_line.max(self.end_line);
        }
    }
    /// Put in front of a module that is just now closing
    fn prepend_to(self, module: &mut Module) {
        module.content = self.content + &module.content;
        let mut routines = self.routines;
        routines.append(&mut module.routines);
        module.routines = routines;
        let mut decs = self.declarations;
        decs.append(&mut module.declarations);
        module.declarations = decs;
        if let Some(first) = self.first_line {
            module.line_number = first;
        }
    }
}

/// Holds the patterns and vocabulary, which never change during a parse.
/// One instance can serve any number of files, including concurrently.
pub struct StructureParser {
    vocab: Vocabulary,
    module_patt: Regex,
    routine_patt: Regex,
    routine_end_patt: Regex,
    module_end_patt: Regex
}

/// State of one pass over the lines
struct Pass<'a> {
    parser: &'a StructureParser,
    row: usize,
    module: Option<OpenModule>,
    routine: Option<OpenRoutine>,
    loose: Loose,
    modules: Vec<Module>
}

/// Items between the first `(` and the next `)`, comma separated and trimmed.
/// No parentheses, or nothing but whitespace inside them, gives an empty list.
pub fn extract_parameters(line: &str) -> Vec<String> {
    let beg = match line.find('(') {
        Some(i) => i + 1,
        None => return Vec::new()
    };
    let end = match line[beg..].find(')') {
        Some(i) => beg + i,
        None => return Vec::new()
    };
    let inner = &line[beg..end];
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner.split(',').map(|p| p.trim().to_string()).collect()
}

/// Name of the implicit module, the file name without its extension
fn implicit_name(display_name: &str) -> String {
    match Path::new(display_name).file_stem() {
        Some(stem) if !stem.is_empty() => stem.to_string_lossy().to_string(),
        _ => DEFAULT_NAME.to_string()
    }
}

impl StructureParser {
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::new())
    }
    pub fn with_vocabulary(vocab: Vocabulary) -> Self {
        Self {
            vocab,
            module_patt: Regex::new(r"(?i)^\s*(sysmodule|usermodule|module)\s+([\w$]+)").expect("bad regex"),
            routine_patt: Regex::new(r"(?i)^\s*(local\s+)?(proc|func|trap)\s+([\w$]+(?:\{[^}]*\})?)(?:\s+([\w$]+))?").expect("bad regex"),
            routine_end_patt: Regex::new(r"(?i)^\s*end(proc|func|trap)").expect("bad regex"),
            module_end_patt: Regex::new(r"(?i)^\s*endmodule").expect("bad regex")
        }
    }
    /// Decode, normalize, and parse.  Fails only if the bytes cannot be decoded.
    pub fn parse(&self, bytes: &[u8], display_name: Option<&str>) -> Result<SourceFile,Error> {
        let (text,encoding) = decode::decode_text(bytes)?;
        let mut ans = self.parse_normalized(text,display_name);
        ans.encoding = encoding.to_string();
        Ok(ans)
    }
    /// Parse text that is already decoded.  Line terminators are normalized here if needed.
    pub fn parse_str(&self, text: &str, display_name: Option<&str>) -> SourceFile {
        self.parse_normalized(decode::normalize_newlines(text),display_name)
    }
    /// `text` must already have `\n` line terminators only
    fn parse_normalized(&self, text: String, display_name: Option<&str>) -> SourceFile {
        let name = display_name.unwrap_or(DEFAULT_NAME).to_string();
        let mut pass = Pass {
            parser: self,
            row: 0,
            module: None,
            routine: None,
            loose: Loose::default(),
            modules: Vec::new()
        };
        for line in text.lines() {
            pass.row += 1;
            pass.line(line);
        }
        let modules = pass.finish(&text,&name);
        SourceFile {
            name,
            encoding: decode::UTF8.to_string(),
            text,
            modules
        }
    }
    fn routine_from_header(&self, caps: &Captures, line: &str, row: usize) -> OpenRoutine {
        let kind = RoutineKind::from_keyword(&caps[2]);
        let first = caps[3].to_string();
        let (name,return_type) = match (kind,caps.get(4)) {
            (RoutineKind::Function,Some(second)) => (second.as_str().to_string(),Some(first)),
            _ => (first,None)
        };
        OpenRoutine {
            name,
            kind,
            local: caps.get(1).is_some(),
            return_type,
            parameters: extract_parameters(line),
            content: String::new(),
            line_number: row,
            end_line: row
        }
    }
}

impl Default for StructureParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass<'_> {
    fn line(&mut self, line: &str) {
        let row = self.row;
        if let Some(caps) = self.parser.module_patt.captures(line) {
            trace!("{}: module header",row);
            if self.routine.is_some() {
                debug!("routine closed by module header at line {}",row);
                self.close_routine();
            }
            if self.module.is_some() {
                debug!("module closed by module header at line {}",row);
                self.close_module();
            }
            self.settle_loose();
            let mut module = OpenModule {
                name: caps[2].to_string(),
                kind: ModuleKind::from_keyword(&caps[1]),
                routines: Vec::new(),
                declarations: Vec::new(),
                content: String::new(),
                line_number: row,
                end_line: row
            };
            module.push(line,row);
            self.module = Some(module);
            return;
        }
        if let Some(caps) = self.parser.routine_patt.captures(line) {
            trace!("{}: routine header",row);
            if self.routine.is_some() {
                debug!("routine closed by routine header at line {}",row);
                self.close_routine();
            }
            let mut routine = self.parser.routine_from_header(&caps,line,row);
            routine.push(line,row);
            self.routine = Some(routine);
            self.push_outer(line);
            return;
        }
        if self.routine.is_some() && self.parser.routine_end_patt.is_match(line) {
            trace!("{}: routine footer",row);
            self.push_routine(line);
            self.push_outer(line);
            self.close_routine();
            return;
        }
        if self.parser.module_end_patt.is_match(line) {
            trace!("{}: module footer",row);
            if self.routine.is_some() {
                debug!("unterminated routine closed by ENDMODULE at line {}",row);
                self.close_routine();
            }
            self.push_outer(line);
            if self.module.is_some() {
                self.close_module();
            } else {
                debug!("ENDMODULE without module at line {}",row);
            }
            return;
        }
        if self.routine.is_some() {
            self.push_routine(line);
            self.push_outer(line);
            return;
        }
        let trimmed = line.trim();
        let is_dec = !trimmed.is_empty() && !trimmed.starts_with('!') && self.parser.vocab.is_declaration(trimmed);
        match self.module.as_mut() {
            Some(module) => {
                if is_dec {
                    module.declarations.push(trimmed.to_string());
                }
                module.push(line,row);
            },
            None => {
                if is_dec {
                    self.loose.declarations.push(trimmed.to_string());
                }
                self.loose.push(line,row);
            }
        }
    }
    /// Append to the open module, or the loose lines if there is none
    fn push_outer(&mut self, line: &str) {
        match self.module.as_mut() {
            Some(module) => module.push(line,self.row),
            None => self.loose.push(line,self.row)
        }
    }
    fn push_routine(&mut self, line: &str) {
        if let Some(routine) = self.routine.as_mut() {
            routine.push(line,self.row);
        }
    }
    fn close_routine(&mut self) {
        if let Some(routine) = self.routine.take() {
            let routine = routine.close();
            match self.module.as_mut() {
                Some(module) => module.routines.push(routine),
                None => self.loose.routines.push(routine)
            }
        }
    }
    fn close_module(&mut self) {
        if self.routine.is_some() {
            self.close_routine();
        }
        if let Some(m) = self.module.take() {
            let mut module = Module {
                name: m.name,
                kind: m.kind,
                routines: m.routines,
                declarations: m.declarations,
                content: m.content,
                line_number: m.line_number,
                end_line: m.end_line
            };
            if self.modules.is_empty() && !self.loose.is_empty() {
                debug!("lines before first module attached to {}",module.name);
                std::mem::take(&mut self.loose).prepend_to(&mut module);
            }
            self.modules.push(module);
        }
    }
    /// Attach loose lines to the last closed module.  Before the first module they are held back.
    fn settle_loose(&mut self) {
        if self.loose.is_empty() {
            return;
        }
        if let Some(last) = self.modules.last_mut() {
            debug!("lines after module attached to {}",last.name);
            std::mem::take(&mut self.loose).append_to(last);
        }
    }
    fn finish(mut self, text: &str, display_name: &str) -> Vec<Module> {
        if let Some(routine) = self.routine.as_ref() {
            debug!("routine {} is unterminated",routine.name);
            self.close_routine();
        }
        if let Some(module) = self.module.as_mut() {
            debug!("module {} is unterminated",module.name);
            if module.content.is_empty() {
                module.content = text.to_string();
            }
            self.close_module();
        }
        self.settle_loose();
        if self.modules.is_empty() && !text.trim().is_empty() {
            let name = implicit_name(display_name);
            debug!("no module header, creating implicit module {}",name);
            let loose = std::mem::take(&mut self.loose);
            self.modules.push(Module {
                name,
                kind: ModuleKind::Program,
                routines: loose.routines,
                declarations: loose.declarations,
                content: text.to_string(),
                line_number: 1,
                end_line: self.row
            });
        }
        self.modules
    }
}
