//! Document symbols for an outline view or an LSP client.
//!
//! Modules hold their routines and declarations as children.  Declarations are stored as raw
//! strings, so their rows are recovered by scanning the module content in order.

use lsp_types as lsp;
use super::{SourceFile,Module,Routine,RoutineKind};

/// Range covering whole lines `beg..=end`, both 1-based
fn line_range(lines: &[&str], beg: usize, end: usize) -> lsp::Range {
    let last = end.max(beg).saturating_sub(1);
    let end_char = match lines.get(last) {
        Some(l) => l.encode_utf16().count() as u32,
        None => 0
    };
    lsp::Range::new(
        lsp::Position::new(beg.saturating_sub(1) as u32,0),
        lsp::Position::new(last as u32,end_char)
    )
}

fn declaration_kind(dec: &str) -> lsp::SymbolKind {
    let words: Vec<String> = dec.split_whitespace().take(2).map(|w| w.to_uppercase()).collect();
    let kw = match words.first() {
        Some(w) if w=="LOCAL" || w=="TASK" => words.get(1).map(|s| s.as_str()).unwrap_or(""),
        Some(w) => w.as_str(),
        None => ""
    };
    match kw {
        "CONST" => lsp::SymbolKind::CONSTANT,
        "RECORD" | "STRUCT" => lsp::SymbolKind::STRUCT,
        "ALIAS" => lsp::SymbolKind::TYPE_PARAMETER,
        "PERS" => lsp::SymbolKind::PROPERTY,
        _ => lsp::SymbolKind::VARIABLE
    }
}

/// Detail string for a routine, e.g. `FUNC num (num a, num b)`
pub fn routine_detail(routine: &Routine) -> String {
    let mut ans = String::new();
    if routine.local {
        ans += "LOCAL ";
    }
    ans += routine.kind.keyword();
    if let Some(typ) = &routine.return_type {
        ans += " ";
        ans += typ;
    }
    ans += " (";
    ans += &routine.parameters.join(", ");
    ans += ")";
    ans
}

#[allow(deprecated)]
fn routine_symbol(routine: &Routine, lines: &[&str]) -> lsp::DocumentSymbol {
    lsp::DocumentSymbol {
        name: routine.name.clone(),
        detail: Some(routine_detail(routine)),
        kind: match routine.kind {
            RoutineKind::Procedure => lsp::SymbolKind::METHOD,
            RoutineKind::Function => lsp::SymbolKind::FUNCTION,
            RoutineKind::Trap => lsp::SymbolKind::EVENT
        },
        tags: None,
        deprecated: None,
        range: line_range(lines,routine.line_number,routine.end_line),
        selection_range: line_range(lines,routine.line_number,routine.line_number),
        children: None
    }
}

/// Routine bodies never hold module declarations
fn in_routine(module: &Module, row: usize) -> bool {
    module.routines.iter().any(|r| r.line_number <= row && row <= r.end_line)
}

#[allow(deprecated)]
fn module_symbol(module: &Module, lines: &[&str]) -> lsp::DocumentSymbol {
    let mut children = Vec::new();
    let mut row = module.line_number;
    for dec in &module.declarations {
        let mut found = None;
        while row <= module.end_line {
            let trimmed = lines.get(row-1).map(|l| l.trim()).unwrap_or("");
            row += 1;
            if in_routine(module,row-1) {
                continue;
            }
            if trimmed==dec {
                found = Some(row-1);
                break;
            }
        }
        let dec_row = match found {
            Some(r) => r,
            None => break
        };
        children.push(lsp::DocumentSymbol {
            name: dec.clone(),
            detail: None,
            kind: declaration_kind(dec),
            tags: None,
            deprecated: None,
            range: line_range(lines,dec_row,dec_row),
            selection_range: line_range(lines,dec_row,dec_row),
            children: None
        });
    }
    for routine in &module.routines {
        children.push(routine_symbol(routine,lines));
    }
    children.sort_by_key(|s| (s.range.start.line,s.range.start.character));
    lsp::DocumentSymbol {
        name: module.name.clone(),
        detail: Some(module.kind.keyword().to_string()),
        kind: lsp::SymbolKind::MODULE,
        tags: None,
        deprecated: None,
        range: line_range(lines,module.line_number,module.end_line),
        selection_range: line_range(lines,module.line_number,module.line_number),
        children: Some(children)
    }
}

/// One symbol per module, in source order
pub fn document_symbols(file: &SourceFile) -> Vec<lsp::DocumentSymbol> {
    let lines: Vec<&str> = file.text.lines().collect();
    file.modules.iter().map(|m| module_symbol(m,&lines)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::rapid::parser::StructureParser;

    #[test]
    fn outline() {
        let text = "MODULE Main\n  CONST num n:=2;\n  PROC Run()\n  ENDPROC\n  LOCAL PERS num p:=1;\nENDMODULE\n";
        let file = StructureParser::new().parse_str(text,None);
        let syms = document_symbols(&file);
        assert_eq!(syms.len(),1);
        assert_eq!(syms[0].kind,lsp::SymbolKind::MODULE);
        assert_eq!(syms[0].range,lsp::Range::new(lsp::Position::new(0,0),lsp::Position::new(5,9)));
        let kids = syms[0].children.as_ref().expect("no children");
        let names: Vec<&str> = kids.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names,vec!["CONST num n:=2;","Run","LOCAL PERS num p:=1;"]);
        assert_eq!(kids[0].kind,lsp::SymbolKind::CONSTANT);
        assert_eq!(kids[1].range.start.line,2);
        assert_eq!(kids[1].range.end.line,3);
        assert_eq!(kids[2].kind,lsp::SymbolKind::PROPERTY);
    }
    #[test]
    fn declaration_after_routine() {
        let text = "MODULE m\nPROC p()\n  VAR num x;\nENDPROC\nVAR num x;\nENDMODULE\n";
        let file = StructureParser::new().parse_str(text,None);
        let syms = document_symbols(&file);
        let kids = syms[0].children.as_ref().expect("no children");
        assert_eq!(kids.len(),2);
        assert_eq!(kids[0].name,"p");
        assert_eq!(kids[1].name,"VAR num x;");
        assert_eq!(kids[1].range.start.line,4);
    }
    #[test]
    fn function_detail() {
        let text = "MODULE m\nLOCAL FUNC num Add(num a, num b)\nENDFUNC\nENDMODULE";
        let file = StructureParser::new().parse_str(text,None);
        assert_eq!(routine_detail(&file.modules[0].routines[0]),"LOCAL FUNC num (num a, num b)");
    }
}
