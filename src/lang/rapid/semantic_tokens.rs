//! Encode classified spans as LSP semantic tokens.
//!
//! LSP positions count UTF-16 code units within a line, while spans are byte offsets,
//! so each span is converted against the text it was produced from.

use lsp_types as lsp;
use std::collections::HashMap;
use super::{Category,ClassifiedSpan};

pub const TOKEN_TYPES: [&str;6] = ["comment", "string", "keyword", "number", "type", "function"];

/// LSP token type of a category, `Plain` is not sent.
pub fn token_type(cat: Category) -> Option<&'static str> {
    match cat {
        Category::Comment => Some("comment"),
        Category::StringLiteral => Some("string"),
        Category::Keyword => Some("keyword"),
        Category::NumberLiteral => Some("number"),
        Category::DataType => Some("type"),
        Category::Instruction => Some("function"),
        Category::Plain => None
    }
}

pub fn legend() -> lsp::SemanticTokensLegend {
    lsp::SemanticTokensLegend {
        token_types: TOKEN_TYPES.iter().map(|t| lsp::SemanticTokenType::new(*t)).collect(),
        token_modifiers: Vec::new()
    }
}

pub struct SemanticTokensBuilder {
    last_pos: lsp::Position,
    tok_map: HashMap<&'static str,u32>,
    tokens: Vec<lsp::SemanticToken>
}

impl SemanticTokensBuilder {
    pub fn new() -> Self {
        let mut tok_map = HashMap::new();
        for (i,typ) in TOKEN_TYPES.iter().enumerate() {
            tok_map.insert(*typ,i as u32);
        }
        Self {
            last_pos: lsp::Position::new(0,0),
            tok_map,
            tokens: Vec::new()
        }
    }
    pub fn reset(&mut self) {
        self.tokens = Vec::new();
        self.last_pos = lsp::Position::new(0,0);
    }
    pub fn clone_result(&self) -> lsp::SemanticTokens {
        lsp::SemanticTokens {
            result_id: None,
            data: self.tokens.clone()
        }
    }
    /// Push a token on a single line, tokens must arrive in document order.
    pub fn push(&mut self, rng: lsp::Range, typ: &str) {
        if let Some(code) = self.tok_map.get(typ) {
            if rng.start.line >= self.last_pos.line {
                if rng.start.line == self.last_pos.line && rng.start.character < self.last_pos.character {
                    return;
                }
                self.tokens.push(lsp::SemanticToken {
                    delta_line: rng.start.line - self.last_pos.line,
                    delta_start: match rng.start.line == self.last_pos.line {
                        true => rng.start.character - self.last_pos.character,
                        false => rng.start.character
                    },
                    length: rng.end.character - rng.start.character,
                    token_type: *code,
                    token_modifiers_bitset: 0
                });
                self.last_pos = rng.start;
            }
        }
    }
    /// Encode spans that were produced from `text`.
    pub fn build(&mut self, text: &str, spans: &[ClassifiedSpan]) -> lsp::SemanticTokens {
        self.reset();
        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i,_)| i + 1))
            .collect();
        for span in spans {
            let typ = match token_type(span.category) {
                Some(t) => t,
                None => continue
            };
            let row = line_starts.partition_point(|beg| *beg <= span.start) - 1;
            let col = text[line_starts[row]..span.start].encode_utf16().count() as u32;
            let len = text[span.range()].encode_utf16().count() as u32;
            let rng = lsp::Range::new(
                lsp::Position::new(row as u32,col),
                lsp::Position::new(row as u32,col + len)
            );
            self.push(rng,typ);
        }
        self.clone_result()
    }
}

impl Default for SemanticTokensBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::rapid::classify;

    #[test]
    fn deltas() {
        let text = "PROC main()\n  ! ä\n  MoveL p1, v100;\nENDPROC";
        let toks = SemanticTokensBuilder::new().build(text,&classify(text));
        let flat: Vec<[u32;4]> = toks.data.iter().map(|t| [t.delta_line,t.delta_start,t.length,t.token_type]).collect();
        assert_eq!(flat,vec![
            [0,0,4,2], // PROC
            [1,2,3,0], // ! ä
            [1,2,5,5], // MoveL
            [0,7,1,3], // 1
            [0,4,3,3], // 100
            [1,0,7,2]  // ENDPROC
        ]);
    }
    #[test]
    fn legend_matches_types() {
        let leg = legend();
        assert!(leg.token_modifiers.is_empty());
        for (i,typ) in leg.token_types.iter().enumerate() {
            assert_eq!(typ.as_str(),TOKEN_TYPES[i]);
        }
        assert_eq!(leg.token_types[3].as_str(),token_type(Category::NumberLiteral).unwrap_or(""));
        assert_eq!(leg.token_types[5].as_str(),token_type(Category::Instruction).unwrap_or(""));
    }
    #[test]
    fn utf16_columns() {
        let text = "\"𝄞\" 5";
        let toks = SemanticTokensBuilder::new().build(text,&classify(text));
        assert_eq!(toks.data.len(),2);
        assert_eq!(toks.data[0].length,4);
        assert_eq!(toks.data[1].delta_start,5);
    }
}
