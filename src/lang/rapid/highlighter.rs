//! Token classifier
//!
//! Classifies any text, line by line, for presentation.  There is no state across lines, so
//! a routine body gives the same spans whether it is classified alone or inside its file.
//! Within a line the precedence is:
//! 1. whole line comment (first non-blank character is `!`)
//! 2. string literal `"..."`, no escapes, an unclosed quote is plain text
//! 3. unsigned decimal number with at most one fractional part, even inside a word such as `v1000`
//! 4. whole words (alphanumeric runs) found in the keyword, type, or instruction tables
//!
//! With trailing comments enabled, a `!` outside a string starts a comment running to end of line.
//! The spans cover the input with no gaps or overlaps; unclaimed text is `Plain`.

use super::{Category,ClassifiedSpan};
use super::vocabulary::Vocabulary;
use super::settings::Settings;

pub struct Classifier {
    vocab: Vocabulary,
    trailing_comments: bool
}

/// Mark `rng` with `cat` in the per-byte claims
fn claim(claims: &mut [Option<Category>], rng: std::ops::Range<usize>, cat: Category) {
    for c in &mut claims[rng] {
        *c = Some(cat);
    }
}

/// Length of the number starting at `beg`, which is assumed to be an unclaimed digit
fn number_len(bytes: &[u8], claims: &[Option<Category>], beg: usize) -> usize {
    let free_digit = |i: usize| i < bytes.len() && claims[i].is_none() && bytes[i].is_ascii_digit();
    let mut end = beg;
    while free_digit(end) {
        end += 1;
    }
    if end < bytes.len() && bytes[end]==b'.' && claims[end].is_none() && free_digit(end+1) {
        end += 1;
        while free_digit(end) {
            end += 1;
        }
    }
    end - beg
}

impl Classifier {
    pub fn new() -> Self {
        Self::with_settings(&Settings::new())
    }
    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            vocab: settings.vocabulary.clone(),
            trailing_comments: settings.highlight.trailing_comments
        }
    }
    /// Classify `text`, offsets are bytes into `text`.
    /// Line feeds belong to `Plain` spans, and adjacent `Plain` spans are merged.
    pub fn classify(&self, text: &str) -> Vec<ClassifiedSpan> {
        let mut ans: Vec<ClassifiedSpan> = Vec::new();
        let mut offset = 0;
        for (row,line) in text.split('\n').enumerate() {
            if row > 0 {
                push_span(&mut ans,ClassifiedSpan::new(offset-1,offset,Category::Plain));
            }
            for span in self.classify_line(line) {
                push_span(&mut ans,ClassifiedSpan::new(span.start+offset,span.end+offset,span.category));
            }
            offset += line.len() + 1;
        }
        ans
    }
    /// Classify a single line, which should not contain a line feed.
    /// Offsets are relative to the start of the line.
    pub fn classify_line(&self, line: &str) -> Vec<ClassifiedSpan> {
        let lead = line.len() - line.trim_start().len();
        if line[lead..].starts_with('!') {
            let mut ans = Vec::new();
            if lead > 0 {
                ans.push(ClassifiedSpan::new(0,lead,Category::Plain));
            }
            ans.push(ClassifiedSpan::new(lead,line.len(),Category::Comment));
            return ans;
        }
        let bytes = line.as_bytes();
        let mut claims: Vec<Option<Category>> = vec![None;bytes.len()];
        // strings and trailing comment
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i]==b'"' {
                if let Some(len) = line[i+1..].find('"') {
                    claim(&mut claims,i..i+len+2,Category::StringLiteral);
                    i += len + 2;
                    continue;
                }
            } else if bytes[i]==b'!' && self.trailing_comments {
                claim(&mut claims,i..bytes.len(),Category::Comment);
                break;
            }
            i += 1;
        }
        // numbers
        let mut i = 0;
        while i < bytes.len() {
            if claims[i].is_none() && bytes[i].is_ascii_digit() {
                let len = number_len(bytes,&claims,i);
                claim(&mut claims,i..i+len,Category::NumberLiteral);
                i += len;
            } else {
                i += 1;
            }
        }
        // words
        let mut word_start: Option<usize> = None;
        for (idx,c) in line.char_indices().chain(std::iter::once((line.len(),' '))) {
            match (c.is_alphanumeric(),word_start) {
                (true,None) => word_start = Some(idx),
                (false,Some(beg)) => {
                    if claims[beg..idx].iter().all(|x| x.is_none()) {
                        if let Some(cat) = self.vocab.category(&line[beg..idx]) {
                            claim(&mut claims,beg..idx,cat);
                        }
                    }
                    word_start = None;
                },
                _ => {}
            }
        }
        // group the claims into spans
        let mut ans: Vec<ClassifiedSpan> = Vec::new();
        for (idx,c) in claims.iter().enumerate() {
            let cat = c.unwrap_or(Category::Plain);
            if let Some(last) = ans.last_mut() {
                if last.category==cat {
                    last.end = idx + 1;
                    continue;
                }
            }
            ans.push(ClassifiedSpan::new(idx,idx+1,cat));
        }
        ans
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Push, merging with the previous span if both are `Plain`
fn push_span(spans: &mut Vec<ClassifiedSpan>, span: ClassifiedSpan) {
    if span.start==span.end {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.category==Category::Plain && span.category==Category::Plain && last.end==span.start {
            last.end = span.end;
            return;
        }
    }
    spans.push(span);
}
