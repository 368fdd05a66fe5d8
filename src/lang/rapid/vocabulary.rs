//! Lookup tables for the parser and highlighter.
//!
//! The built-in tables are kept in `vocabulary.json` so they can be revised without touching
//! the parsing logic.  All lookups are case insensitive; words are stored upper case.

use std::collections::HashSet;
use super::Category;
use crate::lang::update_json_vec_str;

const JSON_STR: &str = include_str!("vocabulary.json");

#[derive(Clone,Debug)]
pub struct Vocabulary {
    declarations: Vec<String>,
    keywords: HashSet<String>,
    types: HashSet<String>,
    instructions: HashSet<String>
}

fn upper_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|w| w.to_uppercase()).collect()
}

impl Vocabulary {
    /// The built-in tables.
    /// This can panic if something is wrong with the embedded JSON, but it is fixed at compile time.
    pub fn new() -> Self {
        let root = serde_json::from_str::<serde_json::Value>(JSON_STR).expect("vocabulary.json is malformed");
        let mut ans = Self::empty();
        ans.update(&root);
        ans
    }
    fn empty() -> Self {
        Self {
            declarations: Vec::new(),
            keywords: HashSet::new(),
            types: HashSet::new(),
            instructions: HashSet::new()
        }
    }
    /// Replace any table named in `obj`, tables that are missing or ill-typed are kept.
    pub fn update(&mut self, obj: &serde_json::Value) {
        let mut decs = self.declarations.clone();
        update_json_vec_str(obj,"declarations",&mut decs);
        self.declarations = decs.iter().map(|w| w.to_uppercase()).collect();
        for (key,table) in [("keywords",&mut self.keywords),("types",&mut self.types),("instructions",&mut self.instructions)] {
            let mut words: Vec<String> = table.iter().cloned().collect();
            update_json_vec_str(obj,key,&mut words);
            *table = upper_set(&words);
        }
    }
    /// Declaration keywords in table order, upper case
    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }
    /// A trimmed line is a declaration if it starts with a declaration keyword,
    /// or contains one preceded by whitespace (e.g. `LOCAL VAR num x`).
    /// This is a substring test, so `VARIANT` also counts, as does a keyword in a trailing comment.
    pub fn is_declaration(&self, trimmed_line: &str) -> bool {
        let upper = trimmed_line.to_uppercase();
        self.declarations.iter().any(|kw| {
            upper.starts_with(kw.as_str()) ||
            upper.match_indices(kw.as_str()).any(|(i,_)| {
                upper[..i].chars().next_back().is_some_and(char::is_whitespace)
            })
        })
    }
    /// Category of a whole word, keywords take precedence over types, types over instructions.
    pub fn category(&self, word: &str) -> Option<Category> {
        let upper = word.to_uppercase();
        if self.keywords.contains(&upper) {
            Some(Category::Keyword)
        } else if self.types.contains(&upper) {
            Some(Category::DataType)
        } else if self.instructions.contains(&upper) {
            Some(Category::Instruction)
        } else {
            None
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
