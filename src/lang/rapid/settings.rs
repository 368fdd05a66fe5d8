//! Parse a settings string supplied by the user.
//!
//! Known keys replace the defaults, everything else is ignored.  Example:
//! ```json
//! {
//!     "vocabulary": { "instructions": ["MoveL","MyGripperOpen"] },
//!     "highlight": { "trailingComments": false }
//! }
//! ```

use crate::DYNERR;
use crate::lang::update_json_bool;
use super::vocabulary::Vocabulary;

#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("settings must be a JSON object")]
    NotAnObject
}

#[derive(Clone)]
pub struct Highlight {
    /// a `!` after code starts a comment running to end of line
    pub trailing_comments: bool
}

#[derive(Clone)]
pub struct Settings {
    pub vocabulary: Vocabulary,
    pub highlight: Highlight
}

impl Settings {
    pub fn new() -> Self {
        Self {
            vocabulary: Vocabulary::new(),
            highlight: Highlight {
                trailing_comments: true
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse(json: &str) -> Result<Settings,DYNERR> {
    let mut ans = Settings::new();
    let root = serde_json::from_str::<serde_json::Value>(json)?;
    let obj = match root.as_object() {
        Some(obj) => obj,
        None => return Err(Box::new(Error::NotAnObject))
    };
    for (key,val) in obj {
        match key.as_str() {
            "vocabulary" => ans.vocabulary.update(val),
            "highlight" => update_json_bool(val,"trailingComments",&mut ans.highlight.trailing_comments),
            _ => log::debug!("ignoring settings key {}",key)
        }
    }
    Ok(ans)
}
