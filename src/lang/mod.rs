//! # Language Module
//!
//! Language specific operations are in the submodules, at present only `rapid`.
//! This level holds the error type and the JSON helpers used to read settings.

pub mod rapid;

use thiserror::Error;

#[derive(Error,Debug)]
pub enum Error {
    #[error("Unsupported text encoding")]
    UnsupportedEncoding
}

/// Try to update a string list from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
pub fn update_json_vec_str(maybe_obj: &serde_json::Value, key: &str, curr: &mut Vec<String>) {
    if let Some(outer) = maybe_obj.as_object() {
        if let Some(x) = outer.get(key) {
            let mut ans = Vec::new();
            if let Some(a) = x.as_array() {
                for v in a {
                    match v.as_str() {
                        Some(s) => ans.push(s.to_string()),
                        None => return
                    }
                }
                *curr = ans;
            }
        }
    }
}

/// Try to update a boolean from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
pub fn update_json_bool(maybe_obj: &serde_json::Value, key: &str, curr: &mut bool) {
    if let Some(outer) = maybe_obj.as_object() {
        if let Some(x) = outer.get(key) {
            if let Some(b) = x.as_bool() {
                *curr = b;
            }
        }
    }
}
