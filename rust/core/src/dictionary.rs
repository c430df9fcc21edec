// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loosely typed key-value parameters carried by tools and operations.
//!
//! CAM exports attach free-form parameter blocks to tools, drill cycles and
//! profile operations. The core never interprets them; it only stores them
//! and compares them for equality when de-duplicating jobs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A value stored in a parameter dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(Dictionary),
}

/// A parameter block keyed by field name.
pub type Dictionary = FxHashMap<String, ParamValue>;

/// Parameter key carrying an export format version rather than a property.
pub const VERSION_KEY: &str = "ver";

impl ParamValue {
    /// Interprets the value as an on/off flag. Exports write flags either as
    /// booleans or as `0`/`1` integers.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::Int(i) => Some(*i != 0),
            _ => None,
        }
    }

    /// Returns the numeric value, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Removes the format-version entry so that two otherwise identical blocks
/// compare equal.
pub fn without_version(mut dict: Dictionary) -> Dictionary {
    dict.remove(VERSION_KEY);
    dict
}
