//! Typed game variables.
//!
//! Flags and counters declared in content are loosely typed in the source data
//! (`true`, `3`, `0.5`, `"open"`). They are kept as a closed sum type so that
//! consumers convert explicitly instead of guessing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A game variable or flag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl GameValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            GameValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            GameValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to floats.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            GameValue::Int(i) => Some(*i as f64),
            GameValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GameValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Flag semantics: `false`, zero and the empty string are unset.
    pub fn is_truthy(&self) -> bool {
        match self {
            GameValue::Bool(b) => *b,
            GameValue::Int(i) => *i != 0,
            GameValue::Float(f) => *f != 0.0,
            GameValue::Text(s) => !s.is_empty(),
        }
    }

    /// Short type name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            GameValue::Bool(_) => "bool",
            GameValue::Int(_) => "int",
            GameValue::Float(_) => "float",
            GameValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for GameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameValue::Bool(b) => write!(f, "{b}"),
            GameValue::Int(i) => write!(f, "{i}"),
            GameValue::Float(x) => write!(f, "{x}"),
            GameValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for GameValue {
    fn from(value: bool) -> Self {
        GameValue::Bool(value)
    }
}

impl From<i64> for GameValue {
    fn from(value: i64) -> Self {
        GameValue::Int(value)
    }
}

impl From<f64> for GameValue {
    fn from(value: f64) -> Self {
        GameValue::Float(value)
    }
}

impl From<&str> for GameValue {
    fn from(value: &str) -> Self {
        GameValue::Text(value.to_string())
    }
}

impl From<String> for GameValue {
    fn from(value: String) -> Self {
        GameValue::Text(value)
    }
}
