use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// The closed set of flag variants a field can compile to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    String,
    Bool,
    Float,
    Int,
    Int64,
    Duration,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlagKind::String => "string",
            FlagKind::Bool => "bool",
            FlagKind::Float => "float",
            FlagKind::Int => "int",
            FlagKind::Int64 => "int64",
            FlagKind::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// A parsed default, detached from its destination.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    String(String),
    Float(f64),
    Int(i64),
    Int64(i64),
    Duration(Duration),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::String(s) => f.write_str(s),
            DefaultValue::Float(v) => write!(f, "{v}"),
            DefaultValue::Int(v) | DefaultValue::Int64(v) => write!(f, "{v}"),
            DefaultValue::Duration(d) => write!(f, "{}", humantime::format_duration(*d)),
        }
    }
}
