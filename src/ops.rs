//! Read-only views of a compiled flag set: descriptions, listings, and
//! `.env` examples.

use std::fmt;

use serde::Serialize;

use crate::descriptor::{FlagDescriptor, FlagSet};
use crate::types::FlagKind;

/// Owned, serializable summary of one descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagInfo {
    pub name: String,
    pub env: String,
    pub usage: String,
    pub kind: FlagKind,
    /// Rendered default; `None` for boolean flags.
    pub default: Option<String>,
    pub required: bool,
    pub hidden: bool,
}

impl From<&FlagDescriptor<'_>> for FlagInfo {
    fn from(flag: &FlagDescriptor<'_>) -> Self {
        Self {
            name: flag.name().to_string(),
            env: flag.env().to_string(),
            usage: flag.usage().to_string(),
            kind: flag.kind(),
            default: flag.default().map(|d| d.to_string()),
            required: flag.is_required(),
            hidden: flag.is_hidden(),
        }
    }
}

impl FlagSet<'_> {
    /// Snapshot every descriptor, hidden ones included.
    pub fn describe(&self) -> Vec<FlagInfo> {
        self.iter().map(FlagInfo::from).collect()
    }

    /// Render a `.env` example: one commented entry per visible flag.
    pub fn env_example(&self) -> String {
        let mut out = String::new();
        for flag in self.iter().filter(|f| !f.is_hidden()) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("# {}", flag.usage()));
            if flag.is_required() {
                out.push_str(" (required)");
            }
            out.push('\n');
            let default = flag.default().map(|d| d.to_string()).unwrap_or_default();
            out.push_str(&format!("{}={}\n", flag.env(), default));
        }
        out
    }
}

/// Lists visible flags, one per line:
/// `--name <kind> [env: NAME] [default: value]  usage`.
impl fmt::Display for FlagSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, flag) in self.iter().filter(|f| !f.is_hidden()).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "--{}", flag.name())?;
            if flag.kind() != FlagKind::Bool {
                write!(f, " <{}>", flag.kind())?;
            }
            write!(f, " [env: {}]", flag.env())?;
            if let Some(default) = flag.default().map(|d| d.to_string())
                && !default.is_empty()
            {
                write!(f, " [default: {default}]")?;
            }
            if flag.is_required() {
                write!(f, " (required)")?;
            }
            write!(f, "  {}", flag.usage())?;
        }
        Ok(())
    }
}
