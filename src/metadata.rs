//! Per-field metadata bag and its fallback rules.
//!
//! A bag is a plain key/value map. It can be written as a struct-tag string,
//! `flag:"listen" usage:"Port to listen on" default:"9000"`, or assembled
//! with the builder methods. Only six keys are read:
//!
//! | Key | Fallback when absent |
//! |-----|----------------------|
//! | `flag` | name derived from the field identifier |
//! | `usage` | [`USAGE_PLACEHOLDER`] |
//! | `env` | derived from the flag name |
//! | `default` | empty string |
//! | `required` | `false` |
//! | `hidden` | `false` |
//!
//! `required` and `hidden` are `true` only for the literal value `"true"`.

use std::collections::HashMap;

use crate::naming;

pub const FLAG: &str = "flag";
pub const USAGE: &str = "usage";
pub const ENV: &str = "env";
pub const DEFAULT: &str = "default";
pub const REQUIRED: &str = "required";
pub const HIDDEN: &str = "hidden";

/// Usage text for fields without a `usage` key.
pub const USAGE_PLACEHOLDER: &str = "flagschema: tag usage is not set";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: HashMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a struct-tag string of space-separated `key:"value"` pairs.
    ///
    /// Values are double-quoted and may contain `\"` and `\\` escapes.
    /// Parsing stops at the first malformed segment; pairs read before it are
    /// kept. When a key repeats, the first occurrence wins.
    pub fn parse(tag: &str) -> Self {
        let mut entries = HashMap::new();
        let mut rest = tag;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            let Some((key, after_key)) = rest.split_once(':') else {
                break;
            };
            if key.is_empty() || key.contains(|c: char| c.is_whitespace() || c == '"') {
                break;
            }
            let Some((value, remaining)) = read_quoted(after_key) else {
                break;
            };
            entries.entry(key.to_string()).or_insert(value);
            rest = remaining;
        }

        Self { entries }
    }

    /// Set a raw key. Later calls overwrite earlier ones.
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn flag(self, name: &str) -> Self {
        self.set(FLAG, name)
    }

    pub fn usage(self, text: &str) -> Self {
        self.set(USAGE, text)
    }

    pub fn env(self, name: &str) -> Self {
        self.set(ENV, name)
    }

    pub fn default_value(self, value: &str) -> Self {
        self.set(DEFAULT, value)
    }

    pub fn required(self) -> Self {
        self.set(REQUIRED, "true")
    }

    pub fn hidden(self) -> Self {
        self.set(HIDDEN, "true")
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True only when `key` holds exactly `"true"`.
    pub fn is_true(&self, key: &str) -> bool {
        self.lookup(key) == Some("true")
    }

    pub fn flag_name(&self, ident: &str) -> String {
        match self.lookup(FLAG) {
            Some(name) => name.to_string(),
            None => naming::flag_name(ident),
        }
    }

    /// Explicit `env` wins verbatim; otherwise the env name is derived from
    /// the resolved flag name, with `prefix` prepended when given.
    pub fn env_name(&self, ident: &str, prefix: Option<&str>) -> String {
        if let Some(env) = self.lookup(ENV) {
            return env.to_string();
        }
        let derived = naming::env_name(&self.flag_name(ident));
        match prefix {
            Some(prefix) => format!("{prefix}_{derived}"),
            None => derived,
        }
    }

    pub fn usage_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.lookup(USAGE).unwrap_or(placeholder)
    }

    pub fn default_str(&self) -> &str {
        self.lookup(DEFAULT).unwrap_or("")
    }

    /// Resolve all six keys against their fallbacks.
    pub fn resolve(&self, ident: &str, options: &ResolveOptions<'_>) -> ResolvedMetadata {
        ResolvedMetadata {
            name: self.flag_name(ident),
            env: self.env_name(ident, options.env_prefix),
            usage: self.usage_or(options.usage_placeholder).to_string(),
            default: self.default_str().to_string(),
            required: self.is_true(REQUIRED),
            hidden: self.is_true(HIDDEN),
        }
    }
}

impl From<&str> for Metadata {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<&String> for Metadata {
    fn from(tag: &String) -> Self {
        Self::parse(tag)
    }
}

/// Compiler-level knobs that affect fallback resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions<'a> {
    pub env_prefix: Option<&'a str>,
    pub usage_placeholder: &'a str,
}

impl Default for ResolveOptions<'_> {
    fn default() -> Self {
        Self {
            env_prefix: None,
            usage_placeholder: USAGE_PLACEHOLDER,
        }
    }
}

/// The six metadata keys after fallbacks are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub name: String,
    pub env: String,
    pub usage: String,
    pub default: String,
    pub required: bool,
    pub hidden: bool,
}

/// Read a double-quoted value from the start of `input`, returning the
/// unescaped value and the remainder after the closing quote.
fn read_quoted(input: &str) -> Option<(String, &str)> {
    let body = input.strip_prefix('"')?;
    let mut value = String::new();
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, &body[i + 1..])),
            '\\' => match chars.next()? {
                (_, 'n') => value.push('\n'),
                (_, 't') => value.push('\t'),
                (_, escaped) => value.push(escaped),
            },
            other => value.push(other),
        }
    }

    None
}
