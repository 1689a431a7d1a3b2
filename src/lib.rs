//! Declare configuration once as a typed record, get command-line flags for
//! free.
//!
//! Flagschema compiles a configuration record into an ordered set of flag
//! descriptors. Each descriptor carries a flag name, an environment variable
//! name, usage text, required/hidden markers, a typed default, and a binding
//! to the record field it fills in.
//!
//! ```ignore
//! #[derive(Default)]
//! struct Config {
//!     node_id: String,
//!     listen_address: String,
//!     workers: u8,
//!     read_timeout: std::time::Duration,
//!     skip_migration: bool,
//! }
//!
//! flagschema::impl_reflect!(Config {
//!     node_id: r#"usage:"Node identifier""#,
//!     listen_address: r#"usage:"Address to bind" default:"0.0.0.0:9000""#,
//!     workers: r#"default:"4""#,
//!     read_timeout: r#"default:"30s""#,
//!     skip_migration: r#"usage:"Skip database migration""#,
//! });
//!
//! let mut config = Config::default();
//! let flags = flagschema::compile(&mut config)?;
//! ```
//!
//! # Design: explicit side table
//!
//! A record describes itself through [`Reflect`]: an ordered list of
//! fields, each with an identifier, a metadata bag, and an exclusive borrow
//! of its storage. Write the impl by hand with [`Record`], or let
//! [`impl_reflect!`] generate it. The field's Rust type picks the flag
//! variant:
//!
//! | Field type | Flag kind |
//! |------------|-----------|
//! | `String` | string |
//! | `bool` | bool |
//! | `f32`, `f64` | float |
//! | `i8` `i16` `i32` `isize` `u8` `u16` `u32` `usize` | int |
//! | `i64`, `u64` | int64 |
//! | `std::time::Duration` | duration |
//!
//! Any other type (nested records, `Vec`, maps) is a declaration mistake and
//! makes compilation panic with `<type> is not supported type of flag`.
//!
//! # Naming
//!
//! Flag names come from field identifiers. Word boundaries in
//! initial-capital compounds become hyphens and the result is lowercased:
//! `NodeID` → `node-id`, `ListenAddress` → `listen-address`. Snake-case
//! identifiers work the same way: `node_id` → `node-id`. The env name is the
//! flag name with hyphens turned into underscores, uppercased: `NODE_ID`.
//!
//! # Metadata
//!
//! Each field has a bag of string key/value pairs, written as a struct-tag
//! string or built with [`Metadata`]'s builder methods:
//!
//! | Key | Meaning | When absent |
//! |-----|---------|-------------|
//! | `flag` | flag name, used verbatim | derived from the identifier |
//! | `usage` | help text | a fixed placeholder |
//! | `env` | env var name, used verbatim | derived from the flag name |
//! | `default` | default, parsed for the kind | empty string |
//! | `required` | `"true"` marks the flag required | `false` |
//! | `hidden` | `"true"` hides the flag from help | `false` |
//!
//! # Defaults
//!
//! Defaults are strings parsed for the field's kind. A default that fails to
//! parse is not an error: numbers fall back to zero and durations to one
//! second. String defaults are taken as written. Boolean flags carry no
//! default and no destination binding.
//!
//! # Error handling
//!
//! [`compile`] returns [`FlagSchemaError::InvalidShape`] when given anything
//! but an exclusive reference to a record: a shared `&config`, a map, or a
//! scalar. [`must_compile`] panics instead. Unsupported field types always
//! panic; they are never returned as errors.
//!
//! # Using the descriptors
//!
//! The descriptors are meant for an argument parser. With the `clap`
//! feature (on by default), [`FlagSet::command`] registers them on a
//! `clap::Command` and [`FlagSet::apply_matches`] writes the parsed values
//! into the record. Without clap, [`FlagSet::apply_defaults`] and
//! [`FlagSet::apply_env`] fill the record directly, and
//! [`FlagDescriptor::assign`] sets a single value.

pub mod error;
pub mod metadata;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod descriptor;
mod dispatch;
mod env;
mod naming;
mod ops;
mod schema;

#[cfg(test)]
mod fixtures;

pub use builder::Compiler;
pub use descriptor::{FlagDescriptor, FlagSet};
pub use dispatch::{DURATION_FALLBACK, FlagValue, FloatSlot, Int64Slot, IntSlot};
pub use error::FlagSchemaError;
pub use metadata::Metadata;
pub use naming::{env_name, flag_name};
pub use ops::FlagInfo;
pub use schema::{FieldSchema, Record, Reflect, Shape, Target};
pub use types::{DefaultValue, FlagKind};

/// Compile `config` with the default [`Compiler`].
///
/// # Panics
///
/// Panics when a field's type has no flag variant.
pub fn compile<'a>(config: impl Into<Target<'a>>) -> Result<FlagSet<'a>, FlagSchemaError> {
    Compiler::default().compile(config)
}

/// Compile `config` with the default [`Compiler`], panicking on any error.
pub fn must_compile<'a>(config: impl Into<Target<'a>>) -> FlagSet<'a> {
    Compiler::default().must_compile(config)
}
