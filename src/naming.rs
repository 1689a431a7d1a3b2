//! Flag and environment-variable name derivation from field identifiers.
//!
//! Identifiers may be written in initial-capital compounding (`NodeID`,
//! `ListenAddress`) or Rust snake_case (`node_id`). Both forms produce the
//! same lowercase, hyphen-separated flag name.

use std::sync::LazyLock;

use regex::Regex;

/// A character followed by a capital that starts a lowercase run (`xAddress`).
static FIRST_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(.)([A-Z][a-z]+)").expect("static regex must compile"));

/// A lowercase letter or digit followed by a capital (`eI` in `NodeID`).
static ALL_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z0-9])([A-Z])").expect("static regex must compile"));

/// Derive a flag name from a field identifier.
///
/// `"NodeID"` → `"node-id"`, `"ListenAddress"` → `"listen-address"`,
/// `"database_dsn"` → `"database-dsn"`.
pub fn flag_name(ident: &str) -> String {
    let split = FIRST_CAP.replace_all(ident, "${1}-${2}");
    let split = ALL_CAP.replace_all(&split, "${1}-${2}");
    let name = split.to_lowercase().replace('_', "-");
    tracing::trace!(ident, %name, "derived flag name");
    name
}

/// Derive an environment variable name from a flag name.
///
/// Hyphens become underscores and the result is uppercased:
/// `"listen-address"` → `"LISTEN_ADDRESS"`.
pub fn env_name(flag: &str) -> String {
    flag.replace('-', "_").to_uppercase()
}
