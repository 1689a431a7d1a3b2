use crate::descriptor::{FlagDescriptor, FlagSet};
use crate::dispatch;
use crate::error::FlagSchemaError;
use crate::metadata::{ResolveOptions, USAGE_PLACEHOLDER};
use crate::schema::{FieldSchema, Shape, Target};

/// Compiles a [`Reflect`](crate::Reflect) record into a [`FlagSet`].
///
/// The default compiler follows the plain naming and fallback rules. The
/// builder methods adjust the env-name prefix and the usage placeholder:
///
/// ```ignore
/// let flags = Compiler::new()
///     .env_prefix("POTATO")
///     .compile(&mut config)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    env_prefix: Option<String>,
    usage_placeholder: Option<String>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix derived env names: `APP` turns `NODE_ID` into `APP_NODE_ID`.
    /// Explicit `env` metadata is never prefixed.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Replace the text used for fields without `usage` metadata.
    pub fn usage_placeholder(mut self, text: &str) -> Self {
        self.usage_placeholder = Some(text.to_string());
        self
    }

    fn resolve_options(&self) -> ResolveOptions<'_> {
        ResolveOptions {
            env_prefix: self.env_prefix.as_deref(),
            usage_placeholder: self
                .usage_placeholder
                .as_deref()
                .unwrap_or(USAGE_PLACEHOLDER),
        }
    }

    /// Compile `config` into flag descriptors, one per field, in declaration
    /// order.
    ///
    /// Returns [`FlagSchemaError::InvalidShape`] unless `config` is an
    /// exclusive reference to a record.
    ///
    /// # Panics
    ///
    /// Panics when a field's type has no flag variant. An unsupported field
    /// is a mistake in the schema declaration, not a runtime condition.
    pub fn compile<'a>(
        &self,
        config: impl Into<Target<'a>>,
    ) -> Result<FlagSet<'a>, FlagSchemaError> {
        let record = match config.into() {
            Target::Exclusive(value) => match value.reflect() {
                Shape::Record(record) => record,
                Shape::Value { type_name } => {
                    return Err(FlagSchemaError::InvalidShape { type_name });
                }
            },
            Target::Shared { type_name } => {
                return Err(FlagSchemaError::InvalidShape { type_name });
            }
        };

        tracing::debug!(record = record.name(), fields = record.len(), "compiling flags");

        let options = self.resolve_options();
        let flags = record
            .into_fields()
            .into_iter()
            .map(|field| match build_descriptor(field, &options) {
                Ok(flag) => flag,
                Err(err) => panic!("flagschema: {err}"),
            })
            .collect();

        Ok(FlagSet::from_descriptors(flags))
    }

    /// Like [`compile`](Self::compile), but panics on any error.
    ///
    /// For callers that treat a bad schema as a startup failure.
    pub fn must_compile<'a>(&self, config: impl Into<Target<'a>>) -> FlagSet<'a> {
        match self.compile(config) {
            Ok(flags) => flags,
            Err(err) => panic!("flagschema: {err}"),
        }
    }
}

fn build_descriptor<'a>(
    field: FieldSchema<'a>,
    options: &ResolveOptions<'_>,
) -> Result<FlagDescriptor<'a>, FlagSchemaError> {
    let meta = field.metadata.resolve(field.ident, options);
    let value = dispatch::dispatch(field.slot, field.type_name, &meta.default)?;
    let flag = FlagDescriptor::new(meta, value);
    tracing::debug!(
        field = field.ident,
        flag = flag.name(),
        env = flag.env(),
        kind = %flag.kind(),
        "compiled flag"
    );
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};
    use std::time::Duration;

    use super::*;
    use crate::fixtures::test::{EmptyConfig, TestConfig, UnsupportedConfig};
    use crate::types::{DefaultValue, FlagKind};

    #[test]
    fn one_descriptor_per_field_in_order() {
        let mut config = TestConfig::default();
        let flags = Compiler::new().compile(&mut config).unwrap();
        let names: Vec<_> = flags.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            [
                "node-id",
                "log-level",
                "flag-name",
                "advertise-address",
                "migration-path",
                "database-dsn",
                "bool-test",
                "test",
                "skip-migration",
            ]
        );
    }

    #[test]
    fn kinds_follow_field_types() {
        let mut config = TestConfig::default();
        let flags = Compiler::new().compile(&mut config).unwrap();
        let kinds: Vec<_> = flags.iter().map(|f| f.kind()).collect();
        assert_eq!(
            kinds,
            [
                FlagKind::String,
                FlagKind::String,
                FlagKind::Int64,
                FlagKind::Int,
                FlagKind::Float,
                FlagKind::Int,
                FlagKind::Bool,
                FlagKind::Int64,
                FlagKind::Duration,
            ]
        );
    }

    #[test]
    fn metadata_overrides_and_fallbacks() {
        let mut config = TestConfig::default();
        let flags = Compiler::new().compile(&mut config).unwrap();

        let node = flags.get("node-id").unwrap();
        assert_eq!(node.default(), Some(DefaultValue::String("ulala".into())));
        assert_eq!(node.usage(), USAGE_PLACEHOLDER);

        let log = flags.get("log-level").unwrap();
        assert_eq!(log.usage(), "just to see logs");
        assert_eq!(log.default(), Some(DefaultValue::String(String::new())));

        let listen = flags.get("flag-name").unwrap();
        assert_eq!(listen.env(), "FLAG_NAME");

        let advertise = flags.get("advertise-address").unwrap();
        assert_eq!(advertise.env(), "env-name");

        let migration = flags.get("migration-path").unwrap();
        assert!(migration.is_hidden());
        assert!(!migration.is_required());

        let dsn = flags.get("database-dsn").unwrap();
        assert_eq!(dsn.env(), "DATABASE_DSN");
        assert!(!dsn.is_hidden());
    }

    #[test]
    fn defaults_parse_with_fallbacks() {
        let mut config = TestConfig::default();
        let flags = Compiler::new().compile(&mut config).unwrap();
        assert_eq!(
            flags.get("test").unwrap().default(),
            Some(DefaultValue::Int64(42))
        );
        assert_eq!(
            flags.get("database-dsn").unwrap().default(),
            Some(DefaultValue::Int(0))
        );
        assert_eq!(
            flags.get("skip-migration").unwrap().default(),
            Some(DefaultValue::Duration(Duration::from_secs(1)))
        );
        assert_eq!(flags.get("bool-test").unwrap().default(), None);
    }

    #[test]
    fn env_prefix_only_touches_derived_names() {
        let mut config = TestConfig::default();
        let flags = Compiler::new()
            .env_prefix("POTATO")
            .compile(&mut config)
            .unwrap();
        assert_eq!(flags.get("node-id").unwrap().env(), "POTATO_NODE_ID");
        assert_eq!(flags.get("advertise-address").unwrap().env(), "env-name");
    }

    #[test]
    fn usage_placeholder_override() {
        let mut config = TestConfig::default();
        let flags = Compiler::new()
            .usage_placeholder("undocumented")
            .compile(&mut config)
            .unwrap();
        assert_eq!(flags.get("node-id").unwrap().usage(), "undocumented");
        assert_eq!(flags.get("log-level").unwrap().usage(), "just to see logs");
    }

    #[test]
    fn shared_reference_is_invalid_shape() {
        let config = TestConfig::default();
        let err = Compiler::new().compile(&config).unwrap_err();
        assert!(matches!(err, FlagSchemaError::InvalidShape { .. }));
        assert!(
            err.to_string()
                .contains("Config has to be a pointer of struct")
        );
    }

    #[test]
    fn map_is_invalid_shape() {
        let mut map: HashMap<String, String> = HashMap::new();
        let err = Compiler::new().compile(&mut map).unwrap_err();
        assert!(
            err.to_string()
                .contains("Config has to be a pointer of struct")
        );

        let mut tree: BTreeMap<String, i32> = BTreeMap::new();
        assert!(Compiler::new().compile(&mut tree).is_err());
    }

    #[test]
    fn scalar_is_invalid_shape() {
        let mut port = 8080u16;
        let err = Compiler::new().compile(&mut port).unwrap_err();
        assert!(matches!(err, FlagSchemaError::InvalidShape { type_name: "u16" }));
    }

    #[test]
    fn empty_record_compiles_to_empty_set() {
        let mut config = EmptyConfig;
        let flags = Compiler::new().compile(&mut config).unwrap();
        assert!(flags.is_empty());
    }

    #[test]
    #[should_panic(expected = "is not supported type of flag")]
    fn unsupported_field_panics() {
        let mut config = UnsupportedConfig::default();
        let _ = Compiler::new().compile(&mut config);
    }

    #[test]
    #[should_panic(expected = "Vec<u8> is not supported type of flag")]
    fn unsupported_field_panic_names_type() {
        let mut config = UnsupportedConfig::default();
        let _ = Compiler::new().compile(&mut config);
    }

    #[test]
    fn must_compile_matches_compile() {
        let mut config = TestConfig::default();
        let compiled = Compiler::new().compile(&mut config).unwrap().describe();
        let must = Compiler::new().must_compile(&mut config).describe();
        assert_eq!(compiled, must);
    }

    #[test]
    #[should_panic(expected = "Config has to be a pointer of struct")]
    fn must_compile_panics_on_invalid_shape() {
        let mut map: HashMap<String, i32> = HashMap::new();
        let _ = Compiler::new().must_compile(&mut map);
    }
}
