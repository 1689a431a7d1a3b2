use thiserror::Error;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum FlagSchemaError {
    /// The value handed to the compiler is not an exclusive reference to a
    /// record. Same message for both the shared-reference and non-record cases.
    #[error("flagschema: Config has to be a pointer of struct")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flagschema::invalid_shape),
            help("pass `&mut config` where the config type implements `Reflect` as a record")
        )
    )]
    InvalidShape { type_name: &'static str },

    /// A field's Rust type has no flag variant. `compile` never returns this;
    /// it escalates it to a panic.
    #[error("{type_name} is not supported type of flag")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagschema::unsupported_kind)))]
    UnsupportedKind { type_name: &'static str },

    #[error("Invalid value '{value}' for flag '{flag}': {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagschema::invalid_value)))]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_shape_formats_correctly() {
        let err = FlagSchemaError::InvalidShape {
            type_name: "std::collections::HashMap<String, String>",
        };
        assert!(
            err.to_string()
                .contains("Config has to be a pointer of struct")
        );
    }

    #[test]
    fn unsupported_kind_names_the_type() {
        let err = FlagSchemaError::UnsupportedKind {
            type_name: "alloc::vec::Vec<i32>",
        };
        assert_eq!(
            err.to_string(),
            "alloc::vec::Vec<i32> is not supported type of flag"
        );
    }

    #[test]
    fn invalid_value_formats() {
        let err = FlagSchemaError::InvalidValue {
            flag: "port".into(),
            value: "abc".into(),
            reason: "invalid digit found in string".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("port"));
        assert!(msg.contains("abc"));
        assert!(msg.contains("invalid digit"));
    }
}
