//! Flag descriptors: the compiled form of one field.

use crate::dispatch::FlagValue;
use crate::error::FlagSchemaError;
use crate::metadata::ResolvedMetadata;
use crate::types::{DefaultValue, FlagKind};

/// One compiled flag, ready for registration with an argument parser.
///
/// Holds the destination binding for every kind except `Bool`, so a parser
/// (or [`assign`](Self::assign)) can write straight into the config field.
#[derive(Debug)]
pub struct FlagDescriptor<'a> {
    name: String,
    env: String,
    usage: String,
    required: bool,
    hidden: bool,
    value: FlagValue<'a>,
}

impl<'a> FlagDescriptor<'a> {
    /// Assemble a descriptor from resolved metadata and a dispatched value.
    /// No further validation happens here.
    pub fn new(meta: ResolvedMetadata, value: FlagValue<'a>) -> Self {
        Self {
            name: meta.name,
            env: meta.env,
            usage: meta.usage,
            required: meta.required,
            hidden: meta.hidden,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn kind(&self) -> FlagKind {
        self.value.kind()
    }

    pub fn value(&self) -> &FlagValue<'a> {
        &self.value
    }

    /// The parsed default. `None` for `Bool`, which carries no default.
    pub fn default(&self) -> Option<DefaultValue> {
        match &self.value {
            FlagValue::String { default, .. } => Some(DefaultValue::String(default.clone())),
            FlagValue::Bool => None,
            FlagValue::Float { default, .. } => Some(DefaultValue::Float(*default)),
            FlagValue::Int { default, .. } => Some(DefaultValue::Int(*default)),
            FlagValue::Int64 { default, .. } => Some(DefaultValue::Int64(*default)),
            FlagValue::Duration { default, .. } => Some(DefaultValue::Duration(*default)),
        }
    }

    pub fn has_destination(&self) -> bool {
        !matches!(self.value, FlagValue::Bool)
    }

    /// Write the parsed default into the destination. No-op for `Bool`.
    pub fn apply_default(&mut self) -> Result<(), FlagSchemaError> {
        let result = match &mut self.value {
            FlagValue::String { default, dest } => {
                dest.clone_from(default);
                Ok(())
            }
            FlagValue::Bool => Ok(()),
            FlagValue::Float { default, dest } => {
                dest.store(*default);
                Ok(())
            }
            FlagValue::Int { default, dest } => dest.store(*default),
            FlagValue::Int64 { default, dest } => dest.store(*default),
            FlagValue::Duration { default, dest } => {
                **dest = *default;
                Ok(())
            }
        };

        result.map_err(|reason| FlagSchemaError::InvalidValue {
            flag: self.name.clone(),
            value: self.default().map(|d| d.to_string()).unwrap_or_default(),
            reason,
        })
    }

    /// Parse `raw` for the destination's type and write it.
    pub fn assign(&mut self, raw: &str) -> Result<(), FlagSchemaError> {
        let result = match &mut self.value {
            FlagValue::String { dest, .. } => {
                raw.clone_into(dest);
                Ok(())
            }
            FlagValue::Bool => Err("boolean flags have no destination".to_string()),
            FlagValue::Float { dest, .. } => dest.assign(raw),
            FlagValue::Int { dest, .. } => dest.assign(raw),
            FlagValue::Int64 { dest, .. } => dest.assign(raw),
            FlagValue::Duration { dest, .. } => humantime::parse_duration(raw.trim())
                .map(|d| **dest = d)
                .map_err(|e| e.to_string()),
        };

        tracing::debug!(flag = %self.name, raw, ok = result.is_ok(), "assign flag value");

        result.map_err(|reason| FlagSchemaError::InvalidValue {
            flag: self.name.clone(),
            value: raw.to_string(),
            reason,
        })
    }
}

/// The compiler's output: descriptors in field declaration order.
#[derive(Debug, Default)]
pub struct FlagSet<'a> {
    flags: Vec<FlagDescriptor<'a>>,
}

impl<'a> FlagSet<'a> {
    pub(crate) fn from_descriptors(flags: Vec<FlagDescriptor<'a>>) -> Self {
        Self { flags }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlagDescriptor<'a>> {
        self.flags.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FlagDescriptor<'a>> {
        self.flags.iter_mut()
    }

    /// Look up a descriptor by flag name.
    pub fn get(&self, name: &str) -> Option<&FlagDescriptor<'a>> {
        self.flags.iter().find(|f| f.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FlagDescriptor<'a>> {
        self.flags.iter_mut().find(|f| f.name == name)
    }

    /// Write every parsed default into its destination.
    pub fn apply_defaults(&mut self) -> Result<(), FlagSchemaError> {
        self.flags
            .iter_mut()
            .try_for_each(|flag| flag.apply_default())
    }
}

impl<'a> IntoIterator for FlagSet<'a> {
    type Item = FlagDescriptor<'a>;
    type IntoIter = std::vec::IntoIter<FlagDescriptor<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s FlagSet<'a> {
    type Item = &'s FlagDescriptor<'a>;
    type IntoIter = std::slice::Iter<'s, FlagDescriptor<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}
