//! The input side of the compiler: records, fields, and shape checks.
//!
//! A configuration type describes itself through [`Reflect`], returning an
//! explicit, ordered side table of its fields. Each entry pairs the field
//! identifier and its metadata bag with an exclusive borrow of the field's
//! storage, which later becomes the flag's destination binding.
//!
//! ```ignore
//! impl Reflect for Config {
//!     fn reflect(&mut self) -> Shape<'_> {
//!         Record::new("Config")
//!             .field("NodeID", &mut self.node_id, r#"usage:"Node identifier""#)
//!             .field("SkipMigration", &mut self.skip_migration, "")
//!             .into()
//!     }
//! }
//! ```
//!
//! The [`impl_reflect!`](crate::impl_reflect) macro writes the same impl from
//! a field list.

use std::any::{Any, type_name};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::metadata::Metadata;

/// Types that can describe their own shape to the compiler.
pub trait Reflect {
    fn reflect(&mut self) -> Shape<'_>;
}

/// What a [`Reflect`] value turned out to be.
pub enum Shape<'a> {
    Record(Record<'a>),
    /// Anything that is not a record: maps, sequences, scalars.
    Value { type_name: &'static str },
}

impl<'a> From<Record<'a>> for Shape<'a> {
    fn from(record: Record<'a>) -> Self {
        Shape::Record(record)
    }
}

/// An ordered list of fields, in declaration order.
pub struct Record<'a> {
    name: &'static str,
    fields: Vec<FieldSchema<'a>>,
}

impl<'a> Record<'a> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Append a field. `slot` must be the field's own storage; its Rust type
    /// decides the flag variant.
    pub fn field<T: Any>(
        mut self,
        ident: &'static str,
        slot: &'a mut T,
        metadata: impl Into<Metadata>,
    ) -> Self {
        self.fields.push(FieldSchema {
            ident,
            type_name: type_name::<T>(),
            metadata: metadata.into(),
            slot,
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn into_fields(self) -> Vec<FieldSchema<'a>> {
        self.fields
    }
}

/// One field of a record: identifier, type, metadata, and storage.
pub struct FieldSchema<'a> {
    pub(crate) ident: &'static str,
    pub(crate) type_name: &'static str,
    pub(crate) metadata: Metadata,
    pub(crate) slot: &'a mut dyn Any,
}

impl FieldSchema<'_> {
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// What the compiler accepts.
///
/// Only an exclusive reference can hand out destination bindings, so `&mut T`
/// is the one valid form. A shared `&T` converts too, but always compiles to
/// [`InvalidShape`](crate::FlagSchemaError::InvalidShape).
pub enum Target<'a> {
    Exclusive(&'a mut dyn Reflect),
    Shared { type_name: &'static str },
}

impl<'a, T: Reflect + 'a> From<&'a mut T> for Target<'a> {
    fn from(value: &'a mut T) -> Self {
        Target::Exclusive(value)
    }
}

impl<'a, T: Reflect + ?Sized> From<&'a T> for Target<'a> {
    fn from(_: &'a T) -> Self {
        Target::Shared {
            type_name: type_name::<T>(),
        }
    }
}

macro_rules! impl_reflect_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&mut self) -> Shape<'_> {
                    Shape::Value { type_name: type_name::<Self>() }
                }
            }
        )*
    };
}

impl_reflect_value!(
    String, bool, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, Duration,
);

impl<K, V, S> Reflect for HashMap<K, V, S> {
    fn reflect(&mut self) -> Shape<'_> {
        Shape::Value {
            type_name: type_name::<Self>(),
        }
    }
}

impl<K, V> Reflect for BTreeMap<K, V> {
    fn reflect(&mut self) -> Shape<'_> {
        Shape::Value {
            type_name: type_name::<Self>(),
        }
    }
}

impl<T> Reflect for Vec<T> {
    fn reflect(&mut self) -> Shape<'_> {
        Shape::Value {
            type_name: type_name::<Self>(),
        }
    }
}

/// Implement [`Reflect`] for a struct from a list of its fields.
///
/// Each entry is a field name, optionally followed by a struct-tag string.
/// The field name is the identifier used for name derivation, so
/// `listen_address` becomes `--listen-address` / `LISTEN_ADDRESS`.
///
/// ```ignore
/// struct Config {
///     node_id: String,
///     log_level: String,
///     timeout: std::time::Duration,
/// }
///
/// flagschema::impl_reflect!(Config {
///     node_id: r#"usage:"Node identifier""#,
///     log_level: r#"default:"info""#,
///     timeout,
/// });
/// ```
#[macro_export]
macro_rules! impl_reflect {
    (
        $struct_name:ident {
            $($field:ident $(: $tag:expr)?),* $(,)?
        }
    ) => {
        impl $crate::Reflect for $struct_name {
            fn reflect(&mut self) -> $crate::Shape<'_> {
                $crate::Record::new(stringify!($struct_name))
                    $(
                        .field(
                            stringify!($field),
                            &mut self.$field,
                            $crate::impl_reflect!(@tag $($tag)?),
                        )
                    )*
                    .into()
            }
        }
    };
    (@tag $tag:expr) => { $crate::Metadata::from($tag) };
    (@tag) => { $crate::Metadata::new() };
}
