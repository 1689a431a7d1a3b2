//! Kind dispatch: map a field's Rust type to a flag variant and parse its
//! default.
//!
//! Each variant owns its fallback rule. A default that fails to parse never
//! raises an error:
//!
//! | Variant | Default parsing | Fallback |
//! |---------|-----------------|----------|
//! | String | none, raw text | n/a |
//! | Bool | none | n/a |
//! | Float | base-10 float | `0.0` |
//! | Int | base-10 integer | `0` |
//! | Int64 | base-10 integer | `0` |
//! | Duration | duration grammar (`1s`, `500ms`, `1h 30m`) | one second |

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::FlagSchemaError;
use crate::types::FlagKind;

/// Fallback for duration defaults that fail to parse.
pub const DURATION_FALLBACK: Duration = Duration::from_secs(1);

/// Every Rust type the dispatcher recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Primitive {
    String,
    Bool,
    F32,
    F64,
    I8,
    I16,
    I32,
    Isize,
    U8,
    U16,
    U32,
    Usize,
    I64,
    U64,
    Duration,
}

impl Primitive {
    fn of(slot: &dyn Any) -> Option<Self> {
        let primitive = if slot.is::<String>() {
            Primitive::String
        } else if slot.is::<bool>() {
            Primitive::Bool
        } else if slot.is::<f32>() {
            Primitive::F32
        } else if slot.is::<f64>() {
            Primitive::F64
        } else if slot.is::<i8>() {
            Primitive::I8
        } else if slot.is::<i16>() {
            Primitive::I16
        } else if slot.is::<i32>() {
            Primitive::I32
        } else if slot.is::<isize>() {
            Primitive::Isize
        } else if slot.is::<u8>() {
            Primitive::U8
        } else if slot.is::<u16>() {
            Primitive::U16
        } else if slot.is::<u32>() {
            Primitive::U32
        } else if slot.is::<usize>() {
            Primitive::Usize
        } else if slot.is::<i64>() {
            Primitive::I64
        } else if slot.is::<u64>() {
            Primitive::U64
        } else if slot.is::<Duration>() {
            Primitive::Duration
        } else {
            return None;
        };
        Some(primitive)
    }
}

macro_rules! numeric_slot {
    ($(#[$doc:meta])* $name:ident, $wide:ty { $($variant:ident($ty:ty)),* $(,)? }) => {
        $(#[$doc])*
        pub enum $name<'a> {
            $($variant(&'a mut $ty),)*
        }

        impl $name<'_> {
            /// Store a widened value, failing when it does not fit the field.
            pub fn store(&mut self, value: $wide) -> Result<(), String> {
                match self {
                    $($name::$variant(dest) => {
                        **dest = <$ty>::try_from(value).map_err(|e| e.to_string())?;
                    })*
                }
                Ok(())
            }

            /// Parse `raw` as the field's exact type and store it.
            pub fn assign(&mut self, raw: &str) -> Result<(), String> {
                match self {
                    $($name::$variant(dest) => **dest = parse_exact::<$ty>(raw)?,)*
                }
                Ok(())
            }
        }

        impl fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant(dest) => f.debug_tuple(stringify!($variant)).field(dest).finish(),)*
                }
            }
        }
    };
}

numeric_slot!(
    /// Destination for integer fields narrower than 64 bits.
    IntSlot, i64 {
        I8(i8),
        I16(i16),
        I32(i32),
        Isize(isize),
        U8(u8),
        U16(u16),
        U32(u32),
        Usize(usize),
    }
);

numeric_slot!(
    /// Destination for 64-bit integer fields.
    Int64Slot, i64 {
        I64(i64),
        U64(u64),
    }
);

/// Destination for floating-point fields.
#[derive(Debug)]
pub enum FloatSlot<'a> {
    F32(&'a mut f32),
    F64(&'a mut f64),
}

impl FloatSlot<'_> {
    pub fn store(&mut self, value: f64) {
        match self {
            // Narrowing to f32 is the intended precision loss.
            FloatSlot::F32(dest) => **dest = value as f32,
            FloatSlot::F64(dest) => **dest = value,
        }
    }

    pub fn assign(&mut self, raw: &str) -> Result<(), String> {
        match self {
            FloatSlot::F32(dest) => **dest = parse_exact::<f32>(raw)?,
            FloatSlot::F64(dest) => **dest = parse_exact::<f64>(raw)?,
        }
        Ok(())
    }
}

/// A dispatched flag variant: parsed default plus destination binding.
///
/// `Bool` carries neither; boolean fields are registered without a
/// destination.
#[derive(Debug)]
pub enum FlagValue<'a> {
    String {
        default: String,
        dest: &'a mut String,
    },
    Bool,
    Float {
        default: f64,
        dest: FloatSlot<'a>,
    },
    Int {
        default: i64,
        dest: IntSlot<'a>,
    },
    Int64 {
        default: i64,
        dest: Int64Slot<'a>,
    },
    Duration {
        default: Duration,
        dest: &'a mut Duration,
    },
}

impl FlagValue<'_> {
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::String { .. } => FlagKind::String,
            FlagValue::Bool => FlagKind::Bool,
            FlagValue::Float { .. } => FlagKind::Float,
            FlagValue::Int { .. } => FlagKind::Int,
            FlagValue::Int64 { .. } => FlagKind::Int64,
            FlagValue::Duration { .. } => FlagKind::Duration,
        }
    }
}

/// Resolve the variant for `slot` and parse `default` for it.
///
/// Returns [`FlagSchemaError::UnsupportedKind`] naming `type_name` when the
/// slot's type has no variant.
pub fn dispatch<'a>(
    slot: &'a mut dyn Any,
    type_name: &'static str,
    default: &str,
) -> Result<FlagValue<'a>, FlagSchemaError> {
    let Some(primitive) = Primitive::of(slot) else {
        return Err(FlagSchemaError::UnsupportedKind { type_name });
    };

    let value = match primitive {
        Primitive::String => FlagValue::String {
            default: default.to_string(),
            dest: bind(slot, type_name)?,
        },
        Primitive::Bool => FlagValue::Bool,
        Primitive::F32 => FlagValue::Float {
            default: parse_float_default(default),
            dest: FloatSlot::F32(bind(slot, type_name)?),
        },
        Primitive::F64 => FlagValue::Float {
            default: parse_float_default(default),
            dest: FloatSlot::F64(bind(slot, type_name)?),
        },
        Primitive::I8 => int(default, IntSlot::I8(bind(slot, type_name)?)),
        Primitive::I16 => int(default, IntSlot::I16(bind(slot, type_name)?)),
        Primitive::I32 => int(default, IntSlot::I32(bind(slot, type_name)?)),
        Primitive::Isize => int(default, IntSlot::Isize(bind(slot, type_name)?)),
        Primitive::U8 => int(default, IntSlot::U8(bind(slot, type_name)?)),
        Primitive::U16 => int(default, IntSlot::U16(bind(slot, type_name)?)),
        Primitive::U32 => int(default, IntSlot::U32(bind(slot, type_name)?)),
        Primitive::Usize => int(default, IntSlot::Usize(bind(slot, type_name)?)),
        Primitive::I64 => FlagValue::Int64 {
            default: parse_int_default(default),
            dest: Int64Slot::I64(bind(slot, type_name)?),
        },
        Primitive::U64 => FlagValue::Int64 {
            default: parse_int_default(default),
            dest: Int64Slot::U64(bind(slot, type_name)?),
        },
        Primitive::Duration => FlagValue::Duration {
            default: parse_duration_default(default),
            dest: bind(slot, type_name)?,
        },
    };

    Ok(value)
}

fn int<'a>(default: &str, dest: IntSlot<'a>) -> FlagValue<'a> {
    FlagValue::Int {
        default: parse_int_default(default),
        dest,
    }
}

fn bind<'a, T: Any>(
    slot: &'a mut dyn Any,
    type_name: &'static str,
) -> Result<&'a mut T, FlagSchemaError> {
    slot.downcast_mut::<T>()
        .ok_or(FlagSchemaError::UnsupportedKind { type_name })
}

/// Base-10 float; `0.0` when absent or malformed.
pub fn parse_float_default(raw: &str) -> f64 {
    raw.parse().unwrap_or_else(|_| {
        tracing::debug!(raw, "float default did not parse, using 0");
        0.0
    })
}

/// Base-10 integer; `0` when absent or malformed.
pub fn parse_int_default(raw: &str) -> i64 {
    raw.parse().unwrap_or_else(|_| {
        tracing::debug!(raw, "integer default did not parse, using 0");
        0
    })
}

/// Duration grammar; one second when absent or malformed.
pub fn parse_duration_default(raw: &str) -> Duration {
    humantime::parse_duration(raw).unwrap_or_else(|_| {
        tracing::debug!(raw, "duration default did not parse, using 1s");
        DURATION_FALLBACK
    })
}

fn parse_exact<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| e.to_string())
}
