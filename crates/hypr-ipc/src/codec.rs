//! Argument codec for event tails
//!
//! Hyprland encodes event arguments as a comma-separated tail after the `>>`
//! separator. Each event kind declares a [`Shape`]: how many fields it has,
//! their types, and whether the last field "spills" (captures the unsplit
//! remainder of the tail instead of a single comma-delimited value).

use std::fmt;

use thiserror::Error;

/// Declared type of one positional field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Base-10 signed integer
    Int,
    /// Base-10 unsigned integer
    Uint,
    /// Boolean literal (`1`, `0`, `true`, `false`, ...)
    Bool,
    /// Free text, never fails
    Str,
    /// Comma-separated list; only valid as a spill field
    List,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Bool => "bool",
            Self::Str => "string",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// Argument layout of an event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Field types in positional order
    pub fields: &'static [FieldType],
    /// Whether the last field captures the unsplit remainder
    pub spill: bool,
}

impl Shape {
    /// Shape whose last field captures the remainder of the tail
    pub const fn spilled(fields: &'static [FieldType]) -> Self {
        Self {
            fields,
            spill: true,
        }
    }

    /// Shape that splits on every comma and ignores anything past the last field
    pub const fn split(fields: &'static [FieldType]) -> Self {
        Self {
            fields,
            spill: false,
        }
    }

    /// Number of declared fields
    pub fn arity(&self) -> usize {
        self.fields.len()
    }
}

/// One decoded field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

/// Errors produced while decoding an event tail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The tail had fewer comma-separated parts than the shape requires
    #[error("need at least {expected} comma-separated values, got {found}")]
    MissingFields { expected: usize, found: usize },

    /// A field could not be converted to its declared type
    #[error("field {position}: cannot convert {value:?} to {expected}")]
    InvalidField {
        /// 1-based field position
        position: usize,
        value: String,
        expected: FieldType,
    },
}

/// Decode `tail` according to `shape`
///
/// Fails fast on the first field that does not convert. A trailing
/// [`FieldType::List`] spill field may be absent entirely, in which case it
/// decodes to an empty list.
pub fn decode(tail: &str, shape: &Shape) -> Result<Vec<Value>, DecodeError> {
    let arity = shape.arity();
    if arity == 0 {
        return Ok(Vec::new());
    }

    let mut parts: Vec<&str> = if shape.spill {
        tail.splitn(arity, ',').collect()
    } else {
        tail.split(',').take(arity).collect()
    };

    if parts.len() < arity {
        let list_may_be_empty = shape.spill
            && parts.len() == arity - 1
            && shape.fields[arity - 1] == FieldType::List;

        if !list_may_be_empty {
            return Err(DecodeError::MissingFields {
                expected: arity,
                found: parts.len(),
            });
        }
        parts.push("");
    }

    parts
        .into_iter()
        .zip(shape.fields)
        .enumerate()
        .map(|(i, (part, ty))| convert(part.trim(), *ty, i + 1))
        .collect()
}

fn convert(raw: &str, ty: FieldType, position: usize) -> Result<Value, DecodeError> {
    let invalid = || DecodeError::InvalidField {
        position,
        value: raw.to_string(),
        expected: ty,
    };

    match ty {
        FieldType::Int => raw.parse().map(Value::Int).map_err(|_| invalid()),
        FieldType::Uint => raw.parse().map(Value::Uint).map_err(|_| invalid()),
        FieldType::Bool => parse_bool(raw).map(Value::Bool).ok_or_else(invalid),
        FieldType::Str => Ok(Value::Str(raw.to_string())),
        FieldType::List => Ok(Value::List(split_list(raw))),
    }
}

/// Boolean literals accepted in event tails
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Entries are trimmed; an empty tail is an empty list, never `[""]`
fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|s| s.trim().to_string()).collect()
}
