//! Exact conversion to declared scalar types.

use std::fmt;

use crate::coerce::{parse_date, parse_date_time, parse_decimal};
use crate::value::Value;

/// A scalar type a handler parameter or object field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Boolean.
    Bool,
    /// Single character.
    Char,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Local date.
    Date,
    /// Local date-time.
    DateTime,
}

impl ScalarType {
    /// Type name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Date => "date",
            Self::DateTime => "date-time",
        }
    }

    /// The zero value of the primitive form.
    ///
    /// Dates have no primitive form and zero to null.
    #[must_use]
    pub fn zero(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Char => Value::Char('\0'),
            Self::Int | Self::Long => Value::Int(0),
            Self::Float | Self::Double => Value::Float(0.0),
            Self::Date | Self::DateTime => Value::Null,
        }
    }

    /// Parses `raw` as exactly this type.
    ///
    /// Unlike [`coerce`](crate::coerce()), nothing falls back to a string: a
    /// token that does not spell this type is an error.
    pub fn convert(self, raw: &str) -> Result<Value, ConversionError> {
        let converted = match self {
            Self::Bool => {
                if raw.eq_ignore_ascii_case("true") {
                    Some(Value::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
            Self::Char => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Value::Char(c)),
                    _ => None,
                }
            }
            Self::Int => raw.parse::<i32>().ok().map(Value::from),
            Self::Long => raw.parse::<i64>().ok().map(Value::Int),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float => parse_decimal(raw).map(|x| Value::Float(f64::from(x as f32))),
            Self::Double => parse_decimal(raw).map(Value::Float),
            Self::Date => parse_date(raw).map(Value::Date),
            Self::DateTime => parse_date_time(raw).map(Value::DateTime),
        };
        converted.ok_or_else(|| ConversionError {
            value: raw.to_string(),
            target: self,
        })
    }

    /// Accepts an already typed value for this scalar, widening integers to
    /// longs and floats. Hands the value back when it does not fit.
    pub fn admit(self, value: Value) -> Result<Value, Value> {
        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),
            (Self::Bool, v @ Value::Bool(_)) => Ok(v),
            (Self::Char, Value::Char(c)) => Ok(Value::Char(c)),
            (Self::Char, Value::Str(s)) if s.chars().count() == 1 => {
                s.chars().next().map(Value::Char).ok_or(Value::Str(s))
            }
            (Self::Int, Value::Int(i)) => {
                if i32::try_from(i).is_ok() {
                    Ok(Value::Int(i))
                } else {
                    Err(Value::Int(i))
                }
            }
            (Self::Long, v @ Value::Int(_)) => Ok(v),
            (Self::Float | Self::Double, Value::Int(i)) => Ok(Value::Float(i as f64)),
            (Self::Float | Self::Double, v @ Value::Float(_)) => Ok(v),
            (Self::Date, v @ Value::Date(_)) => Ok(v),
            (Self::DateTime, v @ Value::DateTime(_)) => Ok(v),
            (_, other) => Err(other),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token that does not spell the requested scalar type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert '{value}' to {target}")]
pub struct ConversionError {
    /// The rejected token.
    pub value: String,
    /// The requested type.
    pub target: ScalarType,
}
