//! Target type descriptors for bound fields.
//!
//! A `TargetType` names the semantic type a caller wants a field coerced
//! into, optionally wrapped as nullable.  Descriptors can be written as
//! strings (`int`, `guid?`, `Nullable<DateTime>`) so the CLI and config
//! files can declare fields without code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SealedParamsError;

/// The base kind a value is converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bool,
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    String,
    DateTime,
    DateTimeOffset,
    Uuid,
    Uri,
}

impl ValueKind {
    /// Canonical lowercase name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Char => "char",
            ValueKind::I8 => "i8",
            ValueKind::U8 => "u8",
            ValueKind::I16 => "i16",
            ValueKind::U16 => "u16",
            ValueKind::I32 => "i32",
            ValueKind::U32 => "u32",
            ValueKind::I64 => "i64",
            ValueKind::U64 => "u64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::String => "string",
            ValueKind::DateTime => "datetime",
            ValueKind::DateTimeOffset => "datetimeoffset",
            ValueKind::Uuid => "uuid",
            ValueKind::Uri => "uri",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = SealedParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => ValueKind::Bool,
            "char" => ValueKind::Char,
            "i8" | "sbyte" => ValueKind::I8,
            "u8" | "byte" => ValueKind::U8,
            "i16" | "short" | "int16" => ValueKind::I16,
            "u16" | "ushort" | "uint16" => ValueKind::U16,
            "i32" | "int" | "int32" => ValueKind::I32,
            "u32" | "uint" | "uint32" => ValueKind::U32,
            "i64" | "long" | "int64" => ValueKind::I64,
            "u64" | "ulong" | "uint64" => ValueKind::U64,
            "f32" | "float" | "single" => ValueKind::F32,
            "f64" | "double" => ValueKind::F64,
            "string" | "str" => ValueKind::String,
            "datetime" => ValueKind::DateTime,
            "datetimeoffset" => ValueKind::DateTimeOffset,
            "uuid" | "guid" => ValueKind::Uuid,
            "uri" | "url" => ValueKind::Uri,
            other => {
                return Err(SealedParamsError::InvalidFieldSpec(format!(
                    "unknown type '{other}'"
                )))
            }
        };
        Ok(kind)
    }
}

/// A requested type: a base kind, optionally nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetType {
    pub kind: ValueKind,
    #[serde(default)]
    pub nullable: bool,
}

impl TargetType {
    /// A non-nullable target of `kind`.
    pub const fn of(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// A nullable target of `kind`.
    pub const fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

impl From<ValueKind> for TargetType {
    fn from(kind: ValueKind) -> Self {
        Self::of(kind)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl FromStr for TargetType {
    type Err = SealedParamsError;

    /// Accepts `kind`, `kind?`, `Option<kind>` and `Nullable<kind>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(inner) = s.strip_suffix('?') {
            return Ok(Self::nullable(inner.parse()?));
        }

        let lower = s.to_ascii_lowercase();
        for wrapper in ["nullable<", "option<"] {
            if let Some(rest) = lower.strip_prefix(wrapper) {
                let inner = rest.strip_suffix('>').ok_or_else(|| {
                    SealedParamsError::InvalidFieldSpec(format!("unclosed '<' in '{s}'"))
                })?;
                return Ok(Self::nullable(inner.parse()?));
            }
        }

        Ok(Self::of(s.parse()?))
    }
}

/// One field the caller wants filled: a name and its target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub target: TargetType,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, target: impl Into<TargetType>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }
}

impl FromStr for FieldSpec {
    type Err = SealedParamsError;

    /// Parse `name:type`, e.g. `number:int` or `id:guid?`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, target) = s.split_once(':').ok_or_else(|| {
            SealedParamsError::InvalidFieldSpec(format!("expected NAME:TYPE, got '{s}'"))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(SealedParamsError::InvalidFieldSpec(format!(
                "field name is empty in '{s}'"
            )));
        }
        Ok(Self::new(name, target.parse::<TargetType>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_kinds() {
        assert_eq!("int".parse::<TargetType>().unwrap(), TargetType::of(ValueKind::I32));
        assert_eq!("String".parse::<TargetType>().unwrap(), TargetType::of(ValueKind::String));
        assert_eq!("Guid".parse::<TargetType>().unwrap(), TargetType::of(ValueKind::Uuid));
        assert_eq!(
            "DateTimeOffset".parse::<TargetType>().unwrap(),
            TargetType::of(ValueKind::DateTimeOffset)
        );
    }

    #[test]
    fn parse_nullable_forms() {
        let expected = TargetType::nullable(ValueKind::I32);
        assert_eq!("int?".parse::<TargetType>().unwrap(), expected);
        assert_eq!("Nullable<int>".parse::<TargetType>().unwrap(), expected);
        assert_eq!("Option<i32>".parse::<TargetType>().unwrap(), expected);
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        assert!("decimal128".parse::<TargetType>().is_err());
        assert!("".parse::<TargetType>().is_err());
        assert!("Nullable<int".parse::<TargetType>().is_err());
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for s in ["i32", "uuid?", "datetimeoffset", "uri?"] {
            let target: TargetType = s.parse().unwrap();
            assert_eq!(target.to_string(), s);
        }
    }

    #[test]
    fn parse_field_spec() {
        let spec: FieldSpec = "number:int".parse().unwrap();
        assert_eq!(spec, FieldSpec::new("number", ValueKind::I32));

        let spec: FieldSpec = " id : guid? ".parse().unwrap();
        assert_eq!(spec, FieldSpec::new("id", TargetType::nullable(ValueKind::Uuid)));
    }

    #[test]
    fn parse_field_spec_errors() {
        assert!("number".parse::<FieldSpec>().is_err());
        assert!(":int".parse::<FieldSpec>().is_err());
        assert!("number:bogus".parse::<FieldSpec>().is_err());
    }
}
