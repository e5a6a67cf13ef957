//! String → typed value conversion.
//!
//! Rules, in order:
//! - Non-empty input for date-times, UUIDs and URIs goes through a
//!   dedicated parser.  URIs never fail: unparsable input becomes `Null`.
//! - Empty input for a non-nullable UUID is the nil UUID.
//! - Empty input for any other nullable target is `Null`.
//! - Everything else is a plain scalar conversion, which means an empty
//!   string fails for numbers and succeeds for strings.
//!
//! Nullability only changes how empty input is treated; it never turns a
//! parse failure into `Null`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use super::target::{TargetType, ValueKind};
use super::value::{UriRef, Value};

/// Date-time layouts carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%m/%d/%Y %H:%M:%S %:z",
];

/// Date-time layouts without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts; the time is midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Why a string could not be converted into its target kind.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("cannot convert to {kind}: {reason}")]
pub struct ConvertError {
    pub kind: ValueKind,
    pub reason: String,
}

impl ConvertError {
    fn new(kind: ValueKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Convert one raw payload value into `target`.
pub fn convert(value: &str, target: TargetType) -> Result<Value, ConvertError> {
    let kind = target.kind;

    if !value.is_empty() {
        match kind {
            ValueKind::DateTimeOffset => {
                return parse_date_time_offset(value)
                    .map(Value::DateTimeOffset)
                    .ok_or_else(|| ConvertError::new(kind, "not a recognised date-time"));
            }
            ValueKind::DateTime => {
                return parse_date_time(value)
                    .map(Value::DateTime)
                    .ok_or_else(|| ConvertError::new(kind, "not a recognised date-time"));
            }
            ValueKind::Uuid => {
                return Uuid::parse_str(value.trim())
                    .map(Value::Uuid)
                    .map_err(|e| ConvertError::new(kind, e.to_string()));
            }
            ValueKind::Uri => return Ok(parse_uri(value).map_or(Value::Null, Value::Uri)),
            _ => {}
        }
    } else if kind == ValueKind::Uuid && !target.nullable {
        return Ok(Value::Uuid(Uuid::nil()));
    } else if target.nullable {
        return Ok(Value::Null);
    }

    convert_scalar(value, kind)
}

/// Plain scalar conversion, used for everything without a dedicated parser.
fn convert_scalar(value: &str, kind: ValueKind) -> Result<Value, ConvertError> {
    let trimmed = value.trim();
    let fail = |e: &dyn std::fmt::Display| ConvertError::new(kind, e.to_string());

    let converted = match kind {
        ValueKind::String => Value::String(value.to_string()),
        ValueKind::Bool => Value::Bool(parse_bool(trimmed).ok_or_else(|| {
            ConvertError::new(kind, "expected 'true' or 'false'")
        })?),
        ValueKind::Char => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return Err(ConvertError::new(kind, "expected exactly one character")),
            }
        }
        ValueKind::I8 => Value::I8(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::U8 => Value::U8(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::I16 => Value::I16(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::U16 => Value::U16(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::I32 => Value::I32(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::U32 => Value::U32(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::I64 => Value::I64(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::U64 => Value::U64(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::F32 => Value::F32(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::F64 => Value::F64(trimmed.parse().map_err(|e| fail(&e))?),
        ValueKind::DateTime => Value::DateTime(
            parse_date_time(value)
                .ok_or_else(|| ConvertError::new(kind, "not a recognised date-time"))?,
        ),
        ValueKind::DateTimeOffset => Value::DateTimeOffset(
            parse_date_time_offset(value)
                .ok_or_else(|| ConvertError::new(kind, "not a recognised date-time"))?,
        ),
        ValueKind::Uuid => Value::Uuid(Uuid::parse_str(trimmed).map_err(|e| fail(&e))?),
        ValueKind::Uri => {
            return Err(ConvertError::new(
                kind,
                "an empty string is not a URI reference",
            ))
        }
    };

    Ok(converted)
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse a date-time, keeping its offset.  Input without an offset is
/// taken to be UTC.
pub fn parse_date_time_offset(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }

    parse_naive(s).map(|naive| naive.and_utc().fixed_offset())
}

/// Parse a date-time without an offset.  An explicit offset in the input
/// is applied and the result expressed in UTC.
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    parse_naive(s).or_else(|| parse_date_time_offset(s).map(|dt| dt.naive_utc()))
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Parse an absolute URL, or else a syntactically valid relative reference.
pub fn parse_uri(s: &str) -> Option<UriRef> {
    if let Ok(url) = Url::parse(s) {
        return Some(UriRef::Absolute(url));
    }
    if is_relative_reference(s) {
        return Some(UriRef::Relative(s.to_string()));
    }
    None
}

/// RFC 3986 reference characters, plus non-ASCII letters and digits
/// (IRIs).  Every `%` must start a two-digit hex escape.
fn is_relative_reference(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let escape_ok = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !escape_ok {
                return false;
            }
            i += 3;
            continue;
        }
        if b.is_ascii() {
            if !is_uri_ascii(b) {
                return false;
            }
            i += 1;
            continue;
        }
        // Non-ASCII: decode the full char at this position.
        match s[i..].chars().next() {
            Some(c) if c.is_alphanumeric() => i += c.len_utf8(),
            _ => return false,
        }
    }
    true
}

fn is_uri_ascii(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b':'
                | b'/'
                | b'?'
                | b'#'
                | b'['
                | b']'
                | b'@'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
        )
}
