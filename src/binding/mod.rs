//! Typed coercion engine.
//!
//! This module provides:
//! - Query-string payload parsing (`pairs`)
//! - Target type descriptors and field specs (`target`)
//! - Typed values (`value`)
//! - String → value conversion rules (`convert`)
//! - Per-field binding with error isolation (`engine`)

pub mod convert;
pub mod engine;
pub mod pairs;
pub mod target;
pub mod value;

// Re-export the most commonly used items.
pub use convert::{convert, ConvertError};
pub use engine::{bind, Binding, Bindings, ConversionError};
pub use pairs::{parse_pairs, PlaintextPairs};
pub use target::{FieldSpec, TargetType, ValueKind};
pub use value::{UriRef, Value};
