use std::num::{ParseFloatError, ParseIntError};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::duration::{DurationError, parse_duration};
use crate::errors::FillError;
use crate::types::{FieldDescriptor, FloatWidth, OptionSet, TypeKind};

/// A default value decoded for a declared type.
///
/// Integers are widened to 128 bits and floats to `f64`; the declared width
/// has already been enforced by [`decode`].
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Int(i128),
    Uint(u128),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Duration(Duration),
    Seq(Vec<DecodedValue>),
}

/// A decoded value together with the field it was decoded for.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<'a> {
    pub field: &'a FieldDescriptor,
    pub value: DecodedValue,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    #[error("unsigned value `{0}` cannot carry a sign")]
    Signed(String),

    #[error("{value} is out of range for {kind}")]
    OutOfRange { value: String, kind: TypeKind },

    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("defaults are not supported for {0}")]
    Unsupported(TypeKind),
}

impl DecodeError {
    /// Attaches the field context, turning the error into the walker-facing kind.
    pub fn for_field(self, field: &str, spec: &str) -> FillError {
        match self {
            Self::Unsupported(_) => FillError::unsupported(field),
            source => FillError::InvalidSpec {
                field: field.to_string(),
                spec: spec.to_string(),
                source,
            },
        }
    }
}

/// Decodes `spec` as a value of `kind`.
///
/// Sequence specs are split on `,` without any escaping, so an empty spec
/// yields a single empty element. Options never change the decoded value;
/// they only affect how it is applied.
pub fn decode(kind: &TypeKind, spec: &str, _options: &OptionSet) -> Result<DecodedValue, DecodeError> {
    match kind {
        TypeKind::Duration => Ok(DecodedValue::Duration(parse_duration(spec)?)),
        TypeKind::Bytes => Ok(DecodedValue::Bytes(STANDARD.decode(spec)?)),
        TypeKind::Int(width) => {
            let value: i128 = spec.parse()?;
            let (min, max) = width.signed_bounds();
            if value < min || value > max {
                return Err(DecodeError::OutOfRange {
                    value: spec.to_string(),
                    kind: kind.clone(),
                });
            }
            Ok(DecodedValue::Int(value))
        }
        TypeKind::Uint(width) => {
            if spec.starts_with('+') {
                return Err(DecodeError::Signed(spec.to_string()));
            }
            let value: u128 = spec.parse()?;
            if value > width.unsigned_max() {
                return Err(DecodeError::OutOfRange {
                    value: spec.to_string(),
                    kind: kind.clone(),
                });
            }
            Ok(DecodedValue::Uint(value))
        }
        TypeKind::Float(FloatWidth::F32) => Ok(DecodedValue::Float(spec.parse::<f32>()?.into())),
        TypeKind::Float(FloatWidth::F64) => Ok(DecodedValue::Float(spec.parse::<f64>()?)),
        TypeKind::String => Ok(DecodedValue::Str(spec.to_string())),
        TypeKind::Sequence(element) => spec
            .split(',')
            .map(|token| decode(element, token, &OptionSet::empty()))
            .collect::<Result<Vec<_>, _>>()
            .map(DecodedValue::Seq),
        TypeKind::Bool | TypeKind::Struct | TypeKind::Other => Err(DecodeError::Unsupported(kind.clone())),
    }
}

/// Decodes a field's default specification.
pub fn decode_field<'a>(field: &'a FieldDescriptor, spec: &str) -> crate::Result<Decoded<'a>> {
    decode(&field.kind, spec, &field.options)
        .map(|value| Decoded { field, value })
        .map_err(|err| err.for_field(&field.name, spec))
}
