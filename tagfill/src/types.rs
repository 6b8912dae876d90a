use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Declared type of a field, as reported by the record's metadata provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    String,
    Bool,
    /// `Vec<u8>`; defaults are base64 encoded.
    Bytes,
    /// `std::time::Duration`; defaults are duration expressions such as `1m10s`.
    Duration,
    /// `Vec<T>` for any `T` other than `u8`.
    Sequence(Box<TypeKind>),
    /// A nested record.
    Struct,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    W128,
    /// `isize` / `usize`
    Size,
}

impl IntWidth {
    /// Inclusive bounds of the signed integer of this width.
    pub fn signed_bounds(self) -> (i128, i128) {
        match self {
            Self::W8 => (i8::MIN.into(), i8::MAX.into()),
            Self::W16 => (i16::MIN.into(), i16::MAX.into()),
            Self::W32 => (i32::MIN.into(), i32::MAX.into()),
            Self::W64 => (i64::MIN.into(), i64::MAX.into()),
            Self::W128 => (i128::MIN, i128::MAX),
            Self::Size => (isize::MIN as i128, isize::MAX as i128),
        }
    }

    /// Largest value of the unsigned integer of this width.
    pub fn unsigned_max(self) -> u128 {
        match self {
            Self::W8 => u8::MAX.into(),
            Self::W16 => u16::MAX.into(),
            Self::W32 => u32::MAX.into(),
            Self::W64 => u64::MAX.into(),
            Self::W128 => u128::MAX,
            Self::Size => usize::MAX as u128,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::W8 => "8",
            Self::W16 => "16",
            Self::W32 => "32",
            Self::W64 => "64",
            Self::W128 => "128",
            Self::Size => "size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloatWidth {
    F32,
    F64,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(width) => write!(f, "i{}", width.suffix()),
            Self::Uint(width) => write!(f, "u{}", width.suffix()),
            Self::Float(FloatWidth::F32) => f.write_str("f32"),
            Self::Float(FloatWidth::F64) => f.write_str("f64"),
            Self::String => f.write_str("String"),
            Self::Bool => f.write_str("bool"),
            Self::Bytes => f.write_str("Vec<u8>"),
            Self::Duration => f.write_str("Duration"),
            Self::Sequence(element) => write!(f, "Vec<{element}>"),
            Self::Struct => f.write_str("struct"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// Whether a field is part of the record's public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    Exported,
    #[default]
    Hidden,
}

/// Raw per-field metadata handed out by a [`Record`](crate::Record) implementation.
///
/// `default` and `options` are the unparsed annotation strings; `None` means the
/// annotation is absent.
#[derive(Debug, Clone)]
pub struct FieldInfo<'a> {
    pub name: &'a str,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub writable: bool,
    pub default: Option<&'a str>,
    pub options: Option<&'a str>,
}

/// Owned description of one field, built by the walker from a [`FieldInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Position in declaration order.
    pub index: usize,
    pub name: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub writable: bool,
    pub default_spec: Option<String>,
    pub options: OptionSet,
}

impl FieldDescriptor {
    pub fn from_info(index: usize, info: FieldInfo<'_>) -> Self {
        Self {
            index,
            name: info.name.to_string(),
            kind: info.kind,
            visibility: info.visibility,
            writable: info.writable,
            default_spec: info.default.map(str::to_string),
            options: info.options.map(OptionSet::parse).unwrap_or_default(),
        }
    }

    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Exported
    }
}

/// Description of a whole record: its type name and every field in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    pub type_name: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Option tokens attached to a field. Unknown tokens are kept but carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeSet<String>);

impl OptionSet {
    /// Only assign when the field currently holds its zero value.
    pub const NONZERO: &'static str = "nonzero";

    /// Parses a comma separated option string such as `"nonzero"`.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn insert(&mut self, token: impl Into<String>) {
        self.0.insert(token.into());
    }

    pub fn nonzero(&self) -> bool {
        self.contains(Self::NONZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Caller supplied bit flags threaded through a fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Self = Self(0);
    /// Fill nested records before the field holding them.
    pub const RECURSIVE: Self = Self(1);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
