use std::time::Duration;

use crate::decode::DecodedValue;
use crate::errors::{FillError, Result};
use crate::record::Record;
use crate::types::{FloatWidth, IntWidth, TypeKind};

/// What a value turns into once one level of indirection is followed.
pub enum Resolved<'a> {
    Record(&'a dyn Record),
    /// A reference-like value; `None` when it is empty.
    Indirect(Option<&'a dyn Slot>),
    Leaf,
}

/// Mutable counterpart of [`Resolved`].
pub enum ResolvedMut<'a> {
    Record(&'a mut dyn Record),
    Indirect(Option<&'a mut dyn Slot>),
    Leaf,
}

/// A value that can be inspected and assigned through a [`DecodedValue`].
///
/// Implemented for the supported scalar types, `String`, `Duration`, `Vec<T>`,
/// the indirections `Option<T>`, `Box<T>` and `&mut T`, and for every type
/// deriving `Defaults`.
pub trait Slot {
    /// Declared kind of the implementing type.
    fn declared_kind() -> TypeKind
    where
        Self: Sized;

    fn kind(&self) -> TypeKind;

    /// Whether the value equals its type's zero value.
    fn is_zero(&self) -> bool;

    fn assign(&mut self, value: DecodedValue) -> Result<()>;

    fn from_decoded(value: DecodedValue) -> Result<Self>
    where
        Self: Sized;

    fn resolve(&self) -> Resolved<'_> {
        Resolved::Leaf
    }

    fn resolve_mut(&mut self) -> ResolvedMut<'_> {
        ResolvedMut::Leaf
    }
}

fn mismatch<T: Slot>() -> FillError {
    FillError::unsupported(T::declared_kind().to_string())
}

macro_rules! integer_slot {
    ($($ty:ty => $variant:ident($width:ident)),* $(,)?) => {
        $(
            impl Slot for $ty {
                fn declared_kind() -> TypeKind {
                    TypeKind::$variant(IntWidth::$width)
                }

                fn kind(&self) -> TypeKind {
                    Self::declared_kind()
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn assign(&mut self, value: DecodedValue) -> Result<()> {
                    *self = Self::from_decoded(value)?;
                    Ok(())
                }

                fn from_decoded(value: DecodedValue) -> Result<Self> {
                    match value {
                        DecodedValue::Int(v) => <$ty>::try_from(v).map_err(|_| mismatch::<Self>()),
                        DecodedValue::Uint(v) => <$ty>::try_from(v).map_err(|_| mismatch::<Self>()),
                        _ => Err(mismatch::<Self>()),
                    }
                }
            }
        )*
    };
}

integer_slot! {
    i8 => Int(W8),
    i16 => Int(W16),
    i32 => Int(W32),
    i64 => Int(W64),
    i128 => Int(W128),
    isize => Int(Size),
    u8 => Uint(W8),
    u16 => Uint(W16),
    u32 => Uint(W32),
    u64 => Uint(W64),
    u128 => Uint(W128),
    usize => Uint(Size),
}

impl Slot for f32 {
    fn declared_kind() -> TypeKind {
        TypeKind::Float(FloatWidth::F32)
    }

    fn kind(&self) -> TypeKind {
        Self::declared_kind()
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn assign(&mut self, value: DecodedValue) -> Result<()> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }

    fn from_decoded(value: DecodedValue) -> Result<Self> {
        match value {
            // Decoded at 32-bit precision, so narrowing is exact.
            DecodedValue::Float(v) => Ok(v as f32),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Slot for f64 {
    fn declared_kind() -> TypeKind {
        TypeKind::Float(FloatWidth::F64)
    }

    fn kind(&self) -> TypeKind {
        Self::declared_kind()
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn assign(&mut self, value: DecodedValue) -> Result<()> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }

    fn from_decoded(value: DecodedValue) -> Result<Self> {
        match value {
            DecodedValue::Float(v) => Ok(v),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Slot for String {
    fn declared_kind() -> TypeKind {
        TypeKind::String
    }

    fn kind(&self) -> TypeKind {
        TypeKind::String
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, value: DecodedValue) -> Result<()> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }

    fn from_decoded(value: DecodedValue) -> Result<Self> {
        match value {
            DecodedValue::Str(v) => Ok(v),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Slot for Duration {
    fn declared_kind() -> TypeKind {
        TypeKind::Duration
    }

    fn kind(&self) -> TypeKind {
        TypeKind::Duration
    }

    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }

    fn assign(&mut self, value: DecodedValue) -> Result<()> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }

    fn from_decoded(value: DecodedValue) -> Result<Self> {
        match value {
            DecodedValue::Duration(v) => Ok(v),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Slot for bool {
    fn declared_kind() -> TypeKind {
        TypeKind::Bool
    }

    fn kind(&self) -> TypeKind {
        TypeKind::Bool
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn assign(&mut self, _value: DecodedValue) -> Result<()> {
        Err(mismatch::<Self>())
    }

    fn from_decoded(_value: DecodedValue) -> Result<Self> {
        Err(mismatch::<Self>())
    }
}

impl<T: Slot> Slot for Vec<T> {
    fn declared_kind() -> TypeKind {
        match T::declared_kind() {
            TypeKind::Uint(IntWidth::W8) => TypeKind::Bytes,
            element => TypeKind::Sequence(Box::new(element)),
        }
    }

    fn kind(&self) -> TypeKind {
        Self::declared_kind()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, value: DecodedValue) -> Result<()> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }

    fn from_decoded(value: DecodedValue) -> Result<Self> {
        match value {
            DecodedValue::Bytes(bytes) => bytes
                .into_iter()
                .map(|byte| T::from_decoded(DecodedValue::Uint(byte.into())))
                .collect(),
            DecodedValue::Seq(items) => items.into_iter().map(T::from_decoded).collect(),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl<T: Slot> Slot for Option<T> {
    fn declared_kind() -> TypeKind {
        TypeKind::Other
    }

    fn kind(&self) -> TypeKind {
        TypeKind::Other
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn assign(&mut self, _value: DecodedValue) -> Result<()> {
        Err(mismatch::<Self>())
    }

    fn from_decoded(_value: DecodedValue) -> Result<Self> {
        Err(mismatch::<Self>())
    }

    fn resolve(&self) -> Resolved<'_> {
        Resolved::Indirect(self.as_ref().map(|inner| inner as &dyn Slot))
    }

    fn resolve_mut(&mut self) -> ResolvedMut<'_> {
        ResolvedMut::Indirect(self.as_mut().map(|inner| inner as &mut dyn Slot))
    }
}

impl<T: Slot> Slot for Box<T> {
    fn declared_kind() -> TypeKind {
        TypeKind::Other
    }

    fn kind(&self) -> TypeKind {
        TypeKind::Other
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn assign(&mut self, _value: DecodedValue) -> Result<()> {
        Err(mismatch::<Self>())
    }

    fn from_decoded(_value: DecodedValue) -> Result<Self> {
        Err(mismatch::<Self>())
    }

    fn resolve(&self) -> Resolved<'_> {
        Resolved::Indirect(Some(&**self as &dyn Slot))
    }

    fn resolve_mut(&mut self) -> ResolvedMut<'_> {
        ResolvedMut::Indirect(Some(&mut **self as &mut dyn Slot))
    }
}

impl<T: Slot> Slot for &mut T {
    fn declared_kind() -> TypeKind {
        TypeKind::Other
    }

    fn kind(&self) -> TypeKind {
        TypeKind::Other
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn assign(&mut self, _value: DecodedValue) -> Result<()> {
        Err(FillError::unsupported("&mut"))
    }

    fn from_decoded(_value: DecodedValue) -> Result<Self> {
        Err(FillError::unsupported("&mut"))
    }

    fn resolve(&self) -> Resolved<'_> {
        Resolved::Indirect(Some(&**self as &dyn Slot))
    }

    fn resolve_mut(&mut self) -> ResolvedMut<'_> {
        ResolvedMut::Indirect(Some(&mut **self as &mut dyn Slot))
    }
}
