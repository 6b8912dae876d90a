//! Support items for code generated by `#[derive(Defaults)]`. Not public API.
//!
//! The derive reaches every field through [`FieldAccess`]. Method calls on
//! `&FieldAccess<T>` pick [`ViaSlot`] when `T: Slot` and fall back to
//! [`ViaOther`] otherwise, so fields of any type can sit in a record: those
//! outside the supported set report [`TypeKind::Other`] and expose no slot.

use std::marker::PhantomData;

use crate::slot::Slot;
use crate::types::TypeKind;

pub struct FieldAccess<T>(PhantomData<T>);

impl<T> FieldAccess<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for FieldAccess<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub trait ViaSlot {
    type Value;

    fn kind(&self) -> TypeKind;

    fn slot<'a>(&self, value: &'a Self::Value) -> Option<&'a dyn Slot>;

    fn slot_mut<'a>(&self, value: &'a mut Self::Value) -> Option<&'a mut dyn Slot>;
}

impl<T: Slot> ViaSlot for FieldAccess<T> {
    type Value = T;

    fn kind(&self) -> TypeKind {
        T::declared_kind()
    }

    fn slot<'a>(&self, value: &'a T) -> Option<&'a dyn Slot> {
        Some(value)
    }

    fn slot_mut<'a>(&self, value: &'a mut T) -> Option<&'a mut dyn Slot> {
        Some(value)
    }
}

pub trait ViaOther {
    type Value;

    fn kind(&self) -> TypeKind {
        TypeKind::Other
    }

    fn slot<'a>(&self, _value: &'a Self::Value) -> Option<&'a dyn Slot> {
        None
    }

    fn slot_mut<'a>(&self, _value: &'a mut Self::Value) -> Option<&'a mut dyn Slot> {
        None
    }
}

impl<T> ViaOther for &FieldAccess<T> {
    type Value = T;
}
