use crate::slot::Slot;
use crate::types::FieldInfo;

/// Field-level metadata and access for a record type.
///
/// This trait is automatically implemented by `#[derive(Defaults)]`. It can be
/// implemented by hand for records whose layout is only known at runtime.
///
/// Indices run from `0` to `field_count() - 1` in declaration order. `field` and
/// `field_mut` return `None` for fields whose value is not reachable (hidden or
/// skipped fields).
pub trait Record {
    /// Name of the record type, used as the `impl` target of generated code.
    fn type_name(&self) -> &str;

    fn field_count(&self) -> usize;

    fn field_info(&self, index: usize) -> Option<FieldInfo<'_>>;

    fn field(&self, index: usize) -> Option<&dyn Slot>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Slot>;
}

/// Returns `true` when every reachable field of `record` holds its zero value.
pub fn record_is_zero(record: &dyn Record) -> bool {
    (0..record.field_count())
        .filter_map(|index| record.field(index))
        .all(|slot| slot.is_zero())
}
