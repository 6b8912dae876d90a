//! Record resolution and field enumeration shared by the applier and the emitter.

use log::trace;

use crate::errors::{FillError, Result};
use crate::record::Record;
use crate::slot::{Resolved, ResolvedMut, Slot};
use crate::types::{FieldDescriptor, RecordDescriptor};

/// Follows indirection until a record is reached.
///
/// Fails with [`FillError::NilInput`] on an empty indirection and with
/// [`FillError::UnsupportedValue`] when the value is not a record.
pub fn resolve(mut target: &dyn Slot) -> Result<&dyn Record> {
    loop {
        match target.resolve() {
            Resolved::Record(record) => return Ok(record),
            Resolved::Indirect(Some(inner)) => target = inner,
            Resolved::Indirect(None) => return Err(FillError::NilInput),
            Resolved::Leaf => return Err(FillError::unsupported(target.kind().to_string())),
        }
    }
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut(mut target: &mut dyn Slot) -> Result<&mut dyn Record> {
    loop {
        let kind = target.kind();
        match target.resolve_mut() {
            ResolvedMut::Record(record) => return Ok(record),
            ResolvedMut::Indirect(Some(inner)) => target = inner,
            ResolvedMut::Indirect(None) => return Err(FillError::NilInput),
            ResolvedMut::Leaf => return Err(FillError::unsupported(kind.to_string())),
        }
    }
}

/// Builds a descriptor for every field of `record`, in declaration order.
pub fn descriptors(record: &dyn Record) -> Vec<FieldDescriptor> {
    (0..record.field_count())
        .filter_map(|index| {
            record
                .field_info(index)
                .map(|info| FieldDescriptor::from_info(index, info))
        })
        .collect()
}

/// Describes the record behind `target`.
pub fn describe(target: &dyn Slot) -> Result<RecordDescriptor> {
    let record = resolve(target)?;
    Ok(RecordDescriptor {
        type_name: record.type_name().to_string(),
        fields: descriptors(record),
    })
}

/// Returns the default specification to decode for `field`, if any.
///
/// Hidden fields and fields without a specification yield `None`. A field with
/// a specification that cannot be written is an error.
pub fn eligible(field: &FieldDescriptor) -> Result<Option<&str>> {
    if !field.is_exported() {
        trace!("skipping hidden field `{}`", field.name);
        return Ok(None);
    }
    let Some(spec) = field.default_spec.as_deref() else {
        trace!("field `{}` has no default", field.name);
        return Ok(None);
    };
    if !field.writable {
        return Err(FillError::UnsupportedOperation {
            field: field.name.clone(),
        });
    }
    Ok(Some(spec))
}
