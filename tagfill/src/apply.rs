//! Direct applier: decodes each field's default and writes it into the record.

use log::{debug, trace};

use crate::decode::{Decoded, decode_field};
use crate::errors::{FillError, Result};
use crate::record::Record;
use crate::slot::Slot;
use crate::types::{FieldDescriptor, Flags};
use crate::walker;

/// Fills the record behind `target` with its declared defaults.
///
/// Indirection is followed first; an empty `Option` anywhere on the way fails
/// with [`FillError::NilInput`]. The first failing field aborts the fill, and
/// fields assigned before it keep their new values.
///
/// With [`Flags::RECURSIVE`], nested records held by exported fields are
/// filled before the field's own default is considered.
pub fn fill(target: &mut dyn Slot, flags: Flags) -> Result<()> {
    let record = walker::resolve_mut(target)?;
    fill_record(record, flags)
}

/// Fills an already resolved record.
pub fn fill_record(record: &mut dyn Record, flags: Flags) -> Result<()> {
    let fields = walker::descriptors(record);
    debug!("filling `{}` ({} fields)", record.type_name(), fields.len());

    for field in &fields {
        if flags.contains(Flags::RECURSIVE) && field.is_exported() {
            fill_nested(record, field, flags)?;
        }

        let Some(spec) = walker::eligible(field)? else {
            continue;
        };
        let decoded = decode_field(field, spec)?;
        apply(record, decoded)?;
    }
    Ok(())
}

fn fill_nested(record: &mut dyn Record, field: &FieldDescriptor, flags: Flags) -> Result<()> {
    let Some(slot) = record.field_mut(field.index) else {
        return Ok(());
    };
    let nested = match walker::resolve_mut(slot) {
        Ok(nested) => nested,
        Err(err) if err.is_unsupported_value() => {
            trace!("field `{}` holds no record, not descending", field.name);
            return Ok(());
        }
        Err(err) => return Err(err),
    };
    debug!("descending into field `{}`", field.name);
    fill_record(nested, flags)
}

/// Assigns a decoded default to its field.
///
/// With the `nonzero` option the assignment only happens while the field still
/// holds its zero value; otherwise the call is a no-op.
pub fn apply(record: &mut dyn Record, decoded: Decoded<'_>) -> Result<()> {
    let field = decoded.field;
    let not_writable = || FillError::UnsupportedOperation {
        field: field.name.clone(),
    };

    if field.options.nonzero() {
        let current = record.field(field.index).ok_or_else(not_writable)?;
        if !current.is_zero() {
            debug!("field `{}` already set, keeping current value", field.name);
            return Ok(());
        }
    }

    let slot = record.field_mut(field.index).ok_or_else(not_writable)?;
    slot.assign(decoded.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldInfo, IntWidth, TypeKind, Visibility};

    /// Record written by hand, the way a runtime-described type would be.
    #[derive(Default)]
    struct Settings {
        retries: u32,
        label: String,
        revision: u64,
    }

    impl Record for Settings {
        fn type_name(&self) -> &str {
            "Settings"
        }

        fn field_count(&self) -> usize {
            3
        }

        fn field_info(&self, index: usize) -> Option<FieldInfo<'_>> {
            let info = match index {
                0 => FieldInfo {
                    name: "retries",
                    kind: TypeKind::Uint(IntWidth::W32),
                    visibility: Visibility::Exported,
                    writable: true,
                    default: Some("3"),
                    options: Some("nonzero"),
                },
                1 => FieldInfo {
                    name: "label",
                    kind: TypeKind::String,
                    visibility: Visibility::Exported,
                    writable: true,
                    default: Some("primary"),
                    options: None,
                },
                2 => FieldInfo {
                    name: "revision",
                    kind: TypeKind::Uint(IntWidth::W64),
                    visibility: Visibility::Exported,
                    writable: false,
                    default: Some("1"),
                    options: None,
                },
                _ => return None,
            };
            Some(info)
        }

        fn field(&self, index: usize) -> Option<&dyn Slot> {
            match index {
                0 => Some(&self.retries),
                1 => Some(&self.label),
                2 => Some(&self.revision),
                _ => None,
            }
        }

        fn field_mut(&mut self, index: usize) -> Option<&mut dyn Slot> {
            match index {
                0 => Some(&mut self.retries),
                1 => Some(&mut self.label),
                _ => None,
            }
        }
    }

    #[test]
    fn stops_at_the_first_unwritable_field() {
        let mut settings = Settings::default();
        let err = fill_record(&mut settings, Flags::NONE).unwrap_err();

        assert!(matches!(err, FillError::UnsupportedOperation { ref field } if field == "revision"));
        assert_eq!(settings.retries, 3);
        assert_eq!(settings.label, "primary");
        assert_eq!(settings.revision, 0);
    }

    #[test]
    fn nonzero_guard_keeps_existing_values() {
        let mut settings = Settings {
            retries: 9,
            ..Settings::default()
        };
        let fields = walker::descriptors(&settings);
        let decoded = decode_field(&fields[0], "3").unwrap();
        apply(&mut settings, decoded).unwrap();
        assert_eq!(settings.retries, 9);

        settings.retries = 0;
        let decoded = decode_field(&fields[0], "3").unwrap();
        apply(&mut settings, decoded).unwrap();
        assert_eq!(settings.retries, 3);
    }

    #[test]
    fn apply_without_field_access_is_unsupported() {
        let mut settings = Settings::default();
        let field = FieldDescriptor {
            index: 2,
            name: "revision".into(),
            kind: TypeKind::Uint(IntWidth::W64),
            visibility: Visibility::Exported,
            writable: true,
            ..FieldDescriptor::default()
        };
        let decoded = decode_field(&field, "5").unwrap();
        assert!(matches!(
            apply(&mut settings, decoded),
            Err(FillError::UnsupportedOperation { .. })
        ));
    }
}
