//! Text emitter: renders a record's defaults as a Rust method body.
//!
//! The generated method performs the same assignments as [`fill`](crate::fill)
//! without walking metadata at runtime:
//!
//! ```text
//! impl Example {
//!     pub fn fill_defaults(&mut self) {
//!         self.name = String::from("anonymous");
//!         if self.age == 0 {
//!             self.age = 23;
//!         }
//!     }
//! }
//! ```

use std::io;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::decode::{Decoded, DecodedValue, decode_field};
use crate::errors::{FillError, Result};
use crate::record::Record;
use crate::slot::Slot;
use crate::types::{FloatWidth, TypeKind};
use crate::walker;

const BYTES_PER_LINE: usize = 10;

/// Shape of the generated method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Name of the generated method.
    pub method_name: String,
    /// Visibility qualifier in front of `fn`; empty for private.
    pub visibility: String,
    /// One level of indentation.
    pub indent: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            method_name: "fill_defaults".to_string(),
            visibility: "pub".to_string(),
            indent: "    ".to_string(),
        }
    }
}

/// Builder for configuring and running the emitter.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    config: EmitConfig,
}

impl CodeGenerator {
    /// Create a generator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitConfig) -> Self {
        Self { config }
    }

    /// Set the name of the generated method.
    ///
    /// Default: `fill_defaults`
    pub fn method_name(mut self, name: impl Into<String>) -> Self {
        self.config.method_name = name.into();
        self
    }

    /// Set the visibility of the generated method.
    ///
    /// Default: `pub`
    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.config.visibility = visibility.into();
        self
    }

    /// Set the string used for one indentation level.
    ///
    /// Default: four spaces
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.config.indent = indent.into();
        self
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Resolve `target` and write the generated `impl` block to `out`.
    pub fn generate(&self, target: &dyn Slot, out: &mut dyn io::Write) -> Result<()> {
        let record = walker::resolve(target)?;
        self.generate_record(record, out)
    }

    /// Like [`generate`](Self::generate), collecting the output into a string.
    pub fn generate_string(&self, target: &dyn Slot) -> Result<String> {
        let record = walker::resolve(target)?;
        self.render(record)
    }

    /// Write the generated `impl` block for an already resolved record.
    ///
    /// Every field is decoded before anything is written, so a failing field
    /// leaves `out` untouched.
    pub fn generate_record(&self, record: &dyn Record, out: &mut dyn io::Write) -> Result<()> {
        let code = self.render(record)?;
        out.write_all(code.as_bytes())?;
        Ok(())
    }

    fn render(&self, record: &dyn Record) -> Result<String> {
        let fields = walker::descriptors(record);
        let mut statements = Vec::new();
        for field in &fields {
            if let Some(spec) = walker::eligible(field)? {
                statements.push(decode_field(field, spec)?);
            }
        }
        let zero_checks = statements
            .iter()
            .map(|decoded| {
                if decoded.field.options.nonzero() {
                    zero_check(decoded).map(Some)
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "emitting {} statements for `{}`",
            statements.len(),
            record.type_name()
        );

        let header = if self.config.visibility.is_empty() {
            format!("fn {}(&mut self) {{", self.config.method_name)
        } else {
            format!(
                "{} fn {}(&mut self) {{",
                self.config.visibility, self.config.method_name
            )
        };

        let mut writer = Writer::new(&self.config.indent);
        writer.block(&format!("impl {} {{", record.type_name()), "}", |w| {
            w.line();
            w.block(&header, "}", |w| {
                for (decoded, guard) in statements.iter().zip(&zero_checks) {
                    w.line();
                    match guard {
                        Some(check) => {
                            let open = format!("if self.{}{check} {{", decoded.field.name);
                            w.block(&open, "}", |w| {
                                w.line();
                                w.assignment(decoded);
                            });
                        }
                        None => w.assignment(decoded),
                    }
                }
            });
        });
        Ok(writer.finish())
    }
}

/// Writes the default-filling `impl` block for `target` using the default
/// [`EmitConfig`].
pub fn generate_code(target: &dyn Slot, out: &mut dyn io::Write) -> Result<()> {
    CodeGenerator::new().generate(target, out)
}

pub fn generate_code_string(target: &dyn Slot) -> Result<String> {
    CodeGenerator::new().generate_string(target)
}

/// Suffix appended to `self.<field>` that holds while the field is still zero.
fn zero_check(decoded: &Decoded<'_>) -> Result<&'static str> {
    match decoded.field.kind {
        TypeKind::Int(_) | TypeKind::Uint(_) => Ok(" == 0"),
        TypeKind::Float(_) => Ok(" == 0.0"),
        TypeKind::String | TypeKind::Bytes | TypeKind::Sequence(_) => Ok(".is_empty()"),
        TypeKind::Duration => Ok(".is_zero()"),
        TypeKind::Bool | TypeKind::Struct | TypeKind::Other => Err(FillError::UnsupportedValue {
            name: decoded.field.name.clone(),
        }),
    }
}

fn float_literal(value: f64, width: FloatWidth) -> String {
    let ty = match width {
        FloatWidth::F32 => "f32",
        FloatWidth::F64 => "f64",
    };
    if value.is_nan() {
        format!("{ty}::NAN")
    } else if value == f64::INFINITY {
        format!("{ty}::INFINITY")
    } else if value == f64::NEG_INFINITY {
        format!("{ty}::NEG_INFINITY")
    } else {
        format!("{value:.6}")
    }
}

fn byte_line(chunk: &[u8]) -> String {
    let entries: Vec<String> = chunk.iter().map(|byte| format!("0x{byte:02x}")).collect();
    format!("{},", entries.join(", "))
}

/// Indentation-aware output buffer.
struct Writer<'a> {
    buf: String,
    indent: &'a str,
    depth: usize,
}

impl<'a> Writer<'a> {
    fn new(indent: &'a str) -> Self {
        Self {
            buf: String::new(),
            indent,
            depth: 0,
        }
    }

    fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Starts a new line at the current depth.
    fn line(&mut self) {
        self.buf.push('\n');
        for _ in 0..self.depth {
            self.buf.push_str(self.indent);
        }
    }

    /// Writes `open`, the indented body, then `close` on its own line.
    fn block(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self)) {
        self.push(open);
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line();
        self.push(close);
    }

    fn assignment(&mut self, decoded: &Decoded<'_>) {
        self.push(&format!("self.{} = ", decoded.field.name));
        self.literal(&decoded.field.kind, &decoded.value);
        self.push(";");
    }

    fn literal(&mut self, kind: &TypeKind, value: &DecodedValue) {
        match value {
            DecodedValue::Int(v) => self.push(&v.to_string()),
            DecodedValue::Uint(v) => self.push(&v.to_string()),
            DecodedValue::Float(v) => {
                let width = match kind {
                    TypeKind::Float(width) => *width,
                    _ => FloatWidth::F64,
                };
                self.push(&float_literal(*v, width));
            }
            DecodedValue::Str(s) => self.push(&format!("String::from(\"{s}\")")),
            DecodedValue::Duration(d) => {
                self.push(&format!("std::time::Duration::from_nanos({})", d.as_nanos()));
            }
            DecodedValue::Bytes(bytes) if bytes.is_empty() => self.push("vec![]"),
            DecodedValue::Bytes(bytes) => self.block("vec![", "]", |w| {
                for chunk in bytes.chunks(BYTES_PER_LINE) {
                    w.line();
                    w.push(&byte_line(chunk));
                }
            }),
            DecodedValue::Seq(items) => {
                let element = match kind {
                    TypeKind::Sequence(element) => element.as_ref(),
                    other => other,
                };
                self.block("vec![", "]", |w| {
                    for item in items {
                        w.line();
                        w.literal(element, item);
                        w.push(",");
                    }
                });
            }
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::types::{FieldDescriptor, IntWidth, OptionSet};

    fn render_literal(kind: TypeKind, value: DecodedValue) -> String {
        let mut writer = Writer::new("    ");
        writer.literal(&kind, &value);
        writer.finish()
    }

    #[test]
    fn floats_use_six_decimals() {
        assert_eq!(float_literal(180.5, FloatWidth::F64), "180.500000");
        assert_eq!(float_literal(-0.25, FloatWidth::F64), "-0.250000");
        assert_eq!(float_literal(1e-7, FloatWidth::F64), "0.000000");
        assert_eq!(float_literal(f64::NAN, FloatWidth::F32), "f32::NAN");
        assert_eq!(float_literal(f64::NEG_INFINITY, FloatWidth::F64), "f64::NEG_INFINITY");
    }

    #[test]
    fn bytes_wrap_every_ten_entries() {
        let value = DecodedValue::Bytes((0u8..12).collect());
        assert_eq!(
            render_literal(TypeKind::Bytes, value),
            "vec![\n    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09,\n    0x0a, 0x0b,\n]"
        );
        assert_eq!(render_literal(TypeKind::Bytes, DecodedValue::Bytes(Vec::new())), "vec![]");
    }

    #[test]
    fn sequences_render_one_element_per_line() {
        let kind = TypeKind::Sequence(Box::new(TypeKind::Duration));
        let value = DecodedValue::Seq(vec![
            DecodedValue::Duration(Duration::from_secs(1)),
            DecodedValue::Duration(Duration::from_millis(5)),
        ]);
        assert_eq!(
            render_literal(kind, value),
            "vec![\n    std::time::Duration::from_nanos(1000000000),\n    std::time::Duration::from_nanos(5000000),\n]"
        );
    }

    #[test]
    fn strings_are_not_escaped() {
        let value = DecodedValue::Str("say \"hi\"".into());
        assert_eq!(render_literal(TypeKind::String, value), "String::from(\"say \"hi\"\")");
    }

    #[test]
    fn zero_checks_follow_the_declared_kind() {
        let field = |kind| FieldDescriptor {
            name: "value".into(),
            kind,
            options: OptionSet::parse("nonzero"),
            ..FieldDescriptor::default()
        };
        let check = |descriptor: &FieldDescriptor| {
            zero_check(&Decoded {
                field: descriptor,
                value: DecodedValue::Int(0),
            })
            .unwrap()
        };
        assert_eq!(check(&field(TypeKind::Int(IntWidth::W8))), " == 0");
        assert_eq!(check(&field(TypeKind::Float(FloatWidth::F32))), " == 0.0");
        assert_eq!(check(&field(TypeKind::Bytes)), ".is_empty()");
        assert_eq!(check(&field(TypeKind::Duration)), ".is_zero()");
    }

    #[derive(crate::Defaults, Default)]
    pub struct Guards {
        #[tagfill(default = "5", opt = "nonzero")]
        pub count: u8,
        #[tagfill(default = "name", opt = "nonzero")]
        pub label: String,
        #[tagfill(default = "2s", opt = "nonzero")]
        pub wait: Duration,
    }

    #[test]
    fn guards_attach_directly_to_the_field() {
        let generated = generate_code_string(&Guards::default()).unwrap();
        assert!(generated.contains("if self.count == 0 {"));
        assert!(generated.contains("if self.label.is_empty() {"));
        assert!(generated.contains("if self.wait.is_zero() {"));
        assert!(!generated.contains(" .is_"));
    }

    #[test]
    fn builder_overrides_defaults() {
        let generator = CodeGenerator::new().method_name("apply_defaults").visibility("").indent("\t");
        assert_eq!(
            generator.config(),
            &EmitConfig {
                method_name: "apply_defaults".into(),
                visibility: String::new(),
                indent: "\t".into(),
            }
        );
    }
}
