//! Declarative field defaults.
//!
//! Fields carry a default specification such as `"8080"`, `"1m10s"` or
//! `"first,second"`. [`fill`] decodes each specification for the field's
//! declared type and assigns it in place; [`generate_code`] renders the same
//! decisions as a Rust method that performs the assignments without any
//! runtime metadata.
//!
//! ```text
//! use tagfill::{Defaults, Flags};
//!
//! #[derive(Defaults, Default)]
//! pub struct Server {
//!     #[tagfill(default = "8080")]
//!     pub port: u16,
//!     #[tagfill(default = "30s", opt = "nonzero")]
//!     pub timeout: std::time::Duration,
//! }
//!
//! let mut server = Server::default();
//! tagfill::fill(&mut server, Flags::NONE)?;
//! ```

extern crate self as tagfill;

pub mod apply;
pub mod decode;
pub mod duration;
pub mod emit;
pub mod errors;
#[doc(hidden)]
pub mod macros;
pub mod record;
pub mod slot;
pub mod types;
pub mod walker;

pub use apply::{apply, fill, fill_record};
pub use decode::{DecodeError, Decoded, DecodedValue, decode, decode_field};
pub use duration::{DurationError, parse_duration};
pub use emit::{CodeGenerator, EmitConfig, generate_code, generate_code_string};
pub use errors::*;
pub use record::{Record, record_is_zero};
pub use slot::{Resolved, ResolvedMut, Slot};
pub use tagfill_macros::Defaults;
pub use types::{FieldDescriptor, FieldInfo, Flags, FloatWidth, IntWidth, OptionSet, RecordDescriptor, TypeKind, Visibility};
pub use walker::{describe, resolve, resolve_mut};
