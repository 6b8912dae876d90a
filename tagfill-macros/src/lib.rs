use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result, Type, Visibility, parse_macro_input};

mod parsed;

use parsed::ParsedRecord;

/// Derive `tagfill::Record` and `tagfill::Slot` for a struct with named fields.
///
/// Field attributes:
///
/// - `#[tagfill(default = "...")]` declares the default specification.
/// - `#[tagfill(opt = "nonzero")]` adds comma separated option tokens.
/// - `#[tagfill(skip)]` hides the field from the walker entirely.
///
/// Only `pub` fields are filled. Other fields are reported as hidden. Public
/// fields whose type does not implement `tagfill::Slot` (maps, `char`, ...) are
/// reported with kind `Other` and expose no value; a default on such a field
/// fails with `UnsupportedValue`.
///
/// Generic structs are rejected.
///
/// ```text
/// #[derive(Defaults)]
/// pub struct Server {
///     #[tagfill(default = "8080")]
///     pub port: u16,
///     #[tagfill(default = "30s", opt = "nonzero")]
///     pub timeout: std::time::Duration,
/// }
/// ```
#[proc_macro_derive(Defaults, attributes(tagfill))]
pub fn derive_defaults(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedRecord::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
