#[allow(unused_imports)]
use super::*;

pub(crate) struct ParsedRecord {
    name: Ident,
    fields: Vec<ParsedField>,
}

impl ParsedRecord {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        if let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident("tagfill")) {
            return Err(Error::new_spanned(
                attr,
                "#[tagfill(...)] is only supported on fields",
            ));
        }
        // Generated code names the type as `impl Name`, so parameters have nowhere to go.
        if !input.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &input.generics,
                "Defaults cannot be derived for generic structs",
            ));
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let mut parsed = Vec::new();
                    for field in &named.named {
                        parsed.push(ParsedField::from_field(field)?);
                    }
                    parsed
                }
                _ => return Err(Error::new(input.ident.span(), "Defaults requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "Defaults can only be derived for structs")),
        };

        Ok(Self {
            name: input.ident.clone(),
            fields,
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let record_impl = self.emit_record_impl();
        let slot_impl = self.emit_slot_impl();
        quote! {
            #record_impl
            #slot_impl
        }
    }

    fn emit_record_impl(&self) -> TokenStream2 {
        let name = &self.name;
        let name_str = name.to_string();
        let count = self.fields.len();

        let info_arms = self.fields.iter().enumerate().map(|(index, field)| {
            let info = field.emit_info();
            quote! { #index => ::core::option::Option::Some(#info), }
        });

        let accessible: Vec<(usize, &ParsedField)> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.accessible())
            .collect();
        let field_arms = accessible.iter().map(|(index, field)| {
            let ident = &field.ident;
            let ty = &field.ty;
            quote! { #index => (&::tagfill::macros::FieldAccess::<#ty>::new()).slot(&self.#ident), }
        });
        let field_mut_arms = accessible.iter().map(|(index, field)| {
            let ident = &field.ident;
            let ty = &field.ty;
            quote! { #index => (&::tagfill::macros::FieldAccess::<#ty>::new()).slot_mut(&mut self.#ident), }
        });

        quote! {
            impl ::tagfill::Record for #name {
                fn type_name(&self) -> &str {
                    #name_str
                }

                fn field_count(&self) -> usize {
                    #count
                }

                fn field_info(&self, index: usize) -> ::core::option::Option<::tagfill::FieldInfo<'_>> {
                    #[allow(unused_imports)]
                    use ::tagfill::macros::{ViaOther as _, ViaSlot as _};
                    match index {
                        #(#info_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn field(&self, index: usize) -> ::core::option::Option<&dyn ::tagfill::Slot> {
                    #[allow(unused_imports)]
                    use ::tagfill::macros::{ViaOther as _, ViaSlot as _};
                    match index {
                        #(#field_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn ::tagfill::Slot> {
                    #[allow(unused_imports)]
                    use ::tagfill::macros::{ViaOther as _, ViaSlot as _};
                    match index {
                        #(#field_mut_arms)*
                        _ => ::core::option::Option::None,
                    }
                }
            }
        }
    }

    fn emit_slot_impl(&self) -> TokenStream2 {
        let name = &self.name;
        let name_str = name.to_string();

        quote! {
            impl ::tagfill::Slot for #name {
                fn declared_kind() -> ::tagfill::TypeKind {
                    ::tagfill::TypeKind::Struct
                }

                fn kind(&self) -> ::tagfill::TypeKind {
                    ::tagfill::TypeKind::Struct
                }

                fn is_zero(&self) -> bool {
                    ::tagfill::record_is_zero(self)
                }

                fn assign(&mut self, _value: ::tagfill::DecodedValue) -> ::tagfill::Result<()> {
                    ::core::result::Result::Err(::tagfill::FillError::UnsupportedValue {
                        name: ::std::string::ToString::to_string(#name_str),
                    })
                }

                fn from_decoded(_value: ::tagfill::DecodedValue) -> ::tagfill::Result<Self> {
                    ::core::result::Result::Err(::tagfill::FillError::UnsupportedValue {
                        name: ::std::string::ToString::to_string(#name_str),
                    })
                }

                fn resolve(&self) -> ::tagfill::Resolved<'_> {
                    ::tagfill::Resolved::Record(self)
                }

                fn resolve_mut(&mut self) -> ::tagfill::ResolvedMut<'_> {
                    ::tagfill::ResolvedMut::Record(self)
                }
            }
        }
    }
}
