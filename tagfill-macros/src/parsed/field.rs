#[allow(unused_imports)]
use super::*;

pub(crate) struct ParsedField {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) ty: Type,
    pub(crate) exported: bool,
    pub(crate) default: Option<String>,
    pub(crate) options: Option<String>,
    pub(crate) skip: bool,
}

impl ParsedField {
    pub(crate) fn from_field(field: &Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "Defaults requires named fields"))?;
        let name = ident.to_string();

        let mut default = None;
        let mut options = None;
        let mut skip = false;

        for attr in &field.attrs {
            if attr.path().is_ident("tagfill") {
                Self::parse_field_attr(attr, &mut default, &mut options, &mut skip)?;
            }
        }

        if skip && default.is_some() {
            return Err(Error::new(
                ident.span(),
                "#[tagfill(skip)] cannot be combined with a default",
            ));
        }
        if options.is_some() && default.is_none() {
            return Err(Error::new(
                ident.span(),
                "#[tagfill(opt = ...)] requires #[tagfill(default = ...)] on the same field",
            ));
        }

        Ok(Self {
            ident,
            name,
            ty: field.ty.clone(),
            exported: matches!(field.vis, Visibility::Public(_)),
            default,
            options,
            skip,
        })
    }

    fn parse_field_attr(
        attr: &Attribute,
        default: &mut Option<String>,
        options: &mut Option<String>,
        skip: &mut bool,
    ) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if default.is_some() {
                    return Err(meta.error("duplicate `default` for this field"));
                }
                let value: LitStr = meta.value()?.parse()?;
                *default = Some(value.value());
            } else if meta.path.is_ident("opt") {
                if options.is_some() {
                    return Err(meta.error("duplicate `opt` for this field"));
                }
                let value: LitStr = meta.value()?.parse()?;
                *options = Some(value.value());
            } else if meta.path.is_ident("skip") {
                *skip = true;
            } else {
                return Err(meta.error("unknown tagfill attribute, expected default, opt, or skip"));
            }
            Ok(())
        })
    }

    /// Whether the walker may read and write the field's value.
    pub(crate) fn accessible(&self) -> bool {
        self.exported && !self.skip
    }

    pub(crate) fn emit_info(&self) -> TokenStream2 {
        let name = &self.name;
        let ty = &self.ty;
        let accessible = self.accessible();

        let kind = if accessible {
            quote! { (&::tagfill::macros::FieldAccess::<#ty>::new()).kind() }
        } else {
            quote! { ::tagfill::TypeKind::Other }
        };
        let visibility = if accessible {
            quote! { ::tagfill::Visibility::Exported }
        } else {
            quote! { ::tagfill::Visibility::Hidden }
        };
        let default = optional_str(self.default.as_deref());
        let options = optional_str(self.options.as_deref());

        quote! {
            ::tagfill::FieldInfo {
                name: #name,
                kind: #kind,
                visibility: #visibility,
                writable: #accessible,
                default: #default,
                options: #options,
            }
        }
    }
}

fn optional_str(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn parse(input: DeriveInput) -> Result<Vec<ParsedField>> {
        let Data::Struct(data) = input.data else {
            unreachable!("test inputs are structs");
        };
        data.fields.iter().map(ParsedField::from_field).collect()
    }

    fn error(input: DeriveInput) -> String {
        match parse(input) {
            Ok(_) => panic!("expected an error"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn reads_default_and_options() {
        let fields = parse(parse_quote! {
            struct Example {
                #[tagfill(default = "23", opt = "nonzero")]
                pub age: u32,
                #[tagfill(default = "hidden")]
                name: String,
                pub plain: u8,
            }
        })
        .unwrap();

        assert_eq!(fields[0].default.as_deref(), Some("23"));
        assert_eq!(fields[0].options.as_deref(), Some("nonzero"));
        assert!(fields[0].accessible());
        assert!(!fields[1].exported);
        assert!(!fields[1].accessible());
        assert_eq!(fields[2].default, None);
    }

    #[test]
    fn attributes_may_be_split() {
        let fields = parse(parse_quote! {
            struct Example {
                #[tagfill(default = "1")]
                #[tagfill(opt = "nonzero")]
                pub count: u8,
            }
        })
        .unwrap();
        assert_eq!(fields[0].options.as_deref(), Some("nonzero"));
    }

    #[test]
    fn crate_visibility_is_hidden() {
        let fields = parse(parse_quote! {
            struct Example {
                pub(crate) count: u8,
            }
        })
        .unwrap();
        assert!(!fields[0].exported);
    }

    #[test]
    fn skipped_fields_are_not_accessible() {
        let fields = parse(parse_quote! {
            struct Example {
                #[tagfill(skip)]
                pub cache: Vec<u8>,
            }
        })
        .unwrap();
        assert!(fields[0].skip);
        assert!(!fields[0].accessible());
    }

    #[test]
    fn rejects_unknown_keys() {
        let message = error(parse_quote! {
            struct Example {
                #[tagfill(value = "1")]
                pub count: u8,
            }
        });
        assert!(message.contains("unknown tagfill attribute"));
    }

    #[test]
    fn rejects_duplicates() {
        let message = error(parse_quote! {
            struct Example {
                #[tagfill(default = "1")]
                #[tagfill(default = "2")]
                pub count: u8,
            }
        });
        assert!(message.contains("duplicate `default`"));

        let message = error(parse_quote! {
            struct Example {
                #[tagfill(default = "1", opt = "nonzero", opt = "nonzero")]
                pub count: u8,
            }
        });
        assert!(message.contains("duplicate `opt`"));
    }

    #[test]
    fn rejects_inconsistent_combinations() {
        let message = error(parse_quote! {
            struct Example {
                #[tagfill(skip, default = "1")]
                pub count: u8,
            }
        });
        assert!(message.contains("cannot be combined"));

        let message = error(parse_quote! {
            struct Example {
                #[tagfill(opt = "nonzero")]
                pub count: u8,
            }
        });
        assert!(message.contains("requires #[tagfill(default"));
    }
}
