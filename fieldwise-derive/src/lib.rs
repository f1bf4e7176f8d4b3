//! # Fieldwise Derive Macros
//!
//! This crate provides the procedural macro for `fieldwise`. It builds a type's property
//! list from its named fields and marks the type as a composite.
//!
//! Compatible with `syn 2.0`.

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derives `Classified` (as a composite) and `Serializable`.
///
/// Fields are listed in source order. Supported field attributes:
///
/// * `#[fieldwise(rename = "name")]`: store the field under `name`.
/// * `#[fieldwise(skip)]`: leave the field out of the property list.
#[proc_macro_derive(Serializable, attributes(fieldwise))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(ds) => match &ds.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return syn::Error::new(
                    name.span(),
                    "Serializable only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(name.span(), "Serializable only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut listed: Vec<ListedField> = Vec::new();

    for field in fields {
        let attrs = match parse_attributes(&field.attrs) {
            Ok(res) => res,
            Err(e) => return e.to_compile_error().into(),
        };
        if attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let key = attrs
            .rename
            .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));

        // Two fields under one key would overwrite each other on store.
        if let Some(previous) = listed.iter().find(|f| f.key.value() == key.value()) {
            let mut err = syn::Error::new(
                key.span(),
                format!("duplicate property name \"{}\"", key.value()),
            );
            err.combine(syn::Error::new(
                previous.key.span(),
                "first declared here",
            ));
            return err.to_compile_error().into();
        }

        listed.push(ListedField {
            ident,
            ty: field.ty.clone(),
            key,
        });
    }

    let impl_classified = generate_classified(&input);
    let impl_serializable = generate_serializable(&input, &listed);

    let expanded = quote! {
        #impl_classified
        #impl_serializable
    };

    TokenStream::from(expanded)
}

struct ListedField {
    ident: syn::Ident,
    ty: syn::Type,
    key: LitStr,
}

#[derive(Default)]
struct FieldAttributes {
    skip: bool,
    rename: Option<LitStr>,
}

fn parse_attributes(attrs: &[Attribute]) -> syn::Result<FieldAttributes> {
    let mut parsed = FieldAttributes::default();

    for attr in attrs {
        if attr.path().is_ident("fieldwise") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    return Ok(());
                }

                if meta.path.is_ident("rename") {
                    let s: LitStr = meta.value()?.parse()?;
                    if s.value().is_empty() {
                        return Err(meta.error("property name cannot be empty"));
                    }
                    parsed.rename = Some(s);
                    return Ok(());
                }
                Err(meta.error("Unknown fieldwise attribute key. Supported: rename, skip"))
            })?;
        }
    }
    Ok(parsed)
}

// --- Generator: Classified ---

fn generate_classified(input: &DeriveInput) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::fieldwise::Classified for #name #ty_generics #where_clause {
            type Kind = ::fieldwise::CompositeKind;
        }
    }
}

// --- Generator: Serializable ---

fn generate_serializable(input: &DeriveInput, listed: &[ListedField]) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let property_types = listed.iter().map(|f| {
        let ty = &f.ty;
        quote! { ::fieldwise::Property<Self, #ty> }
    });

    let property_values = listed.iter().map(|f| {
        let ident = &f.ident;
        let key = &f.key;
        quote! {
            ::fieldwise::Property::new(
                #key,
                |this| &this.#ident,
                |this, value| this.#ident = value,
            )
        }
    });

    quote! {
        impl #impl_generics ::fieldwise::Serializable for #name #ty_generics #where_clause {
            type Properties = ( #(#property_types,)* );
            const PROPERTIES: Self::Properties = ( #(#property_values,)* );
            const NAMES_CHECKED: bool = true;
        }
    }
}
