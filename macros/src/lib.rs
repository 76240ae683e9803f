//! Procedural macros for the prospect property resolver.
//!
//! - `#[derive(Properties)]`: Implements `prospect::Properties` for a struct with
//!   named fields, exposing every field as a read/write property.
//!
//! Field attributes:
//! - `#[property(skip)]`: don't expose the field.
//! - `#[property(read_only)]`: expose a reader only.
//! - `#[property(write_only)]`: expose a writer only (never resolved into an accessor).
//! - `#[property(rename = "name")]`: expose the field under another name.
//!
//! Usage:
//! ```rust,ignore
//! use prospect::Properties;
//!
//! #[derive(Clone, Debug, Properties)]
//! struct Account {
//!     owner: String,
//!     #[property(read_only)]
//!     id: u64,
//!     #[property(skip)]
//!     cache: Vec<u8>,
//! }
//! ```
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, Ident, LitStr, Type, parse_macro_input, spanned::Spanned,
};

#[proc_macro_derive(Properties, attributes(property))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "Properties can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "Properties can only be derived for structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    for field in fields {
        let options = FieldOptions::parse(field)?;
        if options.skip {
            continue;
        }
        let Some(field_ident) = &field.ident else {
            return Err(syn::Error::new(field.span(), "expected a named field"));
        };
        descriptors.push(descriptor(field_ident, &field.ty, &options));
    }

    Ok(quote! {
        impl #impl_generics ::prospect::Properties for #ident #ty_generics #where_clause {
            fn properties() -> ::std::vec::Vec<::prospect::PropertyDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

fn descriptor(
    field_ident: &Ident,
    field_ty: &Type,
    options: &FieldOptions,
) -> proc_macro2::TokenStream {
    let name = options
        .rename
        .clone()
        .unwrap_or_else(|| field_ident.to_string());

    let reader = (!options.write_only).then(|| {
        quote! {
            .reader(|this: &Self| ::std::clone::Clone::clone(&this.#field_ident))
        }
    });
    let writer = (!options.read_only).then(|| {
        quote! {
            .writer(|this: &mut Self, value: #field_ty| this.#field_ident = value)
        }
    });

    quote! {
        ::prospect::PropertyDescriptor::new(#name) #reader #writer
    }
}

#[derive(Default)]
struct FieldOptions {
    skip: bool,
    read_only: bool,
    write_only: bool,
    rename: Option<String>,
}

impl FieldOptions {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut options = FieldOptions::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("property")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                } else if meta.path.is_ident("read_only") {
                    options.read_only = true;
                } else if meta.path.is_ident("write_only") {
                    options.write_only = true;
                } else if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    options.rename = Some(name.value());
                } else {
                    return Err(meta.error("unsupported property attribute"));
                }
                Ok(())
            })?;
        }

        if options.read_only && options.write_only {
            return Err(syn::Error::new(
                field.span(),
                "a property can't be both read_only and write_only",
            ));
        }
        Ok(options)
    }
}
