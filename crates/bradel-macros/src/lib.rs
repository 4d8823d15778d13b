//! Procedural macros for Bradel kind tags.
//!
//! This crate provides `#[derive(KindTag)]`, which implements
//! `bradel_core::KindTag` for fieldless enums.
//!
//! # Attributes
//!
//! ## `#[kind(raw = "...")]`
//!
//! Overrides the raw value of one variant. Variants without the attribute use
//! their own name as raw value:
//!
//! ```ignore
//! #[derive(Debug, Clone, PartialEq, Eq, Hash, KindTag)]
//! enum InboxKind {
//!     Thread,                      // raw value "Thread"
//!     #[kind(raw = "inbox.empty")]
//!     Empty,                       // raw value "inbox.empty"
//! }
//! ```
//!
//! The derive does not add `Hash` or `Eq`; derive those alongside it.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive `bradel_core::KindTag` for a fieldless enum.
///
/// # Example
///
/// ```ignore
/// use bradel_core::{AnyKind, KindTag};
/// use bradel_macros::KindTag;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, KindTag)]
/// enum ProfileKind {
///     Avatar,
///     #[kind(raw = "profile.name")]
///     Name,
/// }
///
/// assert_eq!(ProfileKind::Avatar.raw_value(), "Avatar");
/// assert_eq!(AnyKind::new(ProfileKind::Name), AnyKind::new("profile.name"));
/// ```
#[proc_macro_derive(KindTag, attributes(kind))]
pub fn derive_kind_tag(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_kind_tag(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn impl_derive_kind_tag(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "KindTag derive only supports enums",
            ));
        }
    };

    if variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "KindTag derive needs at least one variant",
        ));
    }

    let mut arms = Vec::with_capacity(variants.len());
    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "KindTag derive only supports fieldless variants",
            ));
        }
        let ident = &variant.ident;
        let raw = parse_raw_override(&variant.attrs)?.unwrap_or_else(|| ident.to_string());
        arms.push(quote! {
            #enum_name::#ident => #raw,
        });
    }

    Ok(quote! {
        impl #impl_generics bradel_core::kind::KindTag for #enum_name #ty_generics #where_clause {
            fn raw_value(&self) -> &str {
                match self {
                    #(#arms)*
                }
            }
        }
    })
}

/// Reads `#[kind(raw = "...")]` from a variant's attributes.
fn parse_raw_override(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut raw = None;

    for attr in attrs {
        if !attr.path().is_ident("kind") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("raw") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(meta.error("raw value must not be empty"));
                }
                raw = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported kind attribute, expected `raw`"))
            }
        })?;
    }

    Ok(raw)
}
