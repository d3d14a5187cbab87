// #[reflect(...)] attribute parsing
//
// Container keys: fields(...), max_fields = N, crate = "path"
// Field keys:     skip, rename = "name"

use proc_macro2::Span;
use syn::{punctuated::Punctuated, spanned::Spanned, Attribute, LitInt, LitStr, Member, Token};

use crate::error::DeclError;

/// Default ceiling on declared fields per type.
///
/// Must equal `reflekt::DEFAULT_MAX_FIELDS`; proc-macro crates cannot export
/// constants, so the runtime crate keeps its own copy.
pub const DEFAULT_MAX_FIELDS: usize = 32;

/// Options set on the struct itself.
pub struct ContainerAttrs {
    /// Explicit, ordered member list from `fields(...)`
    pub fields: Option<Vec<Member>>,
    /// Per-type field limit and the span of the literal that set it
    pub max_fields: Option<(usize, Span)>,
    /// Path of the runtime crate used by generated code
    pub krate: Option<syn::Path>,
}

impl ContainerAttrs {
    pub fn limit(&self) -> usize {
        self.max_fields
            .map(|(limit, _)| limit)
            .unwrap_or(DEFAULT_MAX_FIELDS)
    }

    pub fn krate(&self) -> syn::Path {
        self.krate
            .clone()
            .unwrap_or_else(|| syn::parse_quote!(::reflekt))
    }
}

/// Options set on one field.
#[derive(Default)]
pub struct FieldAttrs {
    pub skip: Option<Span>,
    pub rename: Option<LitStr>,
}

fn unknown(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Error {
    let path = &meta.path;
    let key = path
        .get_ident()
        .map(|ident| ident.to_string())
        .unwrap_or_else(|| quote::quote!(#path).to_string());
    DeclError::UnknownAttribute { key }.spanned(path)
}

pub fn parse_container(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs {
        fields: None,
        max_fields: None,
        krate: None,
    };

    for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("fields") {
                let content;
                syn::parenthesized!(content in meta.input);
                let list = Punctuated::<Member, Token![,]>::parse_terminated(&content)?;
                out.fields = Some(list.into_iter().collect());
                Ok(())
            } else if meta.path.is_ident("max_fields") {
                let lit: LitInt = meta.value()?.parse()?;
                out.max_fields = Some((lit.base10_parse()?, lit.span()));
                Ok(())
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                out.krate = Some(lit.parse()?);
                Ok(())
            } else {
                Err(unknown(&meta))
            }
        })?;
    }

    Ok(out)
}

pub fn parse_field(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                out.skip = Some(meta.path.span());
                Ok(())
            } else if meta.path.is_ident("rename") {
                out.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(unknown(&meta))
            }
        })?;
    }

    Ok(out)
}
