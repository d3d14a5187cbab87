// Declaration errors reported by #[derive(Reflect)]
//
// Every variant becomes a spanned compile error, so a bad declaration is
// rejected before any instance of the type can be built.

use proc_macro2::Span;
use quote::ToTokens;

/// A problem with a `#[derive(Reflect)]` declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclError {
    /// More fields declared than the type's limit allows
    #[error(
        "`{ty}` declares {count} reflected fields, but at most {limit} are supported \
         (raise the limit with #[reflect(max_fields = N)])"
    )]
    TooManyFields {
        ty: String,
        count: usize,
        limit: usize,
    },

    /// `fields(...)` names a member the struct does not have
    #[error("`{ty}` has no member `{member}` to reflect")]
    UnknownMember { ty: String, member: String },

    /// The same member appears twice in `fields(...)`
    #[error("member `{member}` is listed more than once in #[reflect(fields(...))]")]
    DuplicateMember { member: String },

    /// Two declared fields end up with the same name
    #[error("`{ty}` declares the field name `{name}` more than once")]
    DuplicateName { ty: String, name: String },

    /// `#[reflect(skip)]` used together with an explicit field list
    #[error("#[reflect(skip)] cannot be combined with #[reflect(fields(...))] on `{ty}`")]
    SkipWithFieldList { ty: String },

    /// The derive target is an enum or a union
    #[error("Reflect can only be derived for structs, but `{ty}` is {kind}")]
    NotAStruct { ty: String, kind: &'static str },

    /// The derive target has lifetime parameters
    #[error("`{ty}` has lifetime parameters; reflected field values must be 'static")]
    LifetimeParam { ty: String },

    /// Unrecognized key inside `#[reflect(...)]`
    #[error("unknown reflect attribute `{key}`")]
    UnknownAttribute { key: String },
}

impl DeclError {
    /// Attach this error to the tokens that caused it.
    pub fn spanned(self, tokens: impl ToTokens) -> syn::Error {
        syn::Error::new_spanned(tokens, self)
    }

    /// Attach this error to a single span.
    pub fn at(self, span: Span) -> syn::Error {
        syn::Error::new(span, self)
    }
}
