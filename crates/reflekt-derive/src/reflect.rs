// #[derive(Reflect)] implementation
//
// Emits the static field table for a struct: one hidden marker type per
// declared field (implementing FieldDecl), ordinal lookup through HasField<N>,
// and the Reflect/Member impls that drive traversal.

use std::collections::HashSet;

use proc_macro2::{Literal, TokenStream, TokenTree};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericParam, Ident, LitStr, Member, Result, Type};

use crate::attrs::{self, ContainerAttrs};
use crate::error::DeclError;

/// One field that made it into the declaration.
struct Declared<'a> {
    member: Member,
    name: String,
    name_span: proc_macro2::Span,
    ty: &'a Type,
}

fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.unraw().to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

/// Resolves which fields are exposed, in declared order.
fn select_fields<'a>(
    ty_name: &str,
    fields: &'a Fields,
    container: &ContainerAttrs,
) -> Result<Vec<Declared<'a>>> {
    let mut available = Vec::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(syn::Index {
                index: i as u32,
                span: proc_macro2::Span::call_site(),
            }),
        };
        let field_attrs = attrs::parse_field(&field.attrs)?;
        available.push((member, field, field_attrs));
    }

    let picked: Vec<usize> = match &container.fields {
        Some(list) => {
            if let Some((_, field, _)) = available.iter().find(|(_, _, a)| a.skip.is_some()) {
                return Err(DeclError::SkipWithFieldList {
                    ty: ty_name.to_string(),
                }
                .spanned(field));
            }

            let mut seen = HashSet::new();
            let mut picked = Vec::with_capacity(list.len());
            for wanted in list {
                let pos = available
                    .iter()
                    .position(|(member, _, _)| member == wanted)
                    .ok_or_else(|| {
                        DeclError::UnknownMember {
                            ty: ty_name.to_string(),
                            member: member_name(wanted),
                        }
                        .spanned(wanted)
                    })?;
                if !seen.insert(pos) {
                    return Err(DeclError::DuplicateMember {
                        member: member_name(wanted),
                    }
                    .spanned(wanted));
                }
                picked.push(pos);
            }
            picked
        }
        None => available
            .iter()
            .enumerate()
            .filter(|(_, (_, _, a))| a.skip.is_none())
            .map(|(pos, _)| pos)
            .collect(),
    };

    let mut names = HashSet::new();
    let mut declared = Vec::with_capacity(picked.len());
    for pos in picked {
        let (member, field, field_attrs) = &available[pos];
        let (name, name_span) = match &field_attrs.rename {
            Some(lit) => (lit.value(), lit.span()),
            None => (member_name(member), syn::spanned::Spanned::span(&field.ty)),
        };
        if !names.insert(name.clone()) {
            return Err(DeclError::DuplicateName {
                ty: ty_name.to_string(),
                name,
            }
            .spanned(field));
        }
        declared.push(Declared {
            member: member.clone(),
            name,
            name_span,
            ty: &field.ty,
        });
    }

    Ok(declared)
}

/// True if any identifier in `tokens` is one of `params`.
fn mentions(tokens: TokenStream, params: &[Ident]) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(ident) => params.contains(&ident),
        TokenTree::Group(group) => mentions(group.stream(), params),
        _ => false,
    })
}

/// Expands the #[derive(Reflect)] macro.
///
/// Example expansion (abridged):
/// ```ignore
/// // Input:
/// #[derive(Reflect)]
/// #[reflect(fields(y, x))]
/// struct Point { x: f32, y: f32, cache: Vec<u8> }
///
/// // Output:
/// const _: () = {
///     struct __Field0;
///     impl FieldDecl for __Field0 {
///         type Record = Point;
///         type Value = f32;
///         const INDEX: usize = 0;
///         const NAME: &'static str = "y";
///         fn get(record: &Point) -> &f32 { &record.y }
///         fn get_mut(record: &mut Point) -> &mut f32 { &mut record.y }
///     }
///     impl HasField<0> for Point { type Decl = __Field0; }
///     // ... __Field1 for `x` ...
///     impl Reflect for Point { const FIELD_COUNT: usize = 2; /* walk_fields */ }
///     impl Member for Point { const REFLECTABLE: bool = true; /* descend */ }
/// };
/// ```
pub fn expand_reflect(input: DeriveInput) -> Result<TokenStream> {
    let ident = &input.ident;
    let ty_name = ident.unraw().to_string();

    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(DeclError::NotAStruct {
                ty: ty_name,
                kind: "an enum",
            }
            .spanned(data.enum_token));
        }
        Data::Union(data) => {
            return Err(DeclError::NotAStruct {
                ty: ty_name,
                kind: "a union",
            }
            .spanned(data.union_token));
        }
    };

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(DeclError::LifetimeParam { ty: ty_name }.spanned(lifetime));
    }

    let container = attrs::parse_container(&input.attrs)?;
    let declared = select_fields(&ty_name, &data.fields, &container)?;

    let limit = container.limit();
    if declared.len() > limit {
        let err = DeclError::TooManyFields {
            ty: ty_name,
            count: declared.len(),
            limit,
        };
        // Point at `max_fields = N` when the type set its own limit.
        return Err(match container.max_fields {
            Some((_, span)) => err.at(span),
            None => err.spanned(ident),
        });
    }

    let krate = container.krate();

    // Bounds: every type parameter is 'static, and every declared field type
    // that mentions a parameter must itself be a Member.
    let type_params: Vec<Ident> = input
        .generics
        .type_params()
        .map(|p| p.ident.clone())
        .collect();
    let generic_names: Vec<Ident> = input
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(t.ident.clone()),
            GenericParam::Const(c) => Some(c.ident.clone()),
            GenericParam::Lifetime(_) => None,
        })
        .collect();

    let mut generics = input.generics.clone();
    {
        let where_clause = generics.make_where_clause();
        for param in &type_params {
            where_clause.predicates.push(syn::parse_quote!(#param: 'static));
        }
        for field in &declared {
            let ty = field.ty;
            if mentions(quote!(#ty), &generic_names) {
                where_clause
                    .predicates
                    .push(syn::parse_quote!(#ty: #krate::Member));
            }
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Marker types carry the record's generics, unbounded, and its visibility.
    let vis = &input.vis;
    let marker_params: Vec<TokenStream> = input
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => {
                let id = &t.ident;
                Some(quote!(#id: ?::core::marker::Sized))
            }
            GenericParam::Const(c) => {
                let id = &c.ident;
                let ty = &c.ty;
                Some(quote!(const #id: #ty))
            }
            GenericParam::Lifetime(_) => None,
        })
        .collect();
    let marker_body = if type_params.is_empty() {
        quote!(;)
    } else {
        quote!((::core::marker::PhantomData<fn() -> (#(*const #type_params,)*)>);)
    };

    let markers: Vec<Ident> = (0..declared.len())
        .map(|i| format_ident!("__Field{}", i))
        .collect();

    let field_decls = declared.iter().zip(&markers).enumerate().map(|(index, (field, marker))| {
        let member = &field.member;
        let ty = field.ty;
        let name = LitStr::new(&field.name, field.name_span);
        let ordinal = Literal::usize_unsuffixed(index);
        quote! {
            #[doc(hidden)]
            #vis struct #marker <#(#marker_params),*> #marker_body

            #[automatically_derived]
            impl #impl_generics #krate::FieldDecl for #marker #ty_generics #where_clause {
                type Record = #ident #ty_generics;
                type Value = #ty;
                const INDEX: usize = #ordinal;
                const NAME: &'static str = #name;

                #[inline]
                fn get(record: &Self::Record) -> &Self::Value {
                    &record.#member
                }

                #[inline]
                fn get_mut(record: &mut Self::Record) -> &mut Self::Value {
                    &mut record.#member
                }
            }

            #[automatically_derived]
            impl #impl_generics #krate::HasField<#ordinal> for #ident #ty_generics #where_clause {
                type Decl = #marker #ty_generics;
            }
        }
    });

    let count = declared.len();
    let names = declared.iter().map(|f| LitStr::new(&f.name, f.name_span));

    let expanded = quote! {
        const _: () = {
            #(#field_decls)*

            #[automatically_derived]
            impl #impl_generics #krate::Reflect for #ident #ty_generics #where_clause {
                const FIELD_COUNT: usize = #count;
                const FIELD_NAMES: &'static [&'static str] = &[#(#names),*];

                #[inline]
                #[allow(unused_variables)]
                fn walk_fields<__V: #krate::Visitor>(&self, visitor: &mut __V) {
                    #(#krate::__private::walk_field::<#markers #ty_generics, __V>(self, visitor);)*
                }

                #[inline]
                #[allow(unused_variables)]
                fn walk_fields_mut<__V: #krate::VisitorMut>(&mut self, visitor: &mut __V) {
                    #(#krate::__private::walk_field_mut::<#markers #ty_generics, __V>(self, visitor);)*
                }
            }

            #[automatically_derived]
            impl #impl_generics #krate::Member for #ident #ty_generics #where_clause {
                const REFLECTABLE: bool = true;

                #[inline]
                fn accept<__F, __V>(field: #krate::Field<'_, __F>, visitor: &mut __V)
                where
                    __F: #krate::FieldDecl<Value = Self>,
                    __V: #krate::Visitor,
                {
                    #krate::__private::descend(field.get(), visitor)
                }

                #[inline]
                fn accept_mut<__F, __V>(field: #krate::FieldMut<'_, __F>, visitor: &mut __V)
                where
                    __F: #krate::FieldDecl<Value = Self>,
                    __V: #krate::VisitorMut,
                {
                    #krate::__private::descend_mut(field.into_mut(), visitor)
                }
            }
        };
    };

    Ok(expanded)
}
