//! Derive macros for bytearc.

mod decode;
mod encode;

pub use decode::derive_decode;
pub use encode::derive_encode;

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{Attribute, DeriveInput, Fields, Generics, Ident, Member, Type, parse_quote};

/// Default ceiling on the number of fields; mirrors `bytearc::members::MAX_MEMBERS`.
const MAX_MEMBERS: usize = 50;

/// Sum types carry a one-byte tag.
const MAX_VARIANTS: usize = 255;

/// `#[archive(...)]` on the type itself.
#[derive(Default)]
pub struct ContainerAttrs {
    pub members: Option<usize>,
    pub max_members: Option<usize>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("archive")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("members") {
                    let lit: syn::LitInt = meta.value()?.parse()?;
                    out.members = Some(lit.base10_parse()?);
                    Ok(())
                } else if meta.path.is_ident("max_members") {
                    let lit: syn::LitInt = meta.value()?.parse()?;
                    out.max_members = Some(lit.base10_parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `members = N` or `max_members = N`"))
                }
            })?;
        }
        Ok(out)
    }
}

/// Length codec selected by `#[archive(size = ...)]`.
#[derive(Clone, Copy)]
pub enum LenKind {
    U8,
    U16,
    U32,
    U64,
    Varint,
}

impl LenKind {
    pub fn codec(self) -> TokenStream2 {
        match self {
            Self::U8 => quote! { ::bytearc::seq::U8Len },
            Self::U16 => quote! { ::bytearc::seq::U16Len },
            Self::U32 => quote! { ::bytearc::seq::U32Len },
            Self::U64 => quote! { ::bytearc::seq::U64Len },
            Self::Varint => quote! { ::bytearc::seq::VarLen },
        }
    }
}

/// How a field is put on the wire.
#[derive(Clone, Copy)]
pub enum FieldMode {
    Plain,
    Skip,
    Prefixed(LenKind),
    Unsized,
}

impl FieldMode {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut mode = Self::Plain;
        for attr in attrs.iter().filter(|a| a.path().is_ident("archive")) {
            attr.parse_nested_meta(|meta| {
                if !matches!(mode, Self::Plain) {
                    return Err(meta.error("only one of `skip`, `size` and `unsized` may be given"));
                }
                if meta.path.is_ident("skip") {
                    mode = Self::Skip;
                } else if meta.path.is_ident("unsized") {
                    mode = Self::Unsized;
                } else if meta.path.is_ident("size") {
                    let ident: Ident = meta.value()?.parse()?;
                    let kind = match ident.to_string().as_str() {
                        "u8" => LenKind::U8,
                        "u16" => LenKind::U16,
                        "u32" => LenKind::U32,
                        "u64" => LenKind::U64,
                        "varint" => LenKind::Varint,
                        _ => {
                            return Err(syn::Error::new_spanned(
                                ident,
                                "expected one of u8, u16, u32, u64, varint",
                            ));
                        }
                    };
                    mode = Self::Prefixed(kind);
                } else {
                    return Err(meta.error("expected `skip`, `size = ...` or `unsized`"));
                }
                Ok(())
            })?;
        }
        Ok(mode)
    }
}

/// One field of a struct or variant.
pub struct FieldInfo {
    pub member: Member,
    pub binding: Ident,
    pub ty: Type,
    pub mode: FieldMode,
}

pub fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo>> {
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let member = match &f.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(i.into()),
            };
            Ok(FieldInfo {
                member,
                binding: format_ident!("__field_{}", i),
                ty: f.ty.clone(),
                mode: FieldMode::parse(&f.attrs)?,
            })
        })
        .collect()
}

/// Enforce the field-count ceiling and any `#[archive(members = N)]`.
pub fn check_member_count(
    span: &impl quote::ToTokens,
    count: usize,
    attrs: &ContainerAttrs,
) -> syn::Result<()> {
    if let Some(declared) = attrs.members {
        if declared != count {
            return Err(syn::Error::new_spanned(
                span,
                format!("#[archive(members = {declared})] but the type has {count} fields"),
            ));
        }
    }
    let max = attrs.max_members.unwrap_or(MAX_MEMBERS);
    if count > max {
        return Err(syn::Error::new_spanned(
            span,
            format!(
                "type has {count} fields, more than the maximum of {max}. \
                 Raise it with #[archive(max_members = N)]."
            ),
        ));
    }
    Ok(())
}

pub fn check_variant_count(input: &DeriveInput, count: usize) -> syn::Result<()> {
    if count > MAX_VARIANTS {
        return Err(syn::Error::new_spanned(
            input,
            format!("enum has {count} variants but a one-byte tag supports at most {MAX_VARIANTS}"),
        ));
    }
    Ok(())
}

/// Whether the type's fields are laid out in declaration order.
pub fn has_ordered_repr(attrs: &[Attribute]) -> bool {
    attrs.iter().filter(|a| a.path().is_ident("repr")).any(|attr| {
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("C") || meta.path.is_ident("transparent") {
                found = true;
            }
            if meta.input.peek(syn::token::Paren) {
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        });
        found
    })
}

/// Add `bound` to every type parameter, plus `extra` predicates.
pub fn bounded_generics(
    generics: &Generics,
    bound: TokenStream2,
    extra: &[TokenStream2],
) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause.predicates.push(parse_quote! { #param: #bound });
    }
    for predicate in extra {
        where_clause.predicates.push(parse_quote! { #predicate });
    }
    generics
}

/// Tag literal for variant `idx`.
pub fn tag_literal(idx: usize) -> syn::LitInt {
    syn::LitInt::new(&format!("{idx}u8"), Span::call_site())
}

/// Layout expression for a struct, or `None` when it is always opaque.
pub fn struct_layout(
    attrs: &[Attribute],
    fields: &[FieldInfo],
    trait_path: &TokenStream2,
) -> Option<TokenStream2> {
    if !has_ordered_repr(attrs) || fields.iter().any(|f| !matches!(f.mode, FieldMode::Plain)) {
        return None;
    }
    let tys = fields.iter().map(|f| &f.ty);
    Some(quote! {
        // SAFETY: the fields are listed in declaration order and the
        // representation keeps that order.
        unsafe {
            ::bytearc::Layout::aggregate(&[
                #(<#tys as #trait_path>::LAYOUT.field()),*
            ])
        }
    })
}
