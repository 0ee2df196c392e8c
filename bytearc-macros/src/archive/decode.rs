//! Decode derive macro implementation.

use super::{
    ContainerAttrs, FieldInfo, FieldMode, bounded_generics, check_member_count,
    check_variant_count, collect_fields, struct_layout, tag_literal,
};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive the `Decode` trait for a struct or enum.
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = ContainerAttrs::parse(&input.attrs)?;
    let trait_path = quote! { ::bytearc::Decode };

    let (layout, decode_body, in_place_body, defaults) = match &input.data {
        Data::Struct(data) => {
            let fields = collect_fields(&data.fields)?;
            check_member_count(input, fields.len(), &attrs)?;
            let layout = struct_layout(&input.attrs, &fields, &trait_path);
            let (decode_body, in_place_body) =
                generate_struct(&data.fields, &fields, layout.is_some());
            (layout, decode_body, Some(in_place_body), default_bounds(&fields))
        }
        Data::Enum(data) => {
            if attrs.members.is_some() {
                return Err(syn::Error::new_spanned(
                    input,
                    "#[archive(members = N)] applies to structs only",
                ));
            }
            check_variant_count(input, data.variants.len())?;
            let (body, defaults) = generate_enum(data, &attrs)?;
            (None, body, None, defaults)
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Decode derive is not supported for unions.",
            ));
        }
    };

    let generics = bounded_generics(&input.generics, trait_path, &defaults);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let layout = layout.map(|layout| {
        quote! { const LAYOUT: ::bytearc::Layout<Self> = #layout; }
    });
    let in_place = in_place_body.map(|body| {
        quote! {
            fn decode_in_place(&mut self, reader: &mut ::bytearc::Reader<'_>) -> ::bytearc::Result<()> {
                #body
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::bytearc::Decode for #name #ty_generics #where_clause {
            #layout

            fn decode(reader: &mut ::bytearc::Reader<'_>) -> ::bytearc::Result<Self> {
                #decode_body
            }

            #in_place
        }
    })
}

/// `Default` predicates for fields that are decoded starting from a default.
fn default_bounds(fields: &[FieldInfo]) -> Vec<TokenStream2> {
    fields
        .iter()
        .filter(|f| !matches!(f.mode, FieldMode::Plain))
        .map(|f| {
            let ty = &f.ty;
            quote! { #ty: ::core::default::Default }
        })
        .collect()
}

/// `let` statement producing a fresh value of the field in its binding.
fn read_field(field: &FieldInfo) -> TokenStream2 {
    let binding = &field.binding;
    let ty = &field.ty;
    match field.mode {
        FieldMode::Skip => quote! {
            let #binding: #ty = ::core::default::Default::default();
        },
        FieldMode::Plain => quote! {
            let #binding = <#ty as ::bytearc::Decode>::decode(reader)?;
        },
        FieldMode::Prefixed(kind) => {
            let codec = kind.codec();
            quote! {
                let #binding = ::bytearc::seq::decode_prefixed::<#ty, #codec>(reader)?;
            }
        }
        FieldMode::Unsized => quote! {
            let mut #binding: #ty = ::core::default::Default::default();
            ::bytearc::seq::decode_unsized(&mut #binding, reader)?;
        },
    }
}

/// Statement decoding into the existing field reachable through `access`.
fn read_field_in_place(field: &FieldInfo, access: TokenStream2) -> TokenStream2 {
    match field.mode {
        FieldMode::Skip => quote! {},
        FieldMode::Plain => quote! {
            ::bytearc::Decode::decode_in_place(#access, reader)?;
        },
        FieldMode::Prefixed(kind) => {
            let codec = kind.codec();
            quote! {
                ::bytearc::seq::decode_prefixed_in_place::<_, #codec>(#access, reader)?;
            }
        }
        FieldMode::Unsized => quote! {
            ::bytearc::seq::decode_unsized(#access, reader)?;
        },
    }
}

/// Constructor expression from the fields' bindings.
fn construct(path: TokenStream2, shape: &Fields, fields: &[FieldInfo]) -> TokenStream2 {
    match shape {
        Fields::Unit => path,
        Fields::Unnamed(_) => {
            let bindings = fields.iter().map(|f| &f.binding);
            quote! { #path(#(#bindings),*) }
        }
        Fields::Named(_) => {
            let inits = fields.iter().map(|f| {
                let member = &f.member;
                let binding = &f.binding;
                quote! { #member: #binding }
            });
            quote! { #path { #(#inits),* } }
        }
    }
}

// =============================================================================
// Struct deserialization
// =============================================================================

fn generate_struct(
    shape: &Fields,
    fields: &[FieldInfo],
    dense: bool,
) -> (TokenStream2, TokenStream2) {
    let (fresh_dense, in_place_dense) = if dense {
        (
            quote! {
                if let ::core::option::Option::Some(result) = ::bytearc::layout::decode_dense::<Self>(reader) {
                    return result;
                }
            },
            quote! {
                if let ::core::option::Option::Some(result) = ::bytearc::layout::decode_dense_in_place(self, reader) {
                    return result;
                }
            },
        )
    } else {
        (quote! {}, quote! {})
    };

    let reads = fields.iter().map(read_field);
    let constructor = construct(quote! { Self }, shape, fields);
    let decode_body = quote! {
        #fresh_dense
        #(#reads)*
        ::core::result::Result::Ok(#constructor)
    };

    let in_place_reads = fields.iter().map(|f| {
        let member = &f.member;
        read_field_in_place(f, quote! { &mut self.#member })
    });
    let in_place_body = quote! {
        #in_place_dense
        #(#in_place_reads)*
        ::core::result::Result::Ok(())
    };

    (decode_body, in_place_body)
}

// =============================================================================
// Enum deserialization
// =============================================================================

/// The tag is validated before any variant is constructed, so a bad tag
/// leaves an in-place destination untouched.
fn generate_enum(
    data: &syn::DataEnum,
    attrs: &ContainerAttrs,
) -> syn::Result<(TokenStream2, Vec<TokenStream2>)> {
    let alternatives = data.variants.len();
    let mut arms = Vec::with_capacity(alternatives);
    let mut defaults = Vec::new();

    for (idx, variant) in data.variants.iter().enumerate() {
        let variant_name = &variant.ident;
        let tag = tag_literal(idx);
        let fields = collect_fields(&variant.fields)?;
        check_member_count(variant, fields.len(), attrs)?;
        defaults.extend(default_bounds(&fields));

        let reads = fields.iter().map(read_field);
        let constructor = construct(quote! { Self::#variant_name }, &variant.fields, &fields);
        arms.push(quote! {
            #tag => {
                #(#reads)*
                ::core::result::Result::Ok(#constructor)
            }
        });
    }

    let body = quote! {
        let tag = <u8 as ::bytearc::Decode>::decode(reader)?;
        match tag {
            #(#arms)*
            _ => ::core::result::Result::Err(::bytearc::Error::InvalidDiscriminant {
                tag,
                alternatives: #alternatives,
            }),
        }
    };
    Ok((body, defaults))
}
