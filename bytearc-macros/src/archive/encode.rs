//! Encode derive macro implementation.

use super::{
    ContainerAttrs, FieldInfo, FieldMode, bounded_generics, check_member_count,
    check_variant_count, collect_fields, struct_layout, tag_literal,
};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive the `Encode` trait for a struct or enum.
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = ContainerAttrs::parse(&input.attrs)?;
    let trait_path = quote! { ::bytearc::Encode };
    let generics = bounded_generics(&input.generics, trait_path.clone(), &[]);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (layout, body) = match &input.data {
        Data::Struct(data) => {
            let fields = collect_fields(&data.fields)?;
            check_member_count(input, fields.len(), &attrs)?;
            let layout = struct_layout(&input.attrs, &fields, &trait_path);
            let dense = layout.as_ref().map(|_| {
                quote! {
                    if let ::core::option::Option::Some(result) = ::bytearc::layout::encode_dense(self, writer) {
                        return result;
                    }
                }
            });
            let writes = fields.iter().map(|f| {
                let member = &f.member;
                write_field(f, quote! { &self.#member })
            });
            let body = quote! {
                #dense
                #(#writes)*
                ::core::result::Result::Ok(())
            };
            (layout, body)
        }
        Data::Enum(data) => {
            if attrs.members.is_some() {
                return Err(syn::Error::new_spanned(
                    input,
                    "#[archive(members = N)] applies to structs only",
                ));
            }
            check_variant_count(input, data.variants.len())?;
            (None, generate_enum(data, &attrs)?)
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Encode derive is not supported for unions.",
            ));
        }
    };

    let layout = layout.map(|layout| {
        quote! { const LAYOUT: ::bytearc::Layout<Self> = #layout; }
    });

    Ok(quote! {
        impl #impl_generics ::bytearc::Encode for #name #ty_generics #where_clause {
            #layout

            fn encode(&self, writer: &mut ::bytearc::Writer<'_>) -> ::bytearc::Result<()> {
                #body
            }
        }
    })
}

/// Statement encoding one field reachable through `access`, a `&T` expression.
fn write_field(field: &FieldInfo, access: TokenStream2) -> TokenStream2 {
    match field.mode {
        FieldMode::Skip => quote! {},
        FieldMode::Plain => quote! {
            ::bytearc::Encode::encode(#access, writer)?;
        },
        FieldMode::Prefixed(kind) => {
            let codec = kind.codec();
            quote! {
                ::bytearc::seq::encode_prefixed::<_, #codec>(#access, writer)?;
            }
        }
        FieldMode::Unsized => quote! {
            ::bytearc::seq::encode_unsized(#access, writer)?;
        },
    }
}

// Enum serialization

fn generate_enum(data: &syn::DataEnum, attrs: &ContainerAttrs) -> syn::Result<TokenStream2> {
    let mut arms = Vec::with_capacity(data.variants.len());
    for (idx, variant) in data.variants.iter().enumerate() {
        let variant_name = &variant.ident;
        let tag = tag_literal(idx);
        let fields = collect_fields(&variant.fields)?;
        check_member_count(variant, fields.len(), attrs)?;

        let writes: Vec<_> = fields
            .iter()
            .map(|f| {
                let binding = &f.binding;
                write_field(f, quote! { #binding })
            })
            .collect();
        let pattern = match &variant.fields {
            Fields::Unit => quote! { Self::#variant_name },
            Fields::Unnamed(_) => {
                let bindings = fields.iter().map(binding_pattern);
                quote! { Self::#variant_name(#(#bindings),*) }
            }
            Fields::Named(_) => {
                let bindings = fields.iter().map(|f| {
                    let member = &f.member;
                    let binding = binding_pattern(f);
                    quote! { #member: #binding }
                });
                quote! { Self::#variant_name { #(#bindings),* } }
            }
        };

        arms.push(quote! {
            #pattern => {
                writer.put_u8(#tag)?;
                #(#writes)*
                ::core::result::Result::Ok(())
            }
        });
    }

    Ok(quote! {
        match *self {
            #(#arms)*
        }
    })
}

/// `ref` binding for an encoded field, `_` for a skipped one.
fn binding_pattern(field: &FieldInfo) -> TokenStream2 {
    match field.mode {
        FieldMode::Skip => quote! { _ },
        _ => {
            let binding = &field.binding;
            quote! { ref #binding }
        }
    }
}
