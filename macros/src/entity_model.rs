//! EntityModel derive macro implementation
//!
//! This module contains the implementation of the EntityModel derive macro,
//! which exposes a struct's identifier field as its ordered store key.

use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::utils;

/// Receiver for the struct that derives `EntityModel`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
struct EntityModelReceiver {
    /// The struct identifier
    ident: syn::Ident,
    /// Name of the identifier field (defaults to `id`)
    #[darling(default)]
    id_field: Option<String>,
    /// The struct data with parsed fields
    data: ast::Data<(), EntityFieldReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
struct EntityFieldReceiver {
    /// The field identifier
    ident: Option<syn::Ident>,
    /// The field type
    ty: syn::Type,
}

/// Process the EntityModel derive macro
pub fn process_derive_entity_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_entity_model(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}

/// Generate the `EntityModel` implementation for a parsed struct
fn expand_entity_model(input: &DeriveInput) -> darling::Result<proc_macro2::TokenStream> {
    let receiver = EntityModelReceiver::from_derive_input(input)?;

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let id_field = receiver.id_field.as_deref().unwrap_or("id");
    let Some(field) = fields
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|ident| ident == id_field))
    else {
        return Err(darling::Error::custom(format!(
            "`{id_field}` is not a field of `{}`",
            receiver.ident
        ))
        .with_span(&receiver.ident));
    };

    if utils::is_option_type(&field.ty) {
        return Err(
            darling::Error::custom("an entity identifier cannot be optional").with_span(&field.ty),
        );
    }

    let struct_name = &receiver.ident;
    let field_ident = field.ident.as_ref();
    let id_type = &field.ty;

    Ok(quote! {
        impl ::step_tracker::models::EntityModel for #struct_name {
            type Id = #id_type;

            fn id(&self) -> &Self::Id {
                &self.#field_ident
            }

            fn key(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(&self.#field_ident)
            }
        }
    })
}
