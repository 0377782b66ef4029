//! Procedural macros for the step-tracker crate
//!
//! This crate provides the `EntityModel` derive, which wires a struct's
//! identifier field into the ordered stores of the step-tracker crate.

use proc_macro::TokenStream;

mod entity_model;
mod utils;

/// Derive macro for implementing `step_tracker::models::EntityModel`
///
/// The identifier field is named with `#[entity(id_field = "...")]` and
/// defaults to `id`. Its type becomes the associated `Id` type and must be
/// totally ordered and printable.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Clone, EntityModel)]
/// #[entity(id_field = "group_id")]
/// struct Group {
///     group_id: String,
///     group_name: String,
/// }
/// ```
#[proc_macro_derive(EntityModel, attributes(entity))]
pub fn derive_entity_model(input: TokenStream) -> TokenStream {
    entity_model::process_derive_entity_model(input)
}
