//! Procedural macros for fixtura.
//!
//! Provides `#[derive(Buildable)]`, which turns a struct with named fields
//! into a buildable type with one property key per field.

use proc_macro::TokenStream;

/// Buildable derive macro implementation.
mod buildable;

/// Derives `fixtura::Buildable` for a struct with named fields.
///
/// Generates a companion module holding one `Property` static per field
/// (named in SCREAMING_SNAKE_CASE, labelled with the field name), an
/// `instantiate` that reads every field through the lookup, and a `schema`
/// listing every field for name-based overrides. `Option<_>` fields accept
/// explicit nulls.
///
/// ```ignore
/// #[derive(Buildable)]
/// #[buildable(module = boat)]
/// pub struct Boat {
///     #[buildable(default = "Dinghy".to_string())]
///     name: String,
///     length: u32,
///     flag: Option<String>,
/// }
///
/// let ark = Boat::maker().but([with(&boat::NAME, "Ark")]).make();
/// ```
///
/// # Container attributes
///
/// - `module = ident` - Name of the companion module (default: `<snake_case_type>_props`)
///
/// # Field attributes
///
/// - `default = expr` - Default value (default: `Default::default()`)
/// - `skip` - Not a property; always built from its default
/// - `unnamed` - A property, but left out of the schema (for values that are not `Send + Sync`)
///
/// Every field that is not skipped must be `Clone`. The struct must be declared
/// at module level, not inside a function body, and may not be generic. Two
/// fields whose names map to the same key (`fooBar` and `foo_bar`) are rejected.
#[proc_macro_derive(Buildable, attributes(buildable))]
pub fn derive_buildable(input: TokenStream) -> TokenStream {
	buildable::derive_buildable(input)
}
