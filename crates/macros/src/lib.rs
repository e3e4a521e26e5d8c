//! Derive macros for the Dyno parameter registry.
//!
//! * `#[derive(Record)]` - field access for records held by reactive containers
//! * `#[derive(Labels)]` - value conversion for unit-only enums

use proc_macro::TokenStream;

/// Labels derive implementation.
mod labels;
/// Record derive implementation.
mod record;

/// Implements `dyno_registry::Record` for a struct with named fields.
///
/// Every field type must implement `FieldValue`. Fields marked
/// `#[record(skip)]` are not overridable and need not implement it.
///
/// ```ignore
/// #[derive(Clone, Record)]
/// #[record(name = "ButtonState")]
/// struct State {
///     enabled: bool,
///     count: i32,
///     #[record(skip)]
///     history: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
	record::derive_record(input)
}

/// Implements `dyno_registry::FieldValue` for a unit-only enum.
///
/// Variant names are the labels offered by the debug screen, in declaration
/// order.
///
/// ```ignore
/// #[derive(Clone, Copy, Labels)]
/// enum Theme {
///     Light,
///     Dark,
/// }
/// ```
#[proc_macro_derive(Labels)]
pub fn derive_labels(input: TokenStream) -> TokenStream {
	labels::derive_labels(input)
}
