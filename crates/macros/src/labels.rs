//! Labels derive macro implementation.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Entry point for `#[derive(Labels)]`.
pub fn derive_labels(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	let ident = &input.ident;

	let Data::Enum(data) = &input.data else {
		return syn::Error::new_spanned(&input, "Labels can only be derived for enums")
			.to_compile_error()
			.into();
	};
	if data.variants.is_empty() {
		return syn::Error::new_spanned(&input, "Labels requires at least one variant")
			.to_compile_error()
			.into();
	}

	let mut variants = Vec::new();
	for variant in &data.variants {
		if !matches!(variant.fields, Fields::Unit) {
			return syn::Error::new_spanned(variant, "Labels only supports unit variants")
				.to_compile_error()
				.into();
		}
		variants.push(&variant.ident);
	}
	let labels: Vec<String> = variants.iter().map(|v| v.to_string()).collect();

	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

	let expanded = quote! {
		impl #impl_generics ::dyno_registry::FieldValue for #ident #ty_generics #where_clause {
			fn static_type() -> ::dyno_registry::StaticType {
				::dyno_registry::StaticType::Enum(&[#(#labels),*])
			}

			fn to_value(&self) -> ::dyno_registry::Value {
				let label = match self {
					#(Self::#variants => #labels,)*
				};
				::dyno_registry::Value::Enum(::std::string::ToString::to_string(label))
			}

			fn from_value(value: &::dyno_registry::Value) -> ::core::option::Option<Self> {
				match value.as_str()? {
					#(#labels => ::core::option::Option::Some(Self::#variants),)*
					_ => ::core::option::Option::None,
				}
			}
		}
	};

	expanded.into()
}
