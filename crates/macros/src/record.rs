//! Record derive macro implementation.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, parse_quote};

/// Entry point for `#[derive(Record)]`.
///
/// Generates one match arm per overridable field for reading, typing and
/// replacing it by name.
pub fn derive_record(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	match expand(input) {
		Ok(tokens) => tokens.into(),
		Err(e) => e.to_compile_error().into(),
	}
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
	let ident = &input.ident;

	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(&input, "Record can only be derived for structs"));
	};
	let Fields::Named(named) = &data.fields else {
		return Err(syn::Error::new_spanned(
			&data.fields,
			"Record requires named fields",
		));
	};

	let mut record_name = ident.to_string();
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("record")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("name") {
				let value: LitStr = meta.value()?.parse()?;
				record_name = value.value();
				Ok(())
			} else {
				Err(meta.error("unknown record attribute"))
			}
		})?;
	}

	let mut fields = Vec::new();
	for field in &named.named {
		let mut skip = false;
		for attr in field.attrs.iter().filter(|a| a.path().is_ident("record")) {
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("skip") {
					skip = true;
					Ok(())
				} else {
					Err(meta.error("unknown record field attribute"))
				}
			})?;
		}
		if !skip && let Some(name) = &field.ident {
			fields.push((name, &field.ty));
		}
	}

	let names: Vec<String> = fields
		.iter()
		.map(|(name, _)| name.to_string().trim_start_matches("r#").to_string())
		.collect();
	let idents: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
	let types: Vec<_> = fields.iter().map(|(_, ty)| *ty).collect();

	let mut generics = input.generics.clone();
	{
		let where_clause = generics.make_where_clause();
		where_clause
			.predicates
			.push(parse_quote!(Self: ::core::clone::Clone + ::core::marker::Send + ::core::marker::Sync + 'static));
		for ty in &types {
			where_clause
				.predicates
				.push(parse_quote!(#ty: ::dyno_registry::FieldValue));
		}
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
	let discard = names.is_empty().then(|| quote!(let _ = value;));

	Ok(quote! {
		impl #impl_generics ::dyno_registry::Record for #ident #ty_generics #where_clause {
			const FIELDS: &'static [&'static str] = &[#(#names),*];

			fn record_name(&self) -> ::core::option::Option<&'static str> {
				::core::option::Option::Some(#record_name)
			}

			fn field_type(name: &str) -> ::core::option::Option<::dyno_registry::StaticType> {
				match name {
					#(#names => ::core::option::Option::Some(
						<#types as ::dyno_registry::FieldValue>::static_type()
					),)*
					_ => ::core::option::Option::None,
				}
			}

			fn field(&self, name: &str) -> ::core::option::Option<::dyno_registry::Value> {
				match name {
					#(#names => ::core::option::Option::Some(
						<#types as ::dyno_registry::FieldValue>::to_value(&self.#idents)
					),)*
					_ => ::core::option::Option::None,
				}
			}

			fn with_field(
				&mut self,
				name: &str,
				value: ::dyno_registry::Value,
			) -> ::core::result::Result<(), ::dyno_registry::RecordError> {
				#discard
				match name {
					#(#names => {
						self.#idents = <#types as ::dyno_registry::FieldValue>::from_value(&value)
							.ok_or_else(|| ::dyno_registry::RecordError::TypeMismatch {
								field: ::std::string::ToString::to_string(name),
								got: value.type_name(),
							})?;
						::core::result::Result::Ok(())
					})*
					_ => ::core::result::Result::Err(::dyno_registry::RecordError::UnknownField(
						::std::string::ToString::to_string(name),
					)),
				}
			}
		}
	})
}
