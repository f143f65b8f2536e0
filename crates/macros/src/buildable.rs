//! `#[derive(Buildable)]` implementation.

use std::collections::HashMap;

use heck::{ToShoutySnakeCase, ToSnakeCase};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Expr, Fields, Ident, Type, parse_macro_input};

/// Per-field options parsed from `#[buildable(...)]`.
#[derive(Default)]
struct FieldOptions {
	default: Option<Expr>,
	skip: bool,
	unnamed: bool,
}

pub fn derive_buildable(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(&input)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	let name = &input.ident;
	let vis = &input.vis;

	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"Buildable cannot be derived for generic types",
		));
	}

	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			input,
			"Buildable can only be derived for structs",
		));
	};
	let Fields::Named(fields) = &data.fields else {
		return Err(syn::Error::new_spanned(
			&data.fields,
			"Buildable requires a struct with named fields",
		));
	};

	let module = container_module(input)?
		.unwrap_or_else(|| format_ident!("{}_props", name.unraw().to_string().to_snake_case()));

	let mut statics = Vec::new();
	let mut initializers = Vec::new();
	let mut descriptors = Vec::new();
	let mut keys: HashMap<String, &Ident> = HashMap::new();

	for field in &fields.named {
		let Some(ident) = &field.ident else {
			continue;
		};
		let options = field_options(field)?;
		let ty = &field.ty;
		let default = match &options.default {
			Some(expr) => quote! { #expr },
			None => quote! { ::core::default::Default::default() },
		};

		if options.skip {
			initializers.push(quote! { #ident: #default });
			continue;
		}

		let label = ident.unraw().to_string();
		let key = format_ident!("{}", label.to_shouty_snake_case());
		if let Some(previous) = keys.insert(key.to_string(), ident) {
			let message = format!(
				"field `{ident}` maps to property key `{key}`, already used by field `{previous}`"
			);
			return Err(syn::Error::new_spanned(ident, message));
		}
		let doc = format!("Property for the `{label}` field of [`{name}`].");

		statics.push(quote! {
			#[doc = #doc]
			pub static #key: ::std::sync::LazyLock<::fixtura::Property<#name, #ty>> =
				::std::sync::LazyLock::new(|| ::fixtura::Property::named(#label));
		});

		initializers.push(quote! {
			#ident: lookup.value_or_else(&*#module::#key, || #default)
		});

		if !options.unnamed {
			let constructor = if is_option(ty) {
				quote! { nullable }
			} else {
				quote! { new }
			};
			descriptors.push(quote! {
				.with(::fixtura::PropertyDescriptor::#constructor(&*#module::#key))
			});
		}
	}

	let module_doc = format!("Property keys for [`{name}`].");

	Ok(quote! {
		#[doc = #module_doc]
		#[allow(unused_imports)]
		#vis mod #module {
			use super::*;

			#(#statics)*
		}

		impl ::fixtura::Buildable for #name {
			fn instantiate(lookup: &::fixtura::PropertyLookup<'_, Self>) -> Self {
				Self {
					#(#initializers,)*
				}
			}

			fn schema() -> ::fixtura::PropertySchema<Self> {
				::fixtura::PropertySchema::new()
					#(#descriptors)*
			}
		}
	})
}

/// Parses `#[buildable(module = name)]` on the container.
fn container_module(input: &DeriveInput) -> syn::Result<Option<Ident>> {
	let mut module = None;
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("buildable")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("module") {
				module = Some(meta.value()?.parse::<Ident>()?);
				Ok(())
			} else {
				Err(meta.error("unknown buildable attribute; expected `module`"))
			}
		})?;
	}
	Ok(module)
}

/// Parses `#[buildable(...)]` on a field.
fn field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
	let mut options = FieldOptions::default();
	for attr in field.attrs.iter().filter(|a| a.path().is_ident("buildable")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("default") {
				options.default = Some(meta.value()?.parse::<Expr>()?);
				Ok(())
			} else if meta.path.is_ident("skip") {
				options.skip = true;
				Ok(())
			} else if meta.path.is_ident("unnamed") {
				options.unnamed = true;
				Ok(())
			} else {
				Err(meta.error(
					"unknown buildable field attribute; expected `default`, `skip` or `unnamed`",
				))
			}
		})?;
	}
	Ok(options)
}

/// Returns true for `Option<_>` written with any path prefix.
fn is_option(ty: &Type) -> bool {
	let Type::Path(path) = ty else {
		return false;
	};
	path.qself.is_none()
		&& path
			.path
			.segments
			.last()
			.is_some_and(|segment| segment.ident == "Option")
}
