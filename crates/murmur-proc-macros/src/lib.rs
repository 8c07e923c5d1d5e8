// murmur/murmur-proc-macros
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use proc_macro::TokenStream;

use convert_case::{Case, Casing};
use quote::quote;
use syn::{parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, LitStr};

/// Turns a struct into a document store record.
///
/// The struct needs a field named `id`. The collection name can be passed explicitly
/// (`#[entity("messages")]`), otherwise it is derived from the struct's name, i.e.
/// `MessageRecord` becomes `messages`.
#[proc_macro_attribute]
pub fn entity(attrs: TokenStream, stream: TokenStream) -> TokenStream {
    let explicit_collection_name = if attrs.is_empty() {
        None
    } else {
        Some(parse_macro_input!(attrs as LitStr).value())
    };
    let mut input = parse_macro_input!(stream as DeriveInput);

    let Data::Struct(struct_data) = &input.data else {
        panic!("This macro only supports structs.")
    };

    let Fields::Named(fields) = &struct_data.fields else {
        panic!("This macro only supports structs with named fields.")
    };

    let id_type = fields
        .named
        .iter()
        .find(|field| field.ident.as_ref().map(|ident| ident.to_string()) == Some("id".to_string()))
        .map(|field| &field.ty);

    let Some(id_type) = id_type else {
        panic!("No field named 'id' found in struct.")
    };

    let name = &input.ident;
    let collection_name = explicit_collection_name.unwrap_or_else(|| {
        let name = name.to_string().to_case(Case::Snake).to_lowercase();
        format!("{}s", name.strip_suffix("_record").unwrap_or(&name))
    });

    // Inserted in front so that `#[serde(…)]` attributes on the struct see the derive.
    let derive_attr: Attribute = parse_quote! {
        #[derive(serde::Serialize, serde::Deserialize, Clone, PartialEq, Debug)]
    };
    input.attrs.insert(0, derive_attr);

    let expanded = quote! {
        #input

        impl murmur_store::prelude::Entity for #name {
            type ID = #id_type;

            fn id(&self) -> &Self::ID {
                &self.id
            }

            fn collection() -> &'static str {
                #collection_name
            }
        }
    };

    TokenStream::from(expanded)
}

#[proc_macro_derive(InjectDependencies, attributes(inject))]
pub fn inject_deps(stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(stream as DeriveInput);

    let Data::Struct(struct_data) = &input.data else {
        panic!("This macro only supports structs.")
    };

    let Fields::Named(fields) = &struct_data.fields else {
        panic!("This macro only supports structs with named fields.")
    };

    let field_initialization = fields
        .named
        .iter()
        .filter_map(|field| {
            let Some(ref ident) = field.ident else {
                return None;
            };

            let is_injected = field
                .attrs
                .iter()
                .any(|attr| attr.path().is_ident("inject"));

            if is_injected {
                Some(quote! { #ident: deps.#ident.clone() })
            } else {
                Some(quote! { #ident: Default::default() })
            }
        })
        .collect::<Vec<_>>();

    let name = &input.ident;
    let expanded = quote! {
        impl From<&crate::app::deps::AppDependencies> for #name {
            fn from(deps: &crate::app::deps::AppDependencies) -> Self {
                Self {
                    #(#field_initialization,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
