//! Code generation for `#[derive(EnvConfig)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, GenericParam, parse_quote};

use super::parse::ParsedInput;

/// Emit the `EnvField` and `Record` implementations for `input`.
///
/// Type parameters gain a `'static` bound because records are inspected
/// through `dyn Any`.
pub(crate) fn generate_impls(
    input: &DeriveInput,
    parsed: &ParsedInput,
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let record_name = ident.to_string();
    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!('static));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let entries = parsed.fields.iter().map(|field| {
        let name = &field.ident;
        let name_str = name.to_string();
        let annotation = &field.annotation;
        quote! {
            #krate::FieldEntry::new(#name_str, #annotation, &mut self.#name)
        }
    });

    quote! {
        impl #impl_generics #krate::EnvField for #ident #ty_generics #where_clause {
            const IS_RECORD: bool = true;

            fn shape(&mut self) -> #krate::Shape<'_> {
                #krate::Shape::Record(self)
            }
        }

        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn record_name(&self) -> &'static str {
                #record_name
            }

            fn fields(&mut self) -> ::std::vec::Vec<#krate::FieldEntry<'_>> {
                ::std::vec![#(#entries),*]
            }
        }
    }
}
