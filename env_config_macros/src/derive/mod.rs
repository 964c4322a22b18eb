//! Expansion pipeline for `#[derive(EnvConfig)]`.

mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parse `input` and emit the trait implementations.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = parsed.struct_attrs.crate_tokens();
    Ok(generate::generate_impls(input, &parsed, &krate))
}
