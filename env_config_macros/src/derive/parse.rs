//! Parsing utilities for the `EnvConfig` derive macro.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Attribute, Data, DeriveInput, Fields, GenericParam, Ident, LitStr};

/// Struct-level `#[env_config(...)]` metadata.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub crate_path: Option<syn::Path>,
}

impl StructAttrs {
    /// Path prefixing every runtime item in generated code.
    pub(crate) fn crate_tokens(&self) -> TokenStream {
        self.crate_path
            .as_ref()
            .map_or_else(|| quote! { env_config }, ToTokens::to_token_stream)
    }
}

/// A field carrying an `#[env("...")]` annotation.
#[derive(Clone)]
pub(crate) struct AnnotatedField {
    pub ident: Ident,
    pub annotation: LitStr,
}

/// Everything the generator needs from the derive input.
pub(crate) struct ParsedInput {
    pub struct_attrs: StructAttrs,
    pub fields: Vec<AnnotatedField>,
}

/// Extracts `#[env_config(...)]` metadata applied to a struct.
///
/// Only the `crate` key is recognised; any other key is rejected so typos do
/// not pass silently.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("env_config")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit = meta.value()?.parse::<LitStr>()?;
                out.crate_path = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported env_config attribute"))
            }
        })?;
    }
    Ok(out)
}

/// Returns the annotation of a field, if it carries `#[env("...")]`.
///
/// The annotation must be a single string literal whose key, the text before
/// the first `;`, is not blank.
pub(crate) fn parse_field_annotation(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut found: Option<LitStr> = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("env")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate env attribute"));
        }
        let lit: LitStr = attr.parse_args().map_err(|err| {
            syn::Error::new(err.span(), "env attribute expects a string literal, e.g. #[env(\"KEY\")]")
        })?;
        let value = lit.value();
        let key = value.split(';').next().unwrap_or_default();
        if key.trim().is_empty() {
            return Err(syn::Error::new(lit.span(), "env annotation requires a key"));
        }
        found = Some(lit);
    }
    Ok(found)
}

/// Gathers the struct attributes and annotated fields in one pass.
///
/// Rejects enums, unions, tuple and unit structs, and lifetime parameters,
/// since records are stored behind `dyn Any`.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "EnvConfig requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "EnvConfig can only be derived for structs",
            ));
        }
    };
    if let Some(lifetime) = input
        .generics
        .params
        .iter()
        .find(|param| matches!(param, GenericParam::Lifetime(_)))
    {
        return Err(syn::Error::new_spanned(
            lifetime,
            "EnvConfig cannot be derived for structs with lifetime parameters",
        ));
    }

    let mut fields = Vec::new();
    for field in named {
        let Some(annotation) = parse_field_annotation(&field.attrs)? else {
            continue;
        };
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "EnvConfig requires named fields"));
        };
        fields.push(AnnotatedField { ident, annotation });
    }
    Ok(ParsedInput {
        struct_attrs,
        fields,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for derive input parsing.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use syn::parse_quote;

    #[rstest]
    fn parses_annotated_fields_in_order() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            #[env_config(crate = "cfg")]
            struct Demo {
                #[env("HOST;default=localhost")]
                host: String,
                cache: Vec<u8>,
                #[env("PORT")]
                port: u16,
            }
        };

        let parsed = parse_input(&input)?;
        let names: Vec<_> = parsed
            .fields
            .iter()
            .map(|f| (f.ident.to_string(), f.annotation.value()))
            .collect();
        ensure!(
            names
                == [
                    ("host".to_owned(), "HOST;default=localhost".to_owned()),
                    ("port".to_owned(), "PORT".to_owned()),
                ],
            "unexpected fields {names:?}"
        );
        let path = parsed
            .struct_attrs
            .crate_path
            .ok_or_else(|| anyhow!("crate path missing"))?;
        ensure!(path.is_ident("cfg"));
        Ok(())
    }

    #[rstest]
    #[case::enumeration(parse_quote! { enum Demo { A } }, "can only be derived for structs")]
    #[case::tuple(parse_quote! { struct Demo(u8); }, "requires named fields")]
    #[case::unit(parse_quote! { struct Demo; }, "requires named fields")]
    #[case::lifetime(
        parse_quote! { struct Demo<'a> { #[env("A")] a: &'a str } },
        "lifetime parameters"
    )]
    #[case::not_a_string(
        parse_quote! { struct Demo { #[env(KEY)] a: String } },
        "expects a string literal"
    )]
    #[case::blank_key(
        parse_quote! { struct Demo { #[env(" ;default=1")] a: String } },
        "requires a key"
    )]
    #[case::duplicate(
        parse_quote! { struct Demo { #[env("A")] #[env("B")] a: String } },
        "duplicate env attribute"
    )]
    #[case::unknown_struct_key(
        parse_quote! { #[env_config(prefix = "X")] struct Demo { a: String } },
        "unsupported env_config attribute"
    )]
    fn rejects_invalid_input(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
        let Err(err) = parse_input(&input) else {
            return Err(anyhow!("expected parse_input to fail"));
        };
        ensure!(err.to_string().contains(message), "unexpected error: {err}");
        Ok(())
    }

    #[rstest]
    fn struct_without_annotations_has_no_fields() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct Demo {
                a: String,
            }
        };
        let parsed = parse_input(&input)?;
        ensure!(parsed.fields.is_empty());
        ensure!(parsed.struct_attrs.crate_path.is_none());
        Ok(())
    }

    #[rstest]
    #[case::default(quote! { struct Demo; }, "env_config")]
    #[case::alias(quote! { #[env_config(crate = "cfg")] struct Demo; }, "cfg")]
    #[case::nested(
        quote! { #[env_config(crate = "deps::env_config")] struct Demo; },
        "deps :: env_config"
    )]
    fn crate_tokens_prefix_generated_paths(
        #[case] input: TokenStream,
        #[case] expected: &str,
    ) -> Result<()> {
        let input: DeriveInput = syn::parse2(input)?;
        let attrs = parse_struct_attrs(&input.attrs)?;
        ensure!(attrs.crate_tokens().to_string() == expected);
        Ok(())
    }
}
