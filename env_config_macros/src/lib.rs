//! Procedural macros for `env_config`.
//!
//! `#[derive(EnvConfig)]` implements `env_config::Record` and
//! `env_config::EnvField` for a struct with named fields. Each field carrying
//! an `#[env("KEY;option=value")]` attribute is loaded from the environment;
//! fields without the attribute are left untouched.
//!
//! The struct attribute `#[env_config(crate = "path")]` points the generated
//! code at a renamed dependency.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `env_config::Record`.
///
/// ```rust,ignore
/// #[derive(Default, EnvConfig)]
/// struct Server {
///     #[env("HOST;default=localhost")]
///     host: String,
///     #[env("PEERS;delimiter=|")]
///     peers: Vec<String>,
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(EnvConfig, attributes(env, env_config))]
pub fn derive_env_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
