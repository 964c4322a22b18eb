//! trybuild coverage for `#[env_config(crate = "...")]` support.
//!
//! Ensures the derive accepts the attribute and that the generated code
//! compiles when the crate path is overridden.

#[test]
fn crate_path_alias_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/crate_path_alias.rs");
    t.pass("tests/trybuild/crate_path_alias_renamed.rs");
}
